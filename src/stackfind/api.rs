//! # API Facade
//!
//! The single entry point for searching a stack, whatever the UI.
//!
//! [`FindApi`] owns the document, one [`FindEngine`] and the configuration. It
//! offers two surfaces:
//!
//! - **Interactive**: [`begin_search`](FindApi::begin_search),
//!   [`step`](FindApi::step), [`result`](FindApi::result),
//!   [`reset`](FindApi::reset) and [`active_terms`](FindApi::active_terms), plus
//!   [`run`](FindApi::run) to drive the step loop under a budget. A host that
//!   wants to stay responsive calls `run` with a small budget between frames.
//! - **Command**: [`find`](FindApi::find), [`find_all`](FindApi::find_all) and
//!   [`info`](FindApi::info), which take user-facing references (card names,
//!   `#N` ring positions, field names) and return a [`CmdResult`].
//!
//! Like the rest of the library, nothing here prints or exits.
//!
//! ## Generic Over StackDocument
//!
//! `FindApi<D: StackDocument>` runs against any document implementation:
//! `FindApi<MemoryStack>` for stacks loaded from a [`StackFile`], or a host's own
//! document type.
//!
//! [`StackFile`]: crate::store::fs::StackFile

use crate::commands;
use crate::config::FindConfig;
use crate::error::{FindError, Result};
use crate::find::{FindEngine, FindParams, FindResult, StateKind};
use crate::model::{CardId, WidgetId};
use crate::store::StackDocument;
use std::path::Path;

/// Where a command-surface search should run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTarget {
    /// Anchor card reference. Defaults to the first card of the ring.
    pub from: Option<String>,
    /// Field reference restricting the search to one field.
    pub field: Option<String>,
}

pub struct FindApi<D: StackDocument> {
    doc: D,
    engine: FindEngine,
    config: FindConfig,
}

impl<D: StackDocument> FindApi<D> {
    pub fn new(doc: D, config: FindConfig) -> Self {
        Self {
            doc,
            engine: FindEngine::new(),
            config,
        }
    }

    pub fn doc(&self) -> &D {
        &self.doc
    }

    /// Mutable access to the document. Ends any active search.
    pub fn doc_mut(&mut self) -> &mut D {
        self.engine.reset();
        &mut self.doc
    }

    pub fn into_doc(self) -> D {
        self.doc
    }

    pub fn config(&self) -> &FindConfig {
        &self.config
    }

    // --- Interactive surface ---

    pub fn begin_search(&mut self, anchor: CardId, params: FindParams) {
        self.engine.begin_search(&self.doc, anchor, params);
    }

    pub fn step(&mut self) -> bool {
        self.engine.step(&self.doc)
    }

    pub fn result(&self) -> Option<&FindResult> {
        self.engine.result()
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn active_terms(&self) -> &str {
        self.engine.active_terms()
    }

    pub fn state(&self) -> Option<StateKind> {
        self.engine.state()
    }

    pub fn engine(&self) -> &FindEngine {
        &self.engine
    }

    /// Steps the active search at most `budget` times.
    pub fn run(&mut self, budget: usize) -> commands::RunOutcome {
        commands::find::drive(&mut self.engine, &self.doc, budget)
    }

    // --- Command surface ---

    /// Finds the next match. Repeating the call with the same target and params
    /// continues past the previous match.
    pub fn find(
        &mut self,
        target: &SearchTarget,
        params: FindParams,
    ) -> Result<commands::CmdResult> {
        let (anchor, params) = self.resolve_target(target, params)?;
        commands::find::run(
            &self.doc,
            &mut self.engine,
            anchor,
            params,
            self.config.step_budget,
        )
    }

    /// Every match of a search, each reported once.
    pub fn find_all(
        &mut self,
        target: &SearchTarget,
        params: FindParams,
    ) -> Result<commands::CmdResult> {
        let (anchor, params) = self.resolve_target(target, params)?;
        commands::find::run_all(
            &self.doc,
            &mut self.engine,
            anchor,
            params,
            self.config.step_budget,
        )
    }

    pub fn info(&self) -> Result<commands::CmdResult> {
        commands::info::run(&self.doc)
    }

    pub fn resolve_card(&self, reference: &str) -> Result<CardId> {
        commands::helpers::resolve_card(&self.doc, reference)
    }

    pub fn resolve_field(&self, reference: &str, near: Option<CardId>) -> Result<WidgetId> {
        commands::helpers::resolve_field(&self.doc, reference, near)
    }

    fn resolve_target(
        &self,
        target: &SearchTarget,
        mut params: FindParams,
    ) -> Result<(CardId, FindParams)> {
        let anchor = match target.from.as_deref() {
            Some(reference) => self.resolve_card(reference)?,
            None => self
                .doc
                .card_at(0)
                .ok_or_else(|| FindError::Api("Stack has no cards".to_string()))?,
        };
        if let Some(reference) = target.field.as_deref() {
            params.field = Some(self.resolve_field(reference, Some(anchor))?);
        }
        Ok((anchor, params))
    }
}

/// Shows or changes the configuration stored in `dir`.
pub fn config(dir: &Path, action: ConfigAction) -> Result<commands::CmdResult> {
    commands::config::run(dir, action)
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{
    CmdMessage, CmdResult, FoundMatch, MessageLevel, RunOutcome, StackSummary,
};
