use crate::config::FindConfig;

pub mod config;
pub mod find;
pub mod helpers;
pub mod info;

pub use find::{FoundMatch, RunOutcome};
pub use info::StackSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub matches: Vec<FoundMatch>,
    /// How the last search run ended.
    pub outcome: Option<RunOutcome>,
    pub summary: Option<StackSummary>,
    pub config: Option<FindConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_matches(mut self, matches: Vec<FoundMatch>) -> Self {
        self.matches = matches;
        self
    }

    pub fn with_outcome(mut self, outcome: RunOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn with_summary(mut self, summary: StackSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_config(mut self, config: FindConfig) -> Self {
        self.config = Some(config);
        self
    }
}
