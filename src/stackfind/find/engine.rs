//! The resumable find state machine.
//!
//! ```text
//!               begin_search
//!                    │
//!                    ▼
//!   ┌──────────▶ CARD_SETUP ──────┬───────────────┬──────────────┐
//!   │                │ no fields  │               │              │
//!   │                ▼            ▼               ▼              ▼
//!   └───────── GET_NEXT_CARD ◀─ WORDS_FIRST   WORD_PHRASE   CHAR_PHRASE
//!                    │             │               │              │
//!                    │             ▼               │              │
//!                    │        WORDS_OTHER          │              │
//!                    ▼             ▼               ▼              ▼
//!                  FINISH ◀────────┴───────────────┴──────────────┘
//! ```
//!
//! Every `step()` runs one handler. The heaviest handler scans the remaining
//! fields of a single card, so a caller can interleave steps with other work or
//! stop at any point. Nothing is cached across cards: each visit re-reads the
//! field list and field text from the document.

use super::matcher;
use super::policy;
use super::session::{
    CardScan, FindParams, FindResult, FindState, FindStats, SearchSession, StateKind,
};
use super::words;
use crate::model::{CardId, Owner};
use crate::store::StackDocument;
use crate::text;

#[derive(Debug, Default)]
pub struct FindEngine {
    session: Option<SearchSession>,
}

impl FindEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures a search starting at `anchor`, or re-arms the active one.
    ///
    /// With the same params as the active session the search is not restarted:
    /// the next steps continue past the previous match. The anchor is ignored in
    /// that case. A search scoped to a card field always runs on that field's
    /// card.
    pub fn begin_search<D: StackDocument + ?Sized>(
        &mut self,
        doc: &D,
        anchor: CardId,
        params: FindParams,
    ) {
        if let Some(session) = self.session.as_mut() {
            if session.params == params {
                session.rearm();
                tracing::debug!(
                    text = %session.params.text,
                    state = ?session.state.kind(),
                    "find again"
                );
                return;
            }
        }

        let terms = if params.mode.uses_terms() {
            words::search_terms(&params.text)
        } else {
            Vec::new()
        };
        let mut runnable = !params.text.is_empty() && (!params.mode.uses_terms() || !terms.is_empty());

        let mut anchor = anchor;
        let mut stop_card = false;
        let mut background = None;
        if let Some(field) = params.field {
            match doc.widget(field).map(|w| w.owner) {
                Some(Owner::Card(card)) => {
                    stop_card = true;
                    anchor = card;
                }
                Some(Owner::Background(bg)) => background = Some(bg),
                None => {
                    tracing::warn!(%field, "scoped field does not exist");
                    runnable = false;
                }
            }
        }
        if doc.card_index(anchor).is_none() {
            tracing::warn!(%anchor, "anchor card is not in the stack");
            runnable = false;
        }

        tracing::debug!(
            mode = %params.mode,
            text = %params.text,
            terms = terms.len(),
            %anchor,
            runnable,
            "begin search"
        );

        self.session = Some(SearchSession {
            params,
            terms,
            anchor,
            cursor: anchor,
            stop_card,
            background,
            matched: false,
            found: None,
            stats: FindStats::default(),
            state: if runnable {
                FindState::CardSetup
            } else {
                FindState::Finish { resume: None }
            },
        });
    }

    /// Runs one state handler. Returns false once the search has finished.
    pub fn step<D: StackDocument + ?Sized>(&mut self, doc: &D) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if matches!(session.state, FindState::Finish { .. }) {
            return false;
        }

        session.stats.steps += 1;
        let state = std::mem::replace(&mut session.state, FindState::GetNextCard);
        let from = state.kind();
        let next = match state {
            FindState::GetNextCard => session.next_card(doc),
            FindState::CardSetup => session.setup_card(doc),
            FindState::WordsFirst(scan) => session.words_first(doc, scan),
            FindState::WordsOther { scan, pending } => session.words_other(doc, scan, pending),
            FindState::WordPhrase(scan) => session.word_phrase(doc, scan),
            FindState::CharPhrase(scan) => session.char_phrase(doc, scan),
            finish @ FindState::Finish { .. } => finish,
        };
        tracing::trace!(?from, to = ?next.kind(), card = %session.cursor, "step");
        session.state = next;

        !matches!(session.state, FindState::Finish { .. })
    }

    /// The match of the current step sequence, if one was found.
    pub fn result(&self) -> Option<&FindResult> {
        self.session.as_ref().and_then(|s| s.found.as_ref())
    }

    /// Drops the session and everything cached with it.
    pub fn reset(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!("search reset");
        }
    }

    /// Raw search text of the active session, or `""`.
    pub fn active_terms(&self) -> &str {
        self.session
            .as_ref()
            .map(|s| s.params.text.as_str())
            .unwrap_or("")
    }

    pub fn params(&self) -> Option<&FindParams> {
        self.session.as_ref().map(|s| &s.params)
    }

    pub fn state(&self) -> Option<StateKind> {
        self.session.as_ref().map(|s| s.state.kind())
    }

    pub fn is_finished(&self) -> bool {
        self.state().map_or(true, |k| k == StateKind::Finish)
    }

    /// Card the scan cursor is on.
    pub fn cursor(&self) -> Option<CardId> {
        self.session.as_ref().map(|s| s.cursor)
    }

    pub fn stats(&self) -> FindStats {
        self.session.as_ref().map(|s| s.stats).unwrap_or_default()
    }
}

impl SearchSession {
    /// Prepares a finished or paused session to continue.
    fn rearm(&mut self) {
        self.found = None;
        let state = std::mem::replace(&mut self.state, FindState::GetNextCard);
        self.state = match state {
            FindState::Finish { resume: Some(scan) } => FindState::scanning(self.params.mode, scan),
            FindState::Finish { resume: None } if self.is_runnable() => {
                // The last traversal came up empty: start a fresh one here.
                self.matched = false;
                FindState::CardSetup
            }
            other => other,
        };
    }

    fn is_runnable(&self) -> bool {
        !self.params.text.is_empty() && (!self.params.mode.uses_terms() || !self.terms.is_empty())
    }

    fn finish(&self) -> FindState {
        FindState::Finish { resume: None }
    }

    fn next_card<D: StackDocument + ?Sized>(&mut self, doc: &D) -> FindState {
        if self.stop_card {
            return self.finish();
        }

        let count = doc.card_count();
        let Some(index) = doc.card_index(self.cursor) else {
            tracing::warn!(card = %self.cursor, "current card vanished during search");
            return self.finish();
        };
        let Some(next) = doc.card_at((index + 1) % count) else {
            return self.finish();
        };
        self.cursor = next;

        if next == self.anchor {
            if !self.matched {
                return self.finish();
            }
            // A new traversal begins; earlier matches may be found again.
            self.matched = false;
            self.found = None;
        }

        if let Some(background) = self.background {
            if doc.card_background(next) != Some(background) {
                return FindState::GetNextCard;
            }
        }
        if !policy::card_is_searchable(doc, next)
            || !policy::passes_marked_filter(doc, next, self.params.marked_only)
        {
            return FindState::GetNextCard;
        }
        FindState::CardSetup
    }

    fn setup_card<D: StackDocument + ?Sized>(&mut self, doc: &D) -> FindState {
        self.stats.cards_visited += 1;
        let fields = policy::searchable_fields(doc, self.cursor, self.params.field);
        if fields.is_empty() {
            return FindState::GetNextCard;
        }
        let scan = CardScan::start(doc, self.cursor, fields, self.params.mode);
        FindState::scanning(self.params.mode, scan)
    }

    fn words_first<D: StackDocument + ?Sized>(&mut self, doc: &D, mut scan: CardScan) -> FindState {
        let compare = self.params.mode.comparator();
        let Some(term) = self.terms.first() else {
            return self.finish();
        };
        loop {
            while scan.resume < scan.words.len() {
                let word = scan.words[scan.resume];
                scan.resume += 1;
                if let Some(m) = compare(term, word.as_str(&scan.text)) {
                    let pending = match_in_field(&scan, word.offset + m.offset, m.chars);
                    return FindState::WordsOther { scan, pending };
                }
            }
            if !scan.advance_field(doc, self.params.mode) {
                return FindState::GetNextCard;
            }
        }
    }

    fn words_other<D: StackDocument + ?Sized>(
        &mut self,
        doc: &D,
        scan: CardScan,
        pending: FindResult,
    ) -> FindState {
        if self.terms.len() > 1 {
            let compare = self.params.mode.comparator();
            // Tokenized once per visit; each term still sees every field.
            let fields: Vec<(String, Vec<words::Word>)> = scan
                .fields
                .iter()
                .filter_map(|field| doc.field_text(scan.card, *field))
                .map(|text| {
                    let tokens = words::tokenize(&text);
                    (text, tokens)
                })
                .collect();

            let satisfied = self.terms[1..].iter().all(|term| {
                fields.iter().any(|(text, tokens)| {
                    tokens
                        .iter()
                        .any(|w| compare(term, w.as_str(text)).is_some())
                })
            });
            if !satisfied {
                return FindState::GetNextCard;
            }
        }

        self.record(pending);
        FindState::Finish { resume: Some(scan) }
    }

    fn word_phrase<D: StackDocument + ?Sized>(&mut self, doc: &D, mut scan: CardScan) -> FindState {
        let n = self.terms.len();
        if n == 0 {
            return self.finish();
        }
        loop {
            while scan.resume + n <= scan.words.len() {
                let start = scan.resume;
                scan.resume += 1;
                let window = &scan.words[start..start + n];
                let hit = window
                    .iter()
                    .zip(&self.terms)
                    .all(|(w, term)| matcher::whole_word_equal(term, w.as_str(&scan.text)).is_some());
                if !hit {
                    continue;
                }

                let first = window[0];
                let last = window[n - 1];
                let lead = matcher::strip_punctuation(first.as_str(&scan.text)).prefix;
                let tail = matcher::strip_punctuation(last.as_str(&scan.text)).word.len();
                let begin = first.offset + lead;
                let end = (last.offset + tail).max(begin);
                let found = match_in_field(&scan, begin, text::char_len(&scan.text, begin, end));
                self.record(found);
                return FindState::Finish { resume: Some(scan) };
            }
            if !scan.advance_field(doc, self.params.mode) {
                return FindState::GetNextCard;
            }
        }
    }

    fn char_phrase<D: StackDocument + ?Sized>(&mut self, doc: &D, mut scan: CardScan) -> FindState {
        loop {
            if let Some(pos) = matcher::char_phrase(&self.params.text, &scan.text, scan.resume) {
                let step = scan.text[pos..].chars().next().map_or(1, char::len_utf8);
                scan.resume = pos + step;
                let found = match_in_field(&scan, pos, self.params.text.chars().count());
                self.record(found);
                return FindState::Finish { resume: Some(scan) };
            }
            if !scan.advance_field(doc, self.params.mode) {
                return FindState::GetNextCard;
            }
        }
    }

    fn record(&mut self, found: FindResult) {
        tracing::debug!(
            card = %found.card,
            field = %found.field,
            offset = found.offset,
            length = found.length,
            "match"
        );
        self.matched = true;
        self.stats.matches += 1;
        self.found = Some(found);
    }
}

/// Builds a result for `chars` characters starting at byte `start` of the
/// current field.
fn match_in_field(scan: &CardScan, start: usize, chars: usize) -> FindResult {
    let start = text::floor_char_boundary(&scan.text, start);
    FindResult {
        card: scan.card,
        field: scan.field(),
        offset: text::char_offset(&scan.text, start),
        length: chars,
        text: scan.text[start..].chars().take(chars).collect(),
        line: text::line_of(&scan.text, start),
    }
}
