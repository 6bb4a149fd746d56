use super::matcher::{self, WordComparator};
use super::words::{self, Word};
use crate::model::{BackgroundId, CardId, WidgetId};
use crate::store::StackDocument;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Matching semantics of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindMode {
    /// Words starting with each term (case-insensitive).
    #[default]
    Begins,
    /// Words containing each term (case-sensitive).
    Contains,
    /// Words equal to each term (case-insensitive).
    WholeWord,
    /// Consecutive whole words in query order.
    WordPhrase,
    /// The exact query text anywhere in a field (case-sensitive).
    CharPhrase,
}

impl FindMode {
    pub const ALL: [FindMode; 5] = [
        FindMode::Begins,
        FindMode::Contains,
        FindMode::WholeWord,
        FindMode::WordPhrase,
        FindMode::CharPhrase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FindMode::Begins => "begins",
            FindMode::Contains => "contains",
            FindMode::WholeWord => "whole-word",
            FindMode::WordPhrase => "word-phrase",
            FindMode::CharPhrase => "char-phrase",
        }
    }

    /// Modes that split the query into AND-terms.
    pub fn uses_terms(&self) -> bool {
        !matches!(self, FindMode::CharPhrase)
    }

    /// Comparator for the per-word modes scanned by `WORDS_FIRST`/`WORDS_OTHER`.
    /// Phrase modes never reach those states.
    pub(crate) fn comparator(&self) -> WordComparator {
        match self {
            FindMode::Contains => matcher::contains,
            FindMode::WholeWord | FindMode::WordPhrase => matcher::whole_word_equal,
            FindMode::Begins | FindMode::CharPhrase => matcher::begins_with,
        }
    }
}

impl fmt::Display for FindMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FindMode {
    type Err = String;

    /// Accepts the canonical names plus the scripting-language spellings
    /// (`normal`, `chars`, `word`, `whole`, `string`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "begins" | "normal" => Ok(FindMode::Begins),
            "contains" | "chars" => Ok(FindMode::Contains),
            "whole-word" | "word" => Ok(FindMode::WholeWord),
            "word-phrase" | "whole" | "phrase" => Ok(FindMode::WordPhrase),
            "char-phrase" | "string" => Ok(FindMode::CharPhrase),
            other => Err(format!(
                "unknown find mode '{}' (expected one of: begins, contains, whole-word, word-phrase, char-phrase)",
                other
            )),
        }
    }
}

/// The parameters that identify a search. Two `begin_search` calls with equal
/// params continue the same search instead of starting over.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FindParams {
    pub mode: FindMode,
    pub text: String,
    pub field: Option<WidgetId>,
    pub marked_only: bool,
}

impl FindParams {
    pub fn new(mode: FindMode, text: impl Into<String>) -> Self {
        Self {
            mode,
            text: text.into(),
            field: None,
            marked_only: false,
        }
    }

    pub fn in_field(mut self, field: WidgetId) -> Self {
        self.field = Some(field);
        self
    }

    pub fn marked_only(mut self, marked_only: bool) -> Self {
        self.marked_only = marked_only;
        self
    }
}

/// A located match. Offsets and lengths are in characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindResult {
    pub card: CardId,
    pub field: WidgetId,
    pub offset: usize,
    pub length: usize,
    pub text: String,
    /// 1-based line of the field the match starts on.
    pub line: usize,
}

impl FindResult {
    /// 1-based inclusive character range, as a `char X to Y` chunk reads it.
    pub fn char_range(&self) -> (usize, usize) {
        let first = self.offset + 1;
        (first, (first + self.length).saturating_sub(1).max(first))
    }
}

/// Counters kept across the life of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FindStats {
    pub steps: u64,
    pub cards_visited: u64,
    pub matches: u64,
}

/// Observable name of the engine's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    GetNextCard,
    CardSetup,
    WordsFirst,
    WordsOther,
    WordPhrase,
    CharPhrase,
    Finish,
}

/// Scan position inside one card: its searchable fields, the loaded text of
/// the current field, and a resume cursor (word index for word modes, byte
/// offset for [`FindMode::CharPhrase`]).
#[derive(Debug, Clone)]
pub(crate) struct CardScan {
    pub card: CardId,
    pub fields: Vec<WidgetId>,
    pub field_index: usize,
    pub text: String,
    pub words: Vec<Word>,
    pub resume: usize,
}

impl CardScan {
    pub fn start<D: StackDocument + ?Sized>(
        doc: &D,
        card: CardId,
        fields: Vec<WidgetId>,
        mode: FindMode,
    ) -> Self {
        let mut scan = Self {
            card,
            fields,
            field_index: 0,
            text: String::new(),
            words: Vec::new(),
            resume: 0,
        };
        scan.load_field(doc, mode);
        scan
    }

    pub fn field(&self) -> WidgetId {
        self.fields[self.field_index]
    }

    fn load_field<D: StackDocument + ?Sized>(&mut self, doc: &D, mode: FindMode) {
        self.text = doc
            .field_text(self.card, self.field())
            .unwrap_or_default();
        self.words = if mode.uses_terms() {
            words::tokenize(&self.text)
        } else {
            Vec::new()
        };
        self.resume = 0;
    }

    /// Moves to the next field. Returns false once the card is exhausted.
    pub fn advance_field<D: StackDocument + ?Sized>(&mut self, doc: &D, mode: FindMode) -> bool {
        if self.field_index + 1 >= self.fields.len() {
            return false;
        }
        self.field_index += 1;
        self.load_field(doc, mode);
        true
    }
}

/// Engine state. Each variant carries only the data valid in that state.
#[derive(Debug, Clone)]
pub(crate) enum FindState {
    GetNextCard,
    CardSetup,
    WordsFirst(CardScan),
    /// Term 0 matched; the remaining terms are checked card-wide.
    WordsOther {
        scan: CardScan,
        pending: FindResult,
    },
    WordPhrase(CardScan),
    CharPhrase(CardScan),
    /// Terminal. Keeps the scan position of the last match so the same search
    /// can resume past it.
    Finish {
        resume: Option<CardScan>,
    },
}

impl FindState {
    pub fn kind(&self) -> StateKind {
        match self {
            FindState::GetNextCard => StateKind::GetNextCard,
            FindState::CardSetup => StateKind::CardSetup,
            FindState::WordsFirst(_) => StateKind::WordsFirst,
            FindState::WordsOther { .. } => StateKind::WordsOther,
            FindState::WordPhrase(_) => StateKind::WordPhrase,
            FindState::CharPhrase(_) => StateKind::CharPhrase,
            FindState::Finish { .. } => StateKind::Finish,
        }
    }

    /// The scanning state a mode starts a card in.
    pub fn scanning(mode: FindMode, scan: CardScan) -> Self {
        match mode {
            FindMode::WordPhrase => FindState::WordPhrase(scan),
            FindMode::CharPhrase => FindState::CharPhrase(scan),
            FindMode::Begins | FindMode::Contains | FindMode::WholeWord => {
                FindState::WordsFirst(scan)
            }
        }
    }
}

/// One active search.
#[derive(Debug, Clone)]
pub(crate) struct SearchSession {
    pub params: FindParams,
    pub terms: Vec<String>,
    pub anchor: CardId,
    pub cursor: CardId,
    /// Scoped to a card field: only that card is searched.
    pub stop_card: bool,
    /// Scoped to a background field: only cards of that background are searched.
    pub background: Option<BackgroundId>,
    /// Set once the current traversal has produced a match.
    pub matched: bool,
    pub found: Option<FindResult>,
    pub stats: FindStats,
    pub state: FindState,
}
