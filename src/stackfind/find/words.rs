use crate::text;

/// Most AND-terms a search keeps; extra terms are ignored.
pub const MAX_TERMS: usize = 32;

/// A word of field text, as a byte range into that text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word {
    pub offset: usize,
    pub end: usize,
}

impl Word {
    pub fn as_str<'a>(&self, source: &'a str) -> &'a str {
        &source[self.offset..self.end]
    }
}

/// Splits field text into words with their byte offsets.
pub fn tokenize(source: &str) -> Vec<Word> {
    text::words(source)
        .map(|(offset, w)| Word {
            offset,
            end: offset + w.len(),
        })
        .collect()
}

/// Splits a query into its AND-terms.
pub fn search_terms(query: &str) -> Vec<String> {
    let terms: Vec<String> = text::words(query)
        .map(|(_, w)| w.to_string())
        .take(MAX_TERMS + 1)
        .collect();
    if terms.len() > MAX_TERMS {
        tracing::warn!(max = MAX_TERMS, "search text has too many words, extra terms ignored");
        return terms.into_iter().take(MAX_TERMS).collect();
    }
    terms
}
