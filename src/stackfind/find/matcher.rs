//! Match strategies.
//!
//! Word comparators take one search term and one content word and report where
//! inside the content word the match sits. Offsets and lengths here are bytes;
//! the engine converts them to characters before anything leaves the crate.
//!
//! | strategy           | strips punctuation | case         |
//! |--------------------|--------------------|--------------|
//! | [`whole_word_equal`] | yes              | insensitive  |
//! | [`begins_with`]      | yes              | insensitive  |
//! | [`contains`]         | no               | sensitive    |
//! | [`char_phrase`]      | no (whole text)  | sensitive    |
//!
//! Note the asymmetry: `contains` is case-sensitive, the stripped comparators
//! are not.

use crate::text;
use memchr::memmem;

/// A word with leading and trailing ASCII punctuation removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stripped<'a> {
    pub word: &'a str,
    /// Bytes removed from the front.
    pub prefix: usize,
    /// Bytes removed from the back.
    pub suffix: usize,
}

/// Where a search term matched inside one content word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordMatch {
    /// Byte offset from the start of the raw content word.
    pub offset: usize,
    /// Byte length of the search term that matched.
    pub len: usize,
    /// Character length of the search term that matched.
    pub chars: usize,
}

pub type WordComparator = fn(&str, &str) -> Option<WordMatch>;

/// Trims single-byte ASCII punctuation from both ends. Multi-byte characters
/// are never stripped, whatever their Unicode category.
pub fn strip_punctuation(word: &str) -> Stripped<'_> {
    let bytes = word.as_bytes();
    let prefix = bytes
        .iter()
        .take_while(|b| b.is_ascii_punctuation())
        .count();
    let suffix = bytes[prefix..]
        .iter()
        .rev()
        .take_while(|b| b.is_ascii_punctuation())
        .count();
    Stripped {
        word: &word[prefix..word.len() - suffix],
        prefix,
        suffix,
    }
}

pub fn whole_word_equal(search: &str, content: &str) -> Option<WordMatch> {
    let search = strip_punctuation(search);
    let content = strip_punctuation(content);
    text::eq_ignore_case(search.word, content.word).then(|| WordMatch {
        offset: content.prefix,
        len: search.word.len(),
        chars: search.word.chars().count(),
    })
}

pub fn begins_with(search: &str, content: &str) -> Option<WordMatch> {
    let search = strip_punctuation(search);
    let content = strip_punctuation(content);
    text::starts_with_ignore_case(content.word, search.word).then(|| WordMatch {
        offset: content.prefix,
        len: search.word.len(),
        chars: search.word.chars().count(),
    })
}

pub fn contains(search: &str, content: &str) -> Option<WordMatch> {
    memmem::find(content.as_bytes(), search.as_bytes()).map(|offset| WordMatch {
        offset,
        len: search.len(),
        chars: search.chars().count(),
    })
}

/// Byte offset of the first occurrence of `needle` in `haystack` at or after `from`.
pub fn char_phrase(needle: &str, haystack: &str, from: usize) -> Option<usize> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    memmem::find(&haystack.as_bytes()[from..], needle.as_bytes()).map(|pos| from + pos)
}
