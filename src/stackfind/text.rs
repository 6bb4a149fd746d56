//! String primitives shared by the tokenizer and the match strategies.
//!
//! Words are runs of non-whitespace characters, the way the scripting
//! language's `word` chunk sees them: punctuation stays attached to the word.
//! Case folding is per character so that folded strings keep their character
//! counts aligned with the originals.

/// Splits `text` at whitespace, yielding each word with its byte offset.
pub fn words(text: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    text.split(char::is_whitespace)
        .filter(|w| !w.is_empty())
        .map(move |w| (w.as_ptr() as usize - text.as_ptr() as usize, w))
}

pub fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    let mut left = a.chars();
    let mut right = b.chars();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if chars_eq_ignore_case(x, y) => continue,
            _ => return false,
        }
    }
}

pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let mut chars = text.chars();
    prefix
        .chars()
        .all(|p| chars.next().is_some_and(|c| chars_eq_ignore_case(c, p)))
}

/// Largest char boundary of `text` that is `<= index`.
pub fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut i = index;
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Number of characters in the first `byte_offset` bytes of `text`.
pub fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..floor_char_boundary(text, byte_offset)].chars().count()
}

/// Number of characters between two byte offsets of `text`.
pub fn char_len(text: &str, start: usize, end: usize) -> usize {
    let start = floor_char_boundary(text, start);
    let end = floor_char_boundary(text, end).max(start);
    text[start..end].chars().count()
}

/// 1-based line number containing `byte_offset`. Lines end at `\n` or `\r`.
pub fn line_of(text: &str, byte_offset: usize) -> usize {
    let end = floor_char_boundary(text, byte_offset);
    let bytes = &text.as_bytes()[..end];
    let mut line = 1;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                line += 1;
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            }
            b'\n' => line += 1,
            _ => {}
        }
        i += 1;
    }
    line
}
