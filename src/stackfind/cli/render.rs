//! # Rendering
//!
//! Turns `CmdResult` data into terminal lines. Layout math (snippet widths,
//! truncation) is plain string work and is unit tested; colors are applied
//! last with `colored`, which turns itself off when stdout is not a terminal.

use colored::Colorize;
use stackfind::api::{CmdMessage, FoundMatch, MessageLevel, StackSummary};
use stackfind::config::FindConfig;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';
const SNIPPET_INDENT: &str = "    ";

/// Context around a match, split so the match can be highlighted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub before: String,
    pub matched: String,
    pub after: String,
}

/// Cuts a one-line window of about `width` columns around a match given in
/// characters. Line breaks become spaces.
pub fn snippet(text: &str, offset: usize, length: usize, width: usize) -> Snippet {
    let chars: Vec<char> = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
        .collect();
    let start = offset.min(chars.len());
    let end = offset.saturating_add(length).min(chars.len());

    let matched: String = chars[start..end].iter().collect();
    let room = width.saturating_sub(matched.width());
    let before = truncate_front(&chars[..start], room / 2);
    let after = truncate_back(&chars[end..], room.saturating_sub(before.width()));

    Snippet {
        before,
        matched,
        after,
    }
}

/// The tail of `chars` that fits in `max_width` columns.
fn truncate_front(chars: &[char], max_width: usize) -> String {
    let total: usize = chars.iter().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return chars.iter().collect();
    }

    let mut kept = Vec::new();
    let mut current_width = 0;
    for c in chars.iter().rev() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        kept.push(*c);
        current_width += char_width;
    }
    if max_width > 0 {
        kept.push(ELLIPSIS);
    }
    kept.iter().rev().collect()
}

/// The head of `chars` that fits in `max_width` columns.
fn truncate_back(chars: &[char], max_width: usize) -> String {
    let total: usize = chars.iter().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return chars.iter().collect();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in chars {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(*c);
        current_width += char_width;
    }
    if max_width > 0 {
        result.push(ELLIPSIS);
    }
    result
}

fn card_label(m: &FoundMatch) -> String {
    if m.card_name.is_empty() {
        format!("card id {}", m.result.card)
    } else {
        format!("card \"{}\" (id {})", m.card_name, m.result.card)
    }
}

/// Header line and context line for one match.
pub fn render_match(m: &FoundMatch, width: usize) -> String {
    let s = snippet(&m.field_text, m.result.offset, m.result.length, width);
    format!(
        "{}  {}  {}\n{}{}{}{}",
        card_label(m).bold(),
        m.chunk(),
        format!("line {}", m.result.line).dimmed(),
        SNIPPET_INDENT,
        s.before,
        s.matched.yellow().bold(),
        s.after
    )
}

pub fn render_matches(matches: &[FoundMatch], width: usize) -> String {
    matches
        .iter()
        .map(|m| render_match(m, width))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_summary(name: &str, summary: &StackSummary) -> String {
    let rows = [
        ("cards", summary.cards),
        ("backgrounds", summary.backgrounds),
        ("fields", summary.fields),
        ("buttons", summary.buttons),
        ("excluded cards", summary.excluded_cards),
        ("excluded fields", summary.excluded_fields),
        ("marked cards", summary.marked_cards),
    ];
    let mut out = if name.is_empty() {
        String::new()
    } else {
        format!("{}\n", name.bold())
    };
    for (label, value) in rows {
        out.push_str(&format!("  {:<16}{}\n", label, value));
    }
    out
}

pub fn render_config(config: &FindConfig) -> String {
    config
        .entries()
        .into_iter()
        .map(|(key, value)| format!("{} = {}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}
