use crate::commands::{helpers, CmdResult};
use crate::error::Result;
use crate::find::policy;
use crate::model::Owner;
use crate::store::StackDocument;
use serde::Serialize;

/// Counts describing what a search over the stack will see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StackSummary {
    pub cards: usize,
    pub backgrounds: usize,
    pub fields: usize,
    pub buttons: usize,
    /// Cards skipped because they or their background are excluded from search.
    pub excluded_cards: usize,
    /// Fields flagged "don't search".
    pub excluded_fields: usize,
    pub marked_cards: usize,
}

pub fn run<D: StackDocument + ?Sized>(doc: &D) -> Result<CmdResult> {
    let mut summary = StackSummary::default();

    let backgrounds = helpers::backgrounds_in_use(doc);
    summary.backgrounds = backgrounds.len();

    let mut owners: Vec<Owner> = backgrounds.into_iter().map(Owner::Background).collect();
    for card in helpers::ring(doc) {
        summary.cards += 1;
        if !policy::card_is_searchable(doc, card) {
            summary.excluded_cards += 1;
        }
        if doc.card_marked(card) {
            summary.marked_cards += 1;
        }
        owners.push(Owner::Card(card));
    }

    for owner in owners {
        for widget in doc.widgets(owner).into_iter().filter_map(|id| doc.widget(id)) {
            if widget.is_field() {
                summary.fields += 1;
                if widget.dont_search {
                    summary.excluded_fields += 1;
                }
            } else {
                summary.buttons += 1;
            }
        }
    }

    tracing::debug!(?summary, "stack summary");
    Ok(CmdResult::default().with_summary(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStack;

    #[test]
    fn counts_widgets_on_both_layers() {
        let mut mem = MemoryStack::new();
        let bg = mem.new_background("Main");
        let other = mem.new_background("Archive");
        let c1 = mem.new_card(bg, "a");
        let c2 = mem.new_card(bg, "b");
        let c3 = mem.new_card(other, "c");
        mem.new_field(Owner::Background(bg), "Title", "");
        let hidden = mem.new_field(Owner::Card(c1), "Secret", "");
        mem.widget_mut(hidden).unwrap().dont_search = true;
        mem.new_button(Owner::Card(c2), "Next");
        mem.card_mut(c2).unwrap().marked = true;
        mem.background_mut(other).unwrap().dont_search = true;
        let _ = c3;

        let summary = run(&mem).unwrap().summary.unwrap();
        assert_eq!(
            summary,
            StackSummary {
                cards: 3,
                backgrounds: 2,
                fields: 2,
                buttons: 1,
                excluded_cards: 1,
                excluded_fields: 1,
                marked_cards: 1,
            }
        );
    }

    #[test]
    fn empty_stack() {
        let summary = run(&MemoryStack::new()).unwrap().summary.unwrap();
        assert_eq!(summary, StackSummary::default());
    }
}
