//! Which cards and fields a search may look at.

use crate::model::{CardId, Owner, Widget, WidgetId};
use crate::store::StackDocument;

/// Buttons and "don't search" fields are never searched.
pub fn field_is_searchable(widget: &Widget) -> bool {
    widget.is_field() && !widget.dont_search
}

/// A card is skipped when it or its background is flagged "don't search".
pub fn card_is_searchable<D: StackDocument + ?Sized>(doc: &D, card: CardId) -> bool {
    let Some(background) = doc.card_background(card) else {
        return false;
    };
    !doc.card_dont_search(card) && !doc.background_dont_search(background)
}

/// Marked-cards restriction.
///
/// Extension point: a search with `marked_only` set is meant to visit only
/// cards where [`StackDocument::card_marked`] is true. The restriction is not
/// enforced yet, so every card passes.
pub fn passes_marked_filter<D: StackDocument + ?Sized>(
    _doc: &D,
    _card: CardId,
    _marked_only: bool,
) -> bool {
    true
}

/// Fields of `card` to scan, in search order.
///
/// Without a scope: background fields then card fields, each in layout order.
/// With a scope: just that field, if it is searchable and visible on `card`.
pub fn searchable_fields<D: StackDocument + ?Sized>(
    doc: &D,
    card: CardId,
    scope: Option<WidgetId>,
) -> Vec<WidgetId> {
    if !card_is_searchable(doc, card) {
        return Vec::new();
    }
    let Some(background) = doc.card_background(card) else {
        return Vec::new();
    };

    if let Some(field) = scope {
        let visible = doc.widget(field).is_some_and(|w| {
            field_is_searchable(w)
                && (w.owner == Owner::Card(card) || w.owner == Owner::Background(background))
        });
        return if visible { vec![field] } else { Vec::new() };
    }

    let mut fields = Vec::new();
    for owner in [Owner::Background(background), Owner::Card(card)] {
        fields.extend(
            doc.widgets(owner)
                .into_iter()
                .filter(|id| doc.widget(*id).is_some_and(field_is_searchable)),
        );
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStack;

    #[test]
    fn background_fields_come_first() {
        let mut mem = MemoryStack::new();
        let bg = mem.new_background("bg");
        let card = mem.new_card(bg, "c");
        let card_field = mem.new_field(Owner::Card(card), "cf", "");
        let bg_field = mem.new_field(Owner::Background(bg), "bf", "");

        assert_eq!(
            searchable_fields(&mem, card, None),
            vec![bg_field, card_field]
        );
    }

    #[test]
    fn buttons_and_excluded_fields_are_skipped() {
        let mut mem = MemoryStack::new();
        let bg = mem.new_background("bg");
        let card = mem.new_card(bg, "c");
        mem.new_button(Owner::Card(card), "btn");
        let hidden = mem.new_field(Owner::Card(card), "hidden", "");
        mem.widget_mut(hidden).unwrap().dont_search = true;
        let shown = mem.new_field(Owner::Card(card), "shown", "");

        assert_eq!(searchable_fields(&mem, card, None), vec![shown]);
    }

    #[test]
    fn scoped_button_or_excluded_field_yields_nothing() {
        let mut mem = MemoryStack::new();
        let bg = mem.new_background("bg");
        let card = mem.new_card(bg, "c");
        let btn = mem.new_button(Owner::Card(card), "btn");
        let hidden = mem.new_field(Owner::Card(card), "hidden", "");
        mem.widget_mut(hidden).unwrap().dont_search = true;

        assert!(searchable_fields(&mem, card, Some(btn)).is_empty());
        assert!(searchable_fields(&mem, card, Some(hidden)).is_empty());
    }

    #[test]
    fn scoped_field_must_be_visible_on_the_card() {
        let mut mem = MemoryStack::new();
        let bg1 = mem.new_background("one");
        let bg2 = mem.new_background("two");
        let c1 = mem.new_card(bg1, "c1");
        let c2 = mem.new_card(bg2, "c2");
        let bg_field = mem.new_field(Owner::Background(bg1), "f", "");

        assert_eq!(searchable_fields(&mem, c1, Some(bg_field)), vec![bg_field]);
        assert!(searchable_fields(&mem, c2, Some(bg_field)).is_empty());
    }

    #[test]
    fn excluded_background_hides_its_cards() {
        let mut mem = MemoryStack::new();
        let bg = mem.new_background("bg");
        let card = mem.new_card(bg, "c");
        mem.new_field(Owner::Card(card), "f", "text");
        assert!(card_is_searchable(&mem, card));

        mem.background_mut(bg).unwrap().dont_search = true;
        assert!(!card_is_searchable(&mem, card));
        assert!(searchable_fields(&mem, card, None).is_empty());
    }

    #[test]
    fn marked_filter_lets_everything_through() {
        let mut mem = MemoryStack::new();
        let bg = mem.new_background("bg");
        let card = mem.new_card(bg, "c");
        assert!(passes_marked_filter(&mem, card, true));
        assert!(passes_marked_filter(&mem, card, false));
    }
}
