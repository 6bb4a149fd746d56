use crate::error::{FindError, Result};
use crate::model::{BackgroundId, CardId, Owner, WidgetId};
use crate::store::StackDocument;
use crate::text;

/// Card ids in ring order.
pub fn ring<D: StackDocument + ?Sized>(doc: &D) -> impl Iterator<Item = CardId> + '_ {
    (0..doc.card_count()).filter_map(move |i| doc.card_at(i))
}

/// Backgrounds used by at least one card, in order of first use.
pub fn backgrounds_in_use<D: StackDocument + ?Sized>(doc: &D) -> Vec<BackgroundId> {
    let mut seen = Vec::new();
    for card in ring(doc) {
        if let Some(bg) = doc.card_background(card) {
            if !seen.contains(&bg) {
                seen.push(bg);
            }
        }
    }
    seen
}

/// 1-based ring position of a card.
pub fn position<D: StackDocument + ?Sized>(doc: &D, card: CardId) -> Option<usize> {
    doc.card_index(card).map(|i| i + 1)
}

/// Resolves a user-supplied card reference.
///
/// `#3` is the third card of the ring, a bare number is a card id, anything
/// else is matched against card names ignoring case.
pub fn resolve_card<D: StackDocument + ?Sized>(doc: &D, reference: &str) -> Result<CardId> {
    let reference = reference.trim();
    let not_found = || FindError::NoSuchCard(reference.to_string());

    if let Some(pos) = reference.strip_prefix('#') {
        let pos: usize = pos.parse().map_err(|_| not_found())?;
        return pos
            .checked_sub(1)
            .and_then(|i| doc.card_at(i))
            .ok_or_else(not_found);
    }
    if let Ok(id) = reference.parse::<u32>() {
        if doc.card(CardId(id)).is_some() {
            return Ok(CardId(id));
        }
    }
    ring(doc)
        .find(|id| {
            doc.card(*id)
                .is_some_and(|c| text::eq_ignore_case(&c.name, reference))
        })
        .ok_or_else(not_found)
}

/// Resolves a user-supplied widget reference, by id or by name.
///
/// Names are looked up on `near` first (its background layer, then its card
/// layer), then across the rest of the ring. Fields win over buttons with the
/// same name.
pub fn resolve_field<D: StackDocument + ?Sized>(
    doc: &D,
    reference: &str,
    near: Option<CardId>,
) -> Result<WidgetId> {
    let reference = reference.trim();
    if let Ok(id) = reference.parse::<u32>() {
        if doc.widget(WidgetId(id)).is_some() {
            return Ok(WidgetId(id));
        }
    }

    let mut candidates = Vec::new();
    let cards = near.into_iter().chain(ring(doc));
    for card in cards {
        if let Some(bg) = doc.card_background(card) {
            candidates.extend(doc.widgets(Owner::Background(bg)));
        }
        candidates.extend(doc.widgets(Owner::Card(card)));
    }

    let named = |id: &WidgetId| {
        doc.widget(*id)
            .is_some_and(|w| text::eq_ignore_case(&w.name, reference))
    };
    let field = candidates
        .iter()
        .copied()
        .filter(named)
        .find(|id| doc.widget(*id).is_some_and(|w| w.is_field()));
    field
        .or_else(|| candidates.iter().copied().find(named))
        .ok_or_else(|| FindError::NoSuchField(reference.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStack;

    fn stack() -> (MemoryStack, Vec<CardId>) {
        let mut mem = MemoryStack::new();
        let bg = mem.new_background("Main");
        let cards = vec![
            mem.new_card(bg, "Home"),
            mem.new_card(bg, "Index"),
            mem.new_card(bg, ""),
        ];
        (mem, cards)
    }

    #[test]
    fn cards_resolve_by_position_id_and_name() {
        let (mem, cards) = stack();
        assert_eq!(resolve_card(&mem, "#2").unwrap(), cards[1]);
        assert_eq!(resolve_card(&mem, &cards[2].0.to_string()).unwrap(), cards[2]);
        assert_eq!(resolve_card(&mem, "home").unwrap(), cards[0]);
    }

    #[test]
    fn unknown_card_references_fail() {
        let (mem, _) = stack();
        for reference in ["#0", "#9", "#x", "999", "Nowhere"] {
            assert!(matches!(
                resolve_card(&mem, reference),
                Err(FindError::NoSuchCard(_))
            ));
        }
    }

    #[test]
    fn fields_near_the_card_win() {
        let (mut mem, cards) = stack();
        let far = mem.new_field(Owner::Card(cards[0]), "Notes", "");
        let near = mem.new_field(Owner::Card(cards[1]), "Notes", "");

        assert_eq!(resolve_field(&mem, "notes", Some(cards[1])).unwrap(), near);
        assert_eq!(resolve_field(&mem, "notes", None).unwrap(), far);
    }

    #[test]
    fn fields_win_over_buttons() {
        let (mut mem, cards) = stack();
        mem.new_button(Owner::Card(cards[0]), "Title");
        let field = mem.new_field(Owner::Card(cards[1]), "Title", "");
        assert_eq!(resolve_field(&mem, "Title", None).unwrap(), field);
    }

    #[test]
    fn widgets_resolve_by_id() {
        let (mut mem, cards) = stack();
        let button = mem.new_button(Owner::Card(cards[0]), "Go");
        assert_eq!(resolve_field(&mem, &button.0.to_string(), None).unwrap(), button);
        assert!(matches!(
            resolve_field(&mem, "Missing", None),
            Err(FindError::NoSuchField(_))
        ));
    }

    #[test]
    fn backgrounds_are_listed_once() {
        let (mut mem, _) = stack();
        let other = mem.new_background("Other");
        mem.new_card(other, "x");
        assert_eq!(backgrounds_in_use(&mem).len(), 2);
    }
}
