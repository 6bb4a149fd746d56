//! # Storage Layer
//!
//! The find engine never owns the document it searches. It reaches the stack
//! through the [`StackDocument`] trait, which exposes exactly what a search needs:
//!
//! - ring-ordered card enumeration (position ↔ id)
//! - background membership of a card
//! - per-card, per-background and per-widget "don't search" flags
//! - widget lists per layer, in layout order
//! - plain-text field content for a (card, field) pair
//!
//! ## Implementations
//!
//! - [`memory::MemoryStack`]: Indexed in-memory stack. Used by tests and by the
//!   CLI once a stack file has been read.
//! - [`fs::StackFile`]: Reads and writes the serialized [`Stack`](crate::model::Stack)
//!   form, as plain JSON or gzip-compressed JSON.
//!
//! ## Exclusive Access
//!
//! A search reads the document across many `step()` calls. Implementations give
//! no isolation: callers must not delete cards or fields while a search is
//! active. A card or field that has disappeared simply reads as absent.

use crate::model::{Background, BackgroundId, Card, CardId, Owner, Widget, WidgetId};

pub mod fs;
pub mod memory;

/// Read access to a stack document.
pub trait StackDocument {
    /// Number of cards in the ring.
    fn card_count(&self) -> usize;

    /// Card at a ring position.
    fn card_at(&self, index: usize) -> Option<CardId>;

    /// Ring position of a card.
    fn card_index(&self, card: CardId) -> Option<usize>;

    fn card(&self, id: CardId) -> Option<&Card>;

    fn background(&self, id: BackgroundId) -> Option<&Background>;

    fn widget(&self, id: WidgetId) -> Option<&Widget>;

    /// Widgets owned by one layer, in layout order.
    fn widgets(&self, owner: Owner) -> Vec<WidgetId>;

    fn card_background(&self, card: CardId) -> Option<BackgroundId> {
        self.card(card).map(|c| c.background)
    }

    fn card_dont_search(&self, card: CardId) -> bool {
        self.card(card).map(|c| c.dont_search).unwrap_or(false)
    }

    fn background_dont_search(&self, background: BackgroundId) -> bool {
        self.background(background)
            .map(|b| b.dont_search)
            .unwrap_or(false)
    }

    fn card_marked(&self, card: CardId) -> bool {
        self.card(card).map(|c| c.marked).unwrap_or(false)
    }

    /// Text a field shows on a given card.
    ///
    /// Returns `None` when the field does not exist or is not visible on that card
    /// (a card field of another card, or a background field of another background).
    fn field_text(&self, card: CardId, field: WidgetId) -> Option<String> {
        let widget = self.widget(field)?;
        match widget.owner {
            Owner::Card(owner) => (owner == card).then(|| widget.text.clone()),
            Owner::Background(background) => {
                let card = self.card(card)?;
                if card.background != background {
                    return None;
                }
                if widget.shared_text {
                    Some(widget.text.clone())
                } else {
                    Some(
                        card.background_text
                            .get(&field)
                            .cloned()
                            .unwrap_or_default(),
                    )
                }
            }
        }
    }
}
