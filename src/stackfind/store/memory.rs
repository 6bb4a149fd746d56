use super::StackDocument;
use crate::error::{FindError, Result};
use crate::model::{
    Background, BackgroundId, Card, CardId, Owner, Stack, Widget, WidgetId, WidgetKind,
};
use std::collections::HashMap;

/// In-memory stack with lookup indexes over the serialized [`Stack`].
///
/// Positions in `stack.cards` are the ring order. Every structural change
/// rebuilds the indexes, so reads stay O(1) while a search is running.
#[derive(Debug, Default)]
pub struct MemoryStack {
    stack: Stack,
    card_pos: HashMap<CardId, usize>,
    background_pos: HashMap<BackgroundId, usize>,
    widget_pos: HashMap<WidgetId, usize>,
    layers: HashMap<Owner, Vec<WidgetId>>,
}

impl MemoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_stack(stack: Stack) -> Self {
        let mut mem = Self {
            stack,
            ..Self::default()
        };
        mem.reindex();
        mem
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn into_stack(self) -> Stack {
        self.stack
    }

    pub fn name(&self) -> &str {
        &self.stack.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.stack.name = name.into();
    }

    pub fn cards(&self) -> &[Card] {
        &self.stack.cards
    }

    pub fn backgrounds(&self) -> &[Background] {
        &self.stack.backgrounds
    }

    pub fn all_widgets(&self) -> &[Widget] {
        &self.stack.widgets
    }

    fn reindex(&mut self) {
        self.card_pos = self
            .stack
            .cards
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id, i))
            .collect();
        self.background_pos = self
            .stack
            .backgrounds
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id, i))
            .collect();
        self.widget_pos = self
            .stack
            .widgets
            .iter()
            .enumerate()
            .map(|(i, w)| (w.id, i))
            .collect();
        self.layers.clear();
        for widget in &self.stack.widgets {
            self.layers.entry(widget.owner).or_default().push(widget.id);
        }
    }

    pub fn add_background(&mut self, background: Background) -> Result<()> {
        if self.background_pos.contains_key(&background.id) {
            return Err(FindError::Store(format!(
                "Duplicate background id {}",
                background.id
            )));
        }
        self.stack.backgrounds.push(background);
        self.reindex();
        Ok(())
    }

    /// Appends a card at the end of the ring.
    pub fn add_card(&mut self, card: Card) -> Result<()> {
        if self.card_pos.contains_key(&card.id) {
            return Err(FindError::Store(format!("Duplicate card id {}", card.id)));
        }
        if !self.background_pos.contains_key(&card.background) {
            return Err(FindError::Store(format!(
                "Card {} references unknown background {}",
                card.id, card.background
            )));
        }
        self.stack.cards.push(card);
        self.reindex();
        Ok(())
    }

    pub fn add_widget(&mut self, widget: Widget) -> Result<()> {
        if self.widget_pos.contains_key(&widget.id) {
            return Err(FindError::Store(format!(
                "Duplicate widget id {}",
                widget.id
            )));
        }
        let owner_exists = match widget.owner {
            Owner::Card(id) => self.card_pos.contains_key(&id),
            Owner::Background(id) => self.background_pos.contains_key(&id),
        };
        if !owner_exists {
            return Err(FindError::Store(format!(
                "Widget {} has no owner in this stack",
                widget.id
            )));
        }
        self.stack.widgets.push(widget);
        self.reindex();
        Ok(())
    }

    /// Removes a card and every widget it owns.
    pub fn delete_card(&mut self, id: CardId) -> Result<Card> {
        let pos = *self.card_pos.get(&id).ok_or(FindError::CardNotFound(id))?;
        let card = self.stack.cards.remove(pos);
        self.stack
            .widgets
            .retain(|w| w.owner != Owner::Card(id));
        self.reindex();
        Ok(card)
    }

    /// Sets what a field shows on a card.
    ///
    /// Card fields and shared background fields store the text on the widget.
    /// Other background fields store it on the card.
    pub fn set_field_text(
        &mut self,
        card: CardId,
        field: WidgetId,
        text: impl Into<String>,
    ) -> Result<()> {
        let card_pos = *self.card_pos.get(&card).ok_or(FindError::CardNotFound(card))?;
        let widget_pos = *self
            .widget_pos
            .get(&field)
            .ok_or(FindError::WidgetNotFound(field))?;
        let widget = &mut self.stack.widgets[widget_pos];
        if widget.kind != WidgetKind::Field {
            return Err(FindError::Store(format!("Widget {} is not a field", field)));
        }

        let card_ref = &mut self.stack.cards[card_pos];
        match widget.owner {
            Owner::Card(owner) if owner == card => widget.text = text.into(),
            Owner::Background(bg) if bg == card_ref.background => {
                if widget.shared_text {
                    widget.text = text.into();
                } else {
                    card_ref.background_text.insert(field, text.into());
                }
            }
            _ => {
                return Err(FindError::Store(format!(
                    "Field {} is not visible on card {}",
                    field, card
                )))
            }
        }
        Ok(())
    }

    // --- Id-allocating helpers ---

    pub fn new_background(&mut self, name: &str) -> BackgroundId {
        let id = BackgroundId(
            self.stack
                .backgrounds
                .iter()
                .map(|b| b.id.0)
                .max()
                .unwrap_or(0)
                + 1,
        );
        self.stack.backgrounds.push(Background::new(id, name));
        self.reindex();
        id
    }

    pub fn new_card(&mut self, background: BackgroundId, name: &str) -> CardId {
        let id = CardId(self.stack.cards.iter().map(|c| c.id.0).max().unwrap_or(0) + 1);
        self.stack
            .cards
            .push(Card::new(id, background).with_name(name));
        self.reindex();
        id
    }

    fn next_widget_id(&self) -> WidgetId {
        WidgetId(self.stack.widgets.iter().map(|w| w.id.0).max().unwrap_or(0) + 1)
    }

    /// Adds a field to a layer. On a background, `text` is only shown while the
    /// field is `shared_text`; per-card text goes through
    /// [`set_field_text`](Self::set_field_text).
    pub fn new_field(&mut self, owner: Owner, name: &str, text: &str) -> WidgetId {
        let id = self.next_widget_id();
        self.stack
            .widgets
            .push(Widget::field(id, owner, name).with_text(text));
        self.reindex();
        id
    }

    pub fn new_button(&mut self, owner: Owner, name: &str) -> WidgetId {
        let id = self.next_widget_id();
        self.stack.widgets.push(Widget::button(id, owner, name));
        self.reindex();
        id
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        let pos = *self.widget_pos.get(&id)?;
        self.stack.widgets.get_mut(pos)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        let pos = *self.card_pos.get(&id)?;
        self.stack.cards.get_mut(pos)
    }

    pub fn background_mut(&mut self, id: BackgroundId) -> Option<&mut Background> {
        let pos = *self.background_pos.get(&id)?;
        self.stack.backgrounds.get_mut(pos)
    }
}

impl StackDocument for MemoryStack {
    fn card_count(&self) -> usize {
        self.stack.cards.len()
    }

    fn card_at(&self, index: usize) -> Option<CardId> {
        self.stack.cards.get(index).map(|c| c.id)
    }

    fn card_index(&self, card: CardId) -> Option<usize> {
        self.card_pos.get(&card).copied()
    }

    fn card(&self, id: CardId) -> Option<&Card> {
        self.card_pos.get(&id).map(|&i| &self.stack.cards[i])
    }

    fn background(&self, id: BackgroundId) -> Option<&Background> {
        self.background_pos
            .get(&id)
            .map(|&i| &self.stack.backgrounds[i])
    }

    fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.widget_pos.get(&id).map(|&i| &self.stack.widgets[i])
    }

    fn widgets(&self, owner: Owner) -> Vec<WidgetId> {
        self.layers.get(&owner).cloned().unwrap_or_default()
    }
}
