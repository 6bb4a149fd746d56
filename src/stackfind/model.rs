//! Stack document types.
//!
//! A [`Stack`] is the serializable form of a card document: backgrounds, cards in
//! ring order, and the widgets (buttons and fields) owned by either. Background
//! fields hold a separate text per card unless they are marked `shared_text`, in
//! which case every card sees the widget's own `text`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

macro_rules! id_type {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(CardId);
id_type!(BackgroundId);
id_type!(WidgetId);

/// The layer a widget lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    Card(CardId),
    Background(BackgroundId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Button,
    Field,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    pub owner: Owner,
    pub kind: WidgetKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dont_search: bool,
    /// Background fields only: every card shows `text` instead of its own copy.
    #[serde(default)]
    pub shared_text: bool,
    /// Content of card fields and shared background fields.
    #[serde(default)]
    pub text: String,
}

impl Widget {
    pub fn field(id: WidgetId, owner: Owner, name: impl Into<String>) -> Self {
        Self {
            id,
            owner,
            kind: WidgetKind::Field,
            name: name.into(),
            dont_search: false,
            shared_text: false,
            text: String::new(),
        }
    }

    pub fn button(id: WidgetId, owner: Owner, name: impl Into<String>) -> Self {
        Self {
            kind: WidgetKind::Button,
            ..Self::field(id, owner, name)
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_dont_search(mut self, dont_search: bool) -> Self {
        self.dont_search = dont_search;
        self
    }

    pub fn with_shared_text(mut self, shared_text: bool) -> Self {
        self.shared_text = shared_text;
        self
    }

    pub fn is_field(&self) -> bool {
        self.kind == WidgetKind::Field
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    pub id: BackgroundId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dont_search: bool,
}

impl Background {
    pub fn new(id: BackgroundId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            dont_search: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub background: BackgroundId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dont_search: bool,
    #[serde(default)]
    pub marked: bool,
    /// This card's text for each non-shared background field.
    #[serde(default)]
    pub background_text: BTreeMap<WidgetId, String>,
}

impl Card {
    pub fn new(id: CardId, background: BackgroundId) -> Self {
        Self {
            id,
            background,
            name: String::new(),
            dont_search: false,
            marked: false,
            background_text: BTreeMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_dont_search(mut self, dont_search: bool) -> Self {
        self.dont_search = dont_search;
        self
    }
}

/// The serialized form of a whole document. `cards` is the ring order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub backgrounds: Vec<Background>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&CardId(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn owner_uses_tagged_snake_case() {
        let json = serde_json::to_string(&Owner::Background(BackgroundId(2))).unwrap();
        assert_eq!(json, r#"{"background":2}"#);
    }

    #[test]
    fn card_background_text_roundtrips_with_numeric_keys() {
        let mut card = Card::new(CardId(1), BackgroundId(1));
        card.background_text.insert(WidgetId(10), "hello".into());

        let json = serde_json::to_string(&card).unwrap();
        let parsed: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.background_text.get(&WidgetId(10)).unwrap(), "hello");
    }

    #[test]
    fn minimal_stack_json_fills_defaults() {
        let json = r#"{
            "cards": [{ "id": 1, "background": 1 }],
            "widgets": [{ "id": 5, "owner": { "card": 1 }, "kind": "field", "text": "hi" }]
        }"#;
        let stack: Stack = serde_json::from_str(json).unwrap();
        assert_eq!(stack.cards.len(), 1);
        assert!(!stack.cards[0].dont_search);
        assert_eq!(stack.widgets[0].text, "hi");
        assert!(stack.widgets[0].is_field());
    }

    #[test]
    fn button_builder_keeps_name() {
        let b = Widget::button(WidgetId(3), Owner::Card(CardId(1)), "Next");
        assert_eq!(b.kind, WidgetKind::Button);
        assert_eq!(b.name, "Next");
    }
}
