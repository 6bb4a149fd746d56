use crate::model::{CardId, WidgetId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FindError {
    #[error("Card not found: {0}")]
    CardNotFound(CardId),

    #[error("Widget not found: {0}")]
    WidgetNotFound(WidgetId),

    #[error("No card matches reference: {0}")]
    NoSuchCard(String),

    #[error("No field matches reference: {0}")]
    NoSuchField(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, FindError>;
