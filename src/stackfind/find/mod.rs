//! # Find
//!
//! An incremental search over the card ring of a [`StackDocument`].
//!
//! A search is configured once with [`FindEngine::begin_search`] and then driven
//! by calling [`FindEngine::step`] until it returns `false`. Each step does a
//! bounded amount of work, so a host can keep its interface responsive while
//! searching large stacks, or abandon the search by simply not stepping again.
//!
//! ```text
//! begin_search(anchor, params)
//!        │
//!        ▼
//!   step() ... step() ──▶ false ──▶ result()
//! ```
//!
//! Calling `begin_search` again with the same params continues after the last
//! match ("find again"). The search stops after one full traversal of the ring
//! that produced no new match.
//!
//! ## Modules
//!
//! - [`words`]: splits field text into words with byte offsets
//! - [`matcher`]: the per-word and phrase comparators
//! - [`policy`]: which cards and fields are searched
//! - `session` / `engine`: search state and the state machine
//!
//! [`StackDocument`]: crate::store::StackDocument

mod engine;
pub mod matcher;
pub mod policy;
mod session;
pub mod words;

pub use engine::FindEngine;
pub use session::{FindMode, FindParams, FindResult, FindStats, StateKind};
