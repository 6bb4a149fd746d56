//! # Stackfind Architecture
//!
//! Stackfind is an **incremental, resumable text search** over card stacks: documents
//! made of a ring of cards, each card sitting on a background, with text fields
//! on both layers. A search runs one bounded step at a time, so a host can keep its
//! interface responsive across stacks of any size, stop whenever it likes, and pick
//! up after the last match with "find again".
//!
//! The crate is a library first. The `stackfind` binary is one thin client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - Installs the tracing subscriber                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Interactive begin/step/result surface                    │
//! │  - Resolves card and field references                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Budgeted step loops, find-all, stack summaries, config   │
//! │  - Returns `CmdResult`, never prints                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Find Engine (find/)                                        │
//! │  - State machine, match strategies, searchability policy    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StackDocument trait                                      │
//! │  - MemoryStack, StackFile (JSON / gzip JSON)                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns regular Rust
//! types, and never writes to stdout/stderr. Diagnostics go through `tracing`
//! events; the library never installs a subscriber.
//!
//! ## Offsets
//!
//! Field text is UTF-8. The engine moves through it with byte cursors, but every
//! offset and length it reports in a [`find::FindResult`] counts characters.
//!
//! ## Testing Strategy
//!
//! 1. **Find engine** (`find/`): unit tests for every state and strategy.
//! 2. **Commands** (`commands/*.rs`): the budgeted loops and summaries, against
//!    `MemoryStack`.
//! 3. **API** (`api.rs`): reference resolution and dispatch.
//! 4. **CLI**: end-to-end tests in `tests/` running the binary on stack files.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Command logic behind the facade
//! - [`find`]: The resumable search engine
//! - [`store`]: Document trait and implementations
//! - [`model`]: Stack data types (`Card`, `Background`, `Widget`, `Stack`)
//! - [`text`]: Word boundaries, case folding, byte/char conversion
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod find;
pub mod model;
pub mod store;
pub mod text;
