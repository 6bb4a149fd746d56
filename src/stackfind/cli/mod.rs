//! # CLI Layer
//!
//! One client of the stackfind library, and the only place that knows about
//! terminal I/O.
//!
//! ```text
//! stackfind find <STACK> <TEXT>... [--mode M] [--from CARD] [--field FIELD] [--marked] [--all]
//! stackfind info <STACK>
//! stackfind config [KEY] [VALUE]
//! ```
//!
//! `find` loads the stack, runs one search under the configured step budget and
//! prints each match as a card label, a chunk expression (`char 4 to 8 of card
//! field "Body"`), the line it starts on and a context line with the match
//! highlighted. A
//! search that runs out of budget is reported as paused, not as "no match".
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Per-command handlers that call the API and print results
//! - `render`: Snippets, colors and message output
//! - `logging`: The tracing subscriber (`STACKFIND_LOG`, `-v`)

mod commands;
mod logging;
mod render;
pub mod setup;

pub use commands::run;
