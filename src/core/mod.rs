//! Core input-stream interpretation.
//!
//! This module contains the pure, synchronous pieces of termline:
//!
//! - **scanner**: splits a chunk of terminal output into tokens, skipping CSI/OSC sequences
//! - **line**: line buffer tracker that turns tokens into a current line and completed commands
//! - **quote**: quoting of paths typed into the terminal on the user's behalf
//!
//! # Architecture
//!
//! ```text
//! chunk ──> Scanner ──> Token stream ──> LineBuffer ──> completed line
//!             └── skips ESC [ ... final / ESC ] ... BEL|ST / ESC x
//! ```
//!
//! Nothing here keeps state between calls except the `LineBuffer` owned by the caller.

pub mod line;
pub mod quote;
pub mod scanner;

pub use line::{advance, LineBuffer};
pub use quote::quote_for_terminal;
pub use scanner::{Scanner, Token};
