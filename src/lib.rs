//! termline - reconstructs typed command lines from echoed terminal output
//!
//! A terminal or SSH client sees what the user types only as the remote shell
//! echoes it back, mixed with cursor movement, colors, window titles and line
//! editing. termline scans that output and keeps the line being typed, so the
//! client can tell when a command was submitted and what it was.
//!
//! # Example
//!
//! ```
//! use termline::LineBuffer;
//!
//! let mut line = LineBuffer::new();
//! assert_eq!(line.advance("\x1b[32mgit stt\x7fatus"), None);
//! assert_eq!(line.advance("\r\n").as_deref(), Some("git status"));
//! assert_eq!(termline::quote_for_terminal("My Files"), "\"My Files\"");
//! ```
//!
//! # Modules
//!
//! - **core**: scanner, line buffer tracker and argument quoting (pure functions)
//! - **session**: per-session line buffers
//! - **history**: in-memory command history
//! - **config**: TOML configuration
//! - **logging**: tracing subscriber setup

pub mod config;
pub mod core;
pub mod history;
pub mod logging;
pub mod session;

pub use crate::core::{advance, quote_for_terminal, LineBuffer, Scanner, Token};
pub use crate::history::{strip_prompt, CommandHistory, HistoryEntry};
pub use crate::session::{Session, SessionError, SessionId, SessionRegistry};
