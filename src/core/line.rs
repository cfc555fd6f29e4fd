//! Line buffer tracker
//!
//! Rebuilds the line the user is typing from echoed terminal output and
//! reports it once a line terminator arrives.

use std::fmt;

use super::scanner::{Scanner, Token};

/// The current, not yet submitted command line
///
/// Only characters that survived scanning are ever stored, so the buffer never
/// holds escape sequences or control codes. The caller owns it between chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of the in-progress line
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Feed one chunk of output and return the last line completed in it
    ///
    /// Lines completed earlier in the same chunk are not reported. Use
    /// [`LineBuffer::advance_all`] when every completion matters.
    pub fn advance(&mut self, chunk: &str) -> Option<String> {
        let mut last = None;
        self.scan(chunk, |line| last = Some(line));
        last
    }

    /// Feed one chunk of output and return every line completed in it, in order
    pub fn advance_all(&mut self, chunk: &str) -> Vec<String> {
        let mut lines = Vec::new();
        self.scan(chunk, |line| lines.push(line));
        lines
    }

    fn scan<F: FnMut(String)>(&mut self, chunk: &str, mut on_line: F) {
        for token in Scanner::new(chunk) {
            match token {
                Token::Text(ch) => self.text.push(ch),
                Token::Erase => {
                    self.text.pop();
                }
                Token::LineEnd => {
                    if let Some(line) = self.take_line() {
                        on_line(line);
                    }
                }
            }
        }
    }

    /// Reset the buffer, returning its trimmed contents unless blank
    fn take_line(&mut self) -> Option<String> {
        let trimmed = self.text.trim();
        let line = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self.text.clear();
        line
    }
}

impl From<String> for LineBuffer {
    /// Control characters in `text` are dropped
    fn from(mut text: String) -> Self {
        text.retain(|ch| ch as u32 >= 0x20 && ch != '\x7f');
        Self { text }
    }
}

impl From<&str> for LineBuffer {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

impl fmt::Display for LineBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Stateless form of [`LineBuffer::advance`]
///
/// Takes the buffer returned by the previous call (or `""` at first) and
/// returns the new buffer together with the last completed line, if any.
pub fn advance(chunk: &str, buffer: &str) -> (String, Option<String>) {
    let mut line = LineBuffer {
        text: buffer.to_string(),
    };
    let completed = line.advance(chunk);
    (line.into_string(), completed)
}
