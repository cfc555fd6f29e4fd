//! Stream scanner
//!
//! Walks a chunk of terminal output one character at a time and yields the
//! tokens that matter for line tracking. Escape sequences are skipped, not
//! interpreted.

const ESC: char = '\x1b';
const BEL: char = '\x07';
const DEL: char = '\x7f';

/// Token produced by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Printable character (anything at or above 0x20 except DEL)
    Text(char),
    /// DEL (0x7F), erases the previous character
    Erase,
    /// CR or LF
    LineEnd,
}

/// What the scanner found at the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Escape,
    LineEnd,
    Erase,
    Printable,
    Control,
}

impl Class {
    fn of(ch: char) -> Self {
        match ch {
            ESC => Class::Escape,
            '\r' | '\n' => Class::LineEnd,
            DEL => Class::Erase,
            c if c as u32 >= 0x20 => Class::Printable,
            _ => Class::Control,
        }
    }
}

/// Single-pass scanner over one input chunk
///
/// The cursor only ever moves forward. A sequence that is cut off by the end
/// of the chunk is swallowed up to the end.
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    pub fn new(chunk: &str) -> Self {
        Self {
            chars: chunk.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    /// Skip the remainder of a sequence whose ESC has already been consumed
    fn skip_escape(&mut self) {
        match self.bump() {
            // Bare ESC at end of chunk
            None => {}
            Some('[') => self.skip_csi(),
            Some(']') => self.skip_osc(),
            // Alt-modified key or single-character escape
            Some(_) => {}
        }
    }

    /// CSI: parameter and intermediate bytes up to a final byte in 0x40..=0x7E
    fn skip_csi(&mut self) {
        while let Some(ch) = self.bump() {
            if ('\x40'..='\x7e').contains(&ch) {
                return;
            }
        }
        tracing::trace!("CSI sequence truncated at end of chunk");
    }

    /// OSC: payload up to BEL or ST (ESC \)
    fn skip_osc(&mut self) {
        while let Some(ch) = self.bump() {
            match ch {
                BEL => return,
                ESC if self.peek() == Some('\\') => {
                    self.pos += 1;
                    return;
                }
                _ => {}
            }
        }
        tracing::trace!("OSC sequence truncated at end of chunk");
    }
}

impl Iterator for Scanner {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let ch = self.bump()?;
            match Class::of(ch) {
                Class::Escape => self.skip_escape(),
                Class::LineEnd => return Some(Token::LineEnd),
                Class::Erase => return Some(Token::Erase),
                Class::Printable => return Some(Token::Text(ch)),
                Class::Control => {}
            }
        }
    }
}
