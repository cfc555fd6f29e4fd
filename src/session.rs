//! Session management
//!
//! Tracks the current line of each terminal session. The line buffer of a
//! session must only be advanced by one chunk at a time, in arrival order.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use crate::core::LineBuffer;
use crate::history::strip_prompt;

/// Session identifier
pub type SessionId = u64;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown session: {0}")]
    UnknownSession(SessionId),

    #[error("Session already open: {0}")]
    AlreadyOpen(SessionId),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// A single terminal session's line state
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID
    pub id: SessionId,
    /// In-progress line
    line: LineBuffer,
    /// Remove shell prompts from completed lines
    strip_prompt: bool,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            line: LineBuffer::new(),
            strip_prompt: false,
        }
    }

    /// Remove a leading shell prompt from completed lines
    pub fn with_prompt_stripping(mut self, enabled: bool) -> Self {
        self.strip_prompt = enabled;
        self
    }

    /// Feed an output chunk, returning the last command completed in it
    pub fn feed(&mut self, chunk: &str) -> Option<String> {
        let line = self.line.advance(chunk)?;
        self.finish(line)
    }

    /// Feed an output chunk, returning every command completed in it
    pub fn feed_all(&mut self, chunk: &str) -> Vec<String> {
        self.line
            .advance_all(chunk)
            .into_iter()
            .filter_map(|line| self.finish(line))
            .collect()
    }

    fn finish(&self, line: String) -> Option<String> {
        let command = if self.strip_prompt {
            strip_prompt(&line)
        } else {
            line
        };
        if command.is_empty() {
            return None;
        }
        tracing::debug!(session = self.id, command = %command, "Command completed");
        Some(command)
    }

    /// What has been typed on the current line so far
    pub fn pending(&self) -> &str {
        self.line.as_str()
    }
}

/// Sessions fed from several producers
///
/// Each feed holds the registry lock for the duration of one chunk, so two
/// chunks for the same session never interleave.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionId, Session>>,
    /// Applied to every session opened afterwards
    strip_prompt: bool,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a leading shell prompt from lines completed in opened sessions
    pub fn with_prompt_stripping(mut self, enabled: bool) -> Self {
        self.strip_prompt = enabled;
        self
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Session>> {
        // advance never panics mid-update, so a poisoned map is still consistent
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start tracking a session
    pub fn open(&self, id: SessionId) -> Result<()> {
        let mut sessions = self.lock();
        if sessions.contains_key(&id) {
            return Err(SessionError::AlreadyOpen(id));
        }
        sessions.insert(id, Session::new(id).with_prompt_stripping(self.strip_prompt));
        tracing::debug!(session = id, "Session opened");
        Ok(())
    }

    /// Stop tracking a session, discarding its pending line
    pub fn close(&self, id: SessionId) -> bool {
        let removed = self.lock().remove(&id).is_some();
        if removed {
            tracing::debug!(session = id, "Session closed");
        }
        removed
    }

    /// Feed an output chunk to a session
    pub fn feed(&self, id: SessionId, chunk: &str) -> Result<Option<String>> {
        let mut sessions = self.lock();
        let session = sessions
            .get_mut(&id)
            .ok_or(SessionError::UnknownSession(id))?;
        Ok(session.feed(chunk))
    }

    /// Current in-progress line of a session
    pub fn pending(&self, id: SessionId) -> Option<String> {
        self.lock().get(&id).map(|session| session.pending().to_string())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
