//! Command history for termline
//!
//! Keeps completed command lines in memory and provides search over them.
//! Nothing is written to disk.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::HistoryConfig;

/// Prompt endings recognised by [`strip_prompt`]
const PROMPT_ENDINGS: [&str; 6] = [
    ">",    // cmd.exe, PowerShell
    "$ ",   // bash/zsh user
    "# ",   // bash/zsh root
    ">>> ", // Python REPL
    "... ", // Python continuation
    "]: ",  // some custom prompts
];

/// Prompts are expected within this many bytes of the line start
const PROMPT_MAX_OFFSET: usize = 60;

/// A single history entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The command text
    pub command: String,
    /// Unix timestamp
    pub timestamp: u64,
}

/// Command history storage
#[derive(Debug, Clone)]
pub struct CommandHistory {
    /// All history entries (newest last)
    entries: VecDeque<HistoryEntry>,
    /// Maximum entries
    max_entries: usize,
    /// Lowercased patterns that keep a command out of history
    sensitive_patterns: Vec<String>,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::with_config(&HistoryConfig::default())
    }
}

impl CommandHistory {
    /// Create a history holding at most `limit` entries, with no sensitive patterns
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: limit.max(1),
            sensitive_patterns: Vec::new(),
        }
    }

    /// A limit of 0 is treated as 1, the same as [`CommandHistory::new`]
    pub fn with_config(config: &HistoryConfig) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: config.limit.max(1),
            sensitive_patterns: config
                .sensitive_patterns
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
        }
    }

    /// Add a command to history
    ///
    /// Returns `false` when the command was skipped.
    pub fn add(&mut self, command: &str) -> bool {
        // Skip empty or whitespace-only commands
        let trimmed = command.trim();
        if trimmed.is_empty() {
            return false;
        }

        // Skip if same as last command (dedup consecutive)
        if self.entries.back().is_some_and(|last| last.command == trimmed) {
            return false;
        }

        if self.is_sensitive(trimmed) {
            tracing::debug!("Skipping sensitive command");
            return false;
        }

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        self.entries.push_back(HistoryEntry {
            command: trimmed.to_string(),
            timestamp,
        });

        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
        true
    }

    fn is_sensitive(&self, command: &str) -> bool {
        let lower = command.to_lowercase();
        self.sensitive_patterns.iter().any(|p| lower.contains(p.as_str()))
    }

    /// Search history by query (newest first)
    pub fn search(&self, query: &str) -> Vec<&HistoryEntry> {
        let query_lower = query.to_lowercase();
        self.entries
            .iter()
            .rev()
            .filter(|e| e.command.to_lowercase().contains(&query_lower))
            .collect()
    }

    /// Get recent history (newest first)
    pub fn recent(&self, count: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(count).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Strip prompt from command line
///
/// Echoed lines usually start with the shell prompt (`user@host:~$ ls`). The
/// earliest prompt ending found near the start wins, so `>` or `$ ` inside the
/// command itself (`ls > out.txt`) is left alone. Only the text after the
/// prompt is kept, if there is any.
pub fn strip_prompt(line: &str) -> String {
    let line = line.trim();

    if let Some((pos, len)) = find_prompt_end(line) {
        if pos < PROMPT_MAX_OFFSET {
            let after = line[pos + len..].trim();
            if !after.is_empty() {
                return after.to_string();
            }
        }
    }

    // No prompt found, might be a continuation
    line.to_string()
}

/// Position and length of the earliest prompt ending, longest ending first on ties
fn find_prompt_end(line: &str) -> Option<(usize, usize)> {
    PROMPT_ENDINGS
        .iter()
        .flat_map(move |&ending| {
            line.match_indices(ending)
                .filter(move |(pos, _)| is_prompt_prefix(&line[..*pos], ending))
                .map(|(pos, ending)| (pos, ending.len()))
        })
        .min_by_key(|&(pos, len)| (pos, std::cmp::Reverse(len)))
}

/// Whether `prefix` can be the prompt text in front of `ending`
fn is_prompt_prefix(prefix: &str, ending: &str) -> bool {
    let Some(last) = prefix.chars().last() else {
        return true;
    };
    // A redirect or operator typed after a word: `echo hi > out`, `a >> b`
    if last.is_whitespace() || last == '>' {
        return false;
    }
    match ending {
        // cmd.exe and PowerShell prompts end in a drive path: `C:\dir>`, `PS C:\dir>`
        ">" => prefix.contains(":\\"),
        _ => true,
    }
}
