//! Configuration for termline.
//!
//! This module provides TOML configuration loading from `~/.termline/config.toml`.
//!
//! # Configuration File
//!
//! ```toml
//! # Log filter used when RUST_LOG is not set
//! log_level = "info"
//!
//! [scanner]
//! # Characters per simulated output event when replaying a transcript
//! chunk_size = 64
//! # Report every completed line instead of the last one per chunk
//! report_all = false
//!
//! [history]
//! limit = 1000
//! strip_prompt = true
//! sensitive_patterns = ["password", "token"]
//! ```
//!
//! Every key is optional; missing keys take their default values.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum number of history entries
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// Default characters per chunk when replaying a transcript
pub const DEFAULT_CHUNK_SIZE: usize = 64;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log filter directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Scanner settings
    pub scanner: ScannerConfig,
    /// History settings
    pub history: HistoryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            scanner: ScannerConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

/// Scanner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub chunk_size: usize,
    pub report_all: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            report_all: false,
        }
    }
}

/// History configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub limit: usize,
    pub strip_prompt: bool,
    pub sensitive_patterns: Vec<String>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_HISTORY_LIMIT,
            strip_prompt: true,
            sensitive_patterns: [
                "password", "passwd", "secret", "token", "api_key", "apikey",
                "credential", "ssh-add", "gpg",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a file
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.scanner.chunk_size == 0 {
            return Err(ConfigError::Invalid("scanner.chunk_size must be at least 1".into()));
        }
        if self.history.limit == 0 {
            return Err(ConfigError::Invalid("history.limit must be at least 1".into()));
        }
        Ok(())
    }

    /// Get config file path
    pub fn config_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".termline").join("config.toml"))
    }
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
