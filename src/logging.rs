//! Logging setup
//!
//! Logs go to stderr by default, or to a file (appended, no ANSI colors).
//! `RUST_LOG` takes precedence over the configured level.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber
///
/// Calling this twice leaves the first subscriber in place.
pub fn init(default_level: &str, log_file: Option<&Path>) -> io::Result<()> {
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter(default_level))
        .with_target(false);

    let result = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let subscriber = builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        None => {
            let subscriber = builder.with_writer(io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)
        }
    };

    if result.is_err() {
        tracing::debug!("Global subscriber already installed");
    }
    Ok(())
}
