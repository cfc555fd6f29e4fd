//! termline - replays captured terminal output and prints the commands typed in it
//!
//! # Quick Start
//!
//! ```text
//! termline session.log          # Print commands found in a transcript
//! script -q -c bash out.log     # (capture one first)
//! termline -a < out.log         # Read stdin, report every line per chunk
//! termline -q "My Documents"    # Quote a path for typing into a shell
//! ```

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use tracing::{debug, info};

use termline::config::Config;
use termline::{quote_for_terminal, CommandHistory, Session};

/// Command line options
#[derive(Debug, Default)]
struct Options {
    /// Transcript to replay (stdin when absent)
    input: Option<PathBuf>,
    /// Configuration file override
    config: Option<PathBuf>,
    /// Log file (stderr when absent)
    log: Option<PathBuf>,
    /// Characters per chunk override
    chunk_size: Option<usize>,
    /// Report every completed line
    report_all: bool,
    /// Path to quote instead of replaying
    quote: Option<String>,
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    eprintln!("termline {} - Reconstruct typed commands from terminal output", VERSION);
    eprintln!();
    eprintln!("Usage: termline [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Reads FILE (or stdin) as captured terminal output and prints each");
    eprintln!("command line submitted in it.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -a, --all             Report every completed line, not only the last per chunk");
    eprintln!("  -n, --chunk <N>       Characters per simulated output event");
    eprintln!("  -q, --quote <PATH>    Print PATH quoted for terminal input and exit");
    eprintln!("  -c, --config <FILE>   Configuration file (default: ~/.termline/config.toml)");
    eprintln!("  -l, --log <FILE>      Write logs to FILE instead of stderr");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut options = Options::default();
    let mut i = 0;

    let value = |i: usize, name: &str| -> Result<String, String> {
        args.get(i)
            .cloned()
            .ok_or_else(|| format!("Missing argument for {}", name))
    };

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                eprintln!("termline {}", VERSION);
                std::process::exit(0);
            }
            "-a" | "--all" => options.report_all = true,
            "-n" | "--chunk" => {
                i += 1;
                let n = value(i, "--chunk")?;
                let n = n
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| format!("Invalid chunk size: {}", n))?;
                options.chunk_size = Some(n);
            }
            "-q" | "--quote" => {
                i += 1;
                options.quote = Some(value(i, "--quote")?);
            }
            "-c" | "--config" => {
                i += 1;
                options.config = Some(PathBuf::from(value(i, "--config")?));
            }
            "-l" | "--log" => {
                i += 1;
                options.log = Some(PathBuf::from(value(i, "--log")?));
            }
            arg if arg.starts_with('-') && arg != "-" => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
            arg => {
                if options.input.is_some() {
                    return Err(format!("Unexpected argument: {}", arg));
                }
                if arg != "-" {
                    options.input = Some(PathBuf::from(arg));
                }
            }
        }
        i += 1;
    }

    Ok(options)
}

/// Split text into chunks of at most `size` characters
fn chunks(text: &str, size: usize) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest
            .char_indices()
            .nth(size)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(end);
        rest = tail;
        Some(head)
    })
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    let bytes = match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read stdin")?;
            bytes
        }
    };
    // Captured output is not guaranteed to be valid UTF-8
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn replay(options: &Options, config: &Config) -> anyhow::Result<()> {
    let text = read_input(options.input.as_ref())?;
    let chunk_size = options.chunk_size.unwrap_or(config.scanner.chunk_size).max(1);
    let report_all = options.report_all || config.scanner.report_all;

    let mut session = Session::new(0).with_prompt_stripping(config.history.strip_prompt);
    let mut history = CommandHistory::with_config(&config.history);

    info!(chunk_size, report_all, "Replaying {} characters", text.chars().count());

    for chunk in chunks(&text, chunk_size) {
        let completed = if report_all {
            session.feed_all(chunk)
        } else {
            session.feed(chunk).into_iter().collect()
        };
        for command in completed {
            if history.add(&command) {
                println!("{}", command);
            } else {
                debug!(command = %command, "Not recorded");
            }
        }
    }

    if !session.pending().is_empty() {
        debug!(pending = session.pending(), "Input ended mid-line");
    }
    info!("{} commands recorded", history.len());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let options = match parse_args() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    if let Some(path) = &options.quote {
        println!("{}", quote_for_terminal(path));
        return Ok(());
    }

    let config = match &options.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    termline::logging::init(&config.log_level, options.log.as_deref())
        .context("Failed to initialize logging")?;

    replay(&options, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_respect_char_boundaries() {
        let parts: Vec<&str> = chunks("aé🦀bc", 2).collect();
        assert_eq!(parts, vec!["aé", "🦀b", "c"]);
        assert_eq!(chunks("", 4).count(), 0);
        assert_eq!(chunks("abc", 10).collect::<Vec<_>>(), vec!["abc"]);
    }
}
