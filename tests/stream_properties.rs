//! Property-based tests for the stream scanner, line tracker and quoter.
//!
//! Every input is valid: the functions are total, so the properties check
//! what ends up in the buffer rather than error paths.

use proptest::prelude::*;
use termline::{advance, quote_for_terminal, LineBuffer};

/// Text that a shell could echo back, without any control codes.
fn plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ./_é日🦀-]{0,8}"
}

/// A complete CSI sequence: ESC [ params/intermediates final.
fn csi_sequence() -> impl Strategy<Value = String> {
    (prop::collection::vec(0x20u8..=0x3f, 0..6), 0x40u8..=0x7e).prop_map(|(body, last)| {
        let mut seq = String::from("\x1b[");
        seq.extend(body.into_iter().map(char::from));
        seq.push(char::from(last));
        seq
    })
}

fn has_control(text: &str) -> bool {
    text.chars().any(|c| (c as u32) < 0x20 || c == '\x7f')
}

proptest! {
    #[test]
    fn prop_backspaces_trim_saturating(buffer in plain_text(), n in 0usize..20) {
        let chunk = "\x7f".repeat(n);
        let (new_buffer, completed) = advance(&chunk, &buffer);

        let keep = buffer.chars().count().saturating_sub(n);
        let expected: String = buffer.chars().take(keep).collect();
        prop_assert_eq!(new_buffer, expected);
        prop_assert_eq!(completed, None);
    }

    #[test]
    fn prop_csi_never_reaches_buffer(
        parts in prop::collection::vec((plain_text(), csi_sequence()), 0..6),
        tail in plain_text(),
    ) {
        let mut chunk = String::new();
        let mut expected = String::new();
        for (text, seq) in &parts {
            chunk.push_str(text);
            chunk.push_str(seq);
            expected.push_str(text);
        }
        chunk.push_str(&tail);
        expected.push_str(&tail);

        let (new_buffer, completed) = advance(&chunk, "");
        prop_assert_eq!(new_buffer, expected);
        prop_assert_eq!(completed, None);
    }

    #[test]
    fn prop_truncated_sequence_is_dropped(
        prefix in plain_text(),
        body in prop::collection::vec(0x20u8..=0x3f, 0..6),
        bare in any::<bool>(),
    ) {
        let mut chunk = prefix.clone();
        chunk.push('\x1b');
        if !bare {
            chunk.push('[');
            chunk.extend(body.into_iter().map(char::from));
        }

        let (new_buffer, completed) = advance(&chunk, "");
        prop_assert_eq!(new_buffer, prefix);
        prop_assert_eq!(completed, None);
    }

    #[test]
    fn prop_buffer_never_holds_controls(chunk in any::<String>(), buffer in plain_text()) {
        let (new_buffer, completed) = advance(&chunk, &buffer);
        prop_assert!(!has_control(&new_buffer));
        if let Some(line) = completed {
            prop_assert!(!has_control(&line));
            prop_assert!(!line.trim().is_empty());
            prop_assert_eq!(line.trim(), line.as_str());
        }
    }

    #[test]
    fn prop_advance_reports_last_of_all(chunk in "[a-z \r\n\x7f\x1b\\[m]{0,40}") {
        let mut single = LineBuffer::new();
        let mut every = LineBuffer::new();

        let last = single.advance(&chunk);
        let all = every.advance_all(&chunk);

        prop_assert_eq!(last, all.last().cloned());
        prop_assert_eq!(single, every);
    }

    #[test]
    fn prop_quote_for_terminal(path in any::<String>()) {
        let quoted = quote_for_terminal(&path);
        if !path.chars().any(char::is_whitespace) {
            prop_assert_eq!(quoted.as_ref(), path.as_str());
        } else {
            prop_assert!(quoted.len() >= 2);
            prop_assert!(quoted.starts_with('"') && quoted.ends_with('"'));
            let inner = &quoted[1..quoted.len() - 1];
            let expected = path.replace('"', "\\\"");
            prop_assert_eq!(inner, expected.as_str());
        }
    }
}

#[test]
fn non_ascii_passes_through() {
    assert_eq!(advance("café 🦀 日本語", ""), ("café 🦀 日本語".to_string(), None));
}
