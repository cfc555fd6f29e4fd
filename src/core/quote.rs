//! Quoting for text typed into the terminal on the user's behalf

use std::borrow::Cow;

/// Quote a path so the shell sees it as a single argument
///
/// Paths without whitespace are returned as-is. Anything else is wrapped in
/// double quotes with inner double quotes backslash-escaped.
pub fn quote_for_terminal(path: &str) -> Cow<'_, str> {
    if !path.chars().any(char::is_whitespace) {
        return Cow::Borrowed(path);
    }

    let mut quoted = String::with_capacity(path.len() + 2);
    quoted.push('"');
    for ch in path.chars() {
        if ch == '"' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_unchanged() {
        assert_eq!(quote_for_terminal("/var/log/syslog"), "/var/log/syslog");
        assert!(matches!(quote_for_terminal("a\"b"), Cow::Borrowed("a\"b")));
        assert_eq!(quote_for_terminal(""), "");
    }

    #[test]
    fn test_whitespace_path_quoted() {
        assert_eq!(quote_for_terminal("/home/me/My Files"), "\"/home/me/My Files\"");
        assert_eq!(quote_for_terminal("a\tb"), "\"a\tb\"");
    }

    #[test]
    fn test_inner_quotes_escaped() {
        assert_eq!(quote_for_terminal("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_only_quotes_escaped() {
        assert_eq!(quote_for_terminal("C:\\Program Files\\$x"), "\"C:\\Program Files\\$x\"");
    }
}
