//! Minimal INI parser.
//!
//! The accepted format follows the informal INI convention:
//!
//! ```ini
//! ; global keys come before any header
//! name = demo
//!
//! [server]
//! # comments start with ';' or '#'
//! port = 8080
//! ```
//!
//! Every line is trimmed first. Blank lines and comments are skipped,
//! `[name]` opens a section and `key = value` is split on the first `=`.
//! Values are kept verbatim after trimming: no quoting, no inline comments.
//! A repeated key keeps its last value. Any other line aborts the parse.

use crate::error::{ConfigError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::trace;

/// Name of the implicit section holding keys that precede any header.
pub const GLOBAL_SECTION: &str = "";

/// Parsed file data: section name to key to raw value.
pub type Sections = HashMap<String, HashMap<String, String>>;

/// Parse INI text.
///
/// # Errors
///
/// Returns [`ConfigError::Syntax`] for the first line that is neither a
/// comment, a section header nor a key=value pair.
///
/// # Examples
///
/// ```rust
/// use cfgp::sources::ini;
///
/// let sections = ini::parse_str("debug = true\n[server]\nport=8080\n").unwrap();
/// assert_eq!(sections[""]["debug"], "true");
/// assert_eq!(sections["server"]["port"], "8080");
/// ```
pub fn parse_str(input: &str) -> Result<Sections> {
    let mut sections = Sections::new();
    let mut current = GLOBAL_SECTION.to_string();

    for (number, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        let syntax_error = || ConfigError::Syntax {
            line: number + 1,
            content: line.to_string(),
        };

        if let Some(header) = line.strip_prefix('[') {
            let name = header.strip_suffix(']').ok_or_else(syntax_error)?.trim();
            if name.is_empty() {
                return Err(syntax_error());
            }
            trace!(section = name, line = number + 1, "opening section");
            current = name.to_string();
            sections.entry(current.clone()).or_default();
            continue;
        }

        let (key, value) = line.split_once('=').ok_or_else(syntax_error)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(syntax_error());
        }
        sections
            .entry(current.clone())
            .or_default()
            .insert(key.to_string(), value.trim().to_string());
    }

    Ok(sections)
}

/// Read and parse an INI file.
///
/// The file handle is closed before parsing starts.
///
/// # Errors
///
/// Returns [`ConfigError::IoError`] if the file cannot be read, or
/// [`ConfigError::Syntax`] as described in [`parse_str`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<Sections> {
    let contents = fs::read_to_string(path)?;
    parse_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_and_global_keys() {
        let sections = parse_str(
            r#"
name = demo

[server]
port=8080
host = localhost

[database]
url = postgres://localhost/db
"#,
        )
        .unwrap();

        assert_eq!(sections[GLOBAL_SECTION]["name"], "demo");
        assert_eq!(sections["server"]["port"], "8080");
        assert_eq!(sections["server"]["host"], "localhost");
        assert_eq!(sections["database"]["url"], "postgres://localhost/db");
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let sections = parse_str("; comment\n# another\n\n   \n[s]\n  ; indented\nk=v\n").unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections["s"].len(), 1);
    }

    #[test]
    fn test_value_keeps_inner_equals_and_spaces() {
        let sections = parse_str("dsn = user=admin password = x \n").unwrap();
        assert_eq!(sections[GLOBAL_SECTION]["dsn"], "user=admin password = x");
    }

    #[test]
    fn test_empty_value() {
        let sections = parse_str("[s]\nkey =\n").unwrap();
        assert_eq!(sections["s"]["key"], "");
    }

    #[test]
    fn test_last_duplicate_wins() {
        let sections = parse_str("[s]\nk=1\n[t]\n[s]\nk=2\n").unwrap();
        assert_eq!(sections["s"]["k"], "2");
        assert!(sections["t"].is_empty());
    }

    #[test]
    fn test_header_whitespace_is_trimmed() {
        let sections = parse_str("[ server ]\nport=1\n").unwrap();
        assert_eq!(sections["server"]["port"], "1");
    }

    #[test]
    fn test_invalid_line_reports_line_number() {
        let err = parse_str("[s]\nk=v\njust words\n").unwrap_err();
        match err {
            ConfigError::Syntax { line, content } => {
                assert_eq!(line, 3);
                assert_eq!(content, "just words");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_headers() {
        assert!(matches!(
            parse_str("[server\n"),
            Err(ConfigError::Syntax { line: 1, .. })
        ));
        assert!(matches!(
            parse_str("[]\n"),
            Err(ConfigError::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            parse_str("ok=1\n = value\n"),
            Err(ConfigError::Syntax { line: 2, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_file("/nonexistent/cfgp/config.ini").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
