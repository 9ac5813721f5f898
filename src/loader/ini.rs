//! Parser for the extended ini dialect used by language files.
//!
//! The dialect is a flat list of `key = "value"` pairs with `;` comments.
//! Two details set it apart from stock ini:
//!
//! - A quoted empty value (`key = ""`) marks a deliberately blank
//!   translation and is loaded as the non-joining blank marker when blank
//!   conversion is on, so it stays distinguishable from a missing key.
//! - The reserved key `@parent_ini` declares a parent file to merge
//!   underneath this one and never appears in the parsed mapping.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{NON_JOINING_BLANK, TextDomain};
use crate::error::{ResolveError, Result};
use crate::loader::{LoadOptions, LoadedFile};

/// Reserved key naming a parent file.
pub const PARENT_DIRECTIVE: &str = "@parent_ini";

static PAIR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^=]+?)\s*=\s*(.*)$").unwrap());

pub fn parse(content: &str, path: &Path, options: LoadOptions) -> Result<LoadedFile> {
    let mut domain = TextDomain::new();
    let mut extends = Vec::new();

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        let captures = PAIR_REGEX.captures(line).ok_or_else(|| {
            ResolveError::parse(
                path,
                format!("line {}: expected 'key = \"value\"'", index + 1),
            )
        })?;
        let key = captures[1].trim();
        let value = unquote(captures[2].trim(), options.convert_blanks);

        if key == PARENT_DIRECTIVE {
            extends.push(value);
        } else {
            domain.insert(key, value);
        }
    }

    Ok(LoadedFile { domain, extends })
}

/// Strip one surrounding quote pair; map a quoted empty value to the blank
/// marker when conversion is enabled.
fn unquote(value: &str, convert_blanks: bool) -> String {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    if inner.is_empty() && value == "\"\"" && convert_blanks {
        NON_JOINING_BLANK.to_string()
    } else {
        inner.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(content: &str) -> LoadedFile {
        parse(content, Path::new("en.ini"), LoadOptions::default()).unwrap()
    }

    #[test]
    fn test_basic_pairs() {
        let loaded = parse_ok(
            r#"
; site-wide strings
title = "Catalog"
greeting = "Hello"
unquoted = plain value
"#,
        );
        assert_eq!(loaded.domain.get("title"), Some("Catalog"));
        assert_eq!(loaded.domain.get("greeting"), Some("Hello"));
        assert_eq!(loaded.domain.get("unquoted"), Some("plain value"));
        assert!(loaded.extends.is_empty());
    }

    #[test]
    fn test_value_may_contain_equals() {
        let loaded = parse_ok(r#"formula = "a = b""#);
        assert_eq!(loaded.domain.get("formula"), Some("a = b"));
    }

    #[test]
    fn test_blank_sentinel_converted() {
        let loaded = parse_ok(r#"blank = """#);
        assert_eq!(loaded.domain.get("blank"), Some(NON_JOINING_BLANK));
    }

    #[test]
    fn test_blank_sentinel_raw_when_disabled() {
        let loaded = parse(
            r#"blank = """#,
            Path::new("en.ini"),
            LoadOptions {
                convert_blanks: false,
            },
        )
        .unwrap();
        assert_eq!(loaded.domain.get("blank"), Some(""));
        assert_eq!(loaded.domain.get("missing"), None);
    }

    #[test]
    fn test_parent_directive_extracted_and_stripped() {
        let loaded = parse_ok(
            r#"
@parent_ini = "base.ini"
title = "Child"
"#,
        );
        assert_eq!(loaded.extends, vec!["base.ini"]);
        assert!(!loaded.domain.contains_key(PARENT_DIRECTIVE));
        assert_eq!(loaded.domain.get("title"), Some("Child"));
    }

    #[test]
    fn test_line_without_separator_is_parse_error() {
        let err = parse(
            "title = \"ok\"\njust some words\n",
            Path::new("en.ini"),
            LoadOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ResolveError::Parse { .. }));
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("en.ini"));
    }

    #[test]
    fn test_duplicate_key_last_one_wins_within_file() {
        let loaded = parse_ok("k = \"one\"\nk = \"two\"\n");
        assert_eq!(loaded.domain.get("k"), Some("two"));
    }
}
