//! Parser for YAML language files.
//!
//! Nested mappings are flattened into dot-joined keys, so
//! `Search: { title: "..." }` loads as `Search.title`. The reserved
//! top-level key `@extends` (alias `@parent_yaml`) names one or more parent
//! files and is stripped from the parsed mapping.

use std::path::Path;

use serde_yaml::Value;

use crate::domain::TextDomain;
use crate::error::{ResolveError, Result};
use crate::loader::LoadedFile;

/// Reserved keys naming parent files.
pub const EXTENDS_DIRECTIVE: &str = "@extends";
pub const PARENT_DIRECTIVE_ALIAS: &str = "@parent_yaml";

pub fn parse(content: &str, path: &Path) -> Result<LoadedFile> {
    let value: Value = serde_yaml::from_str(content)
        .map_err(|e| ResolveError::parse(path, e.to_string()))?;

    let mapping = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(LoadedFile {
            domain: TextDomain::new(),
            extends: Vec::new(),
        }),
        _ => {
            return Err(ResolveError::parse(
                path,
                "top level of a language file must be a mapping",
            ));
        }
    };

    let mut domain = TextDomain::new();
    let mut extends = Vec::new();

    for (key, value) in mapping {
        let key = match key {
            Value::String(s) => s,
            other => {
                return Err(ResolveError::parse(
                    path,
                    format!("non-string key: {:?}", other),
                ));
            }
        };
        if key == EXTENDS_DIRECTIVE || key == PARENT_DIRECTIVE_ALIAS {
            collect_extends(&value, &mut extends, path)?;
        } else {
            flatten(&value, key, &mut domain);
        }
    }

    Ok(LoadedFile { domain, extends })
}

/// The directive value is a single file name or a sequence of them.
fn collect_extends(value: &Value, extends: &mut Vec<String>, path: &Path) -> Result<()> {
    match value {
        Value::String(s) => extends.push(s.clone()),
        Value::Sequence(seq) => {
            for item in seq {
                match item {
                    Value::String(s) => extends.push(s.clone()),
                    _ => {
                        return Err(ResolveError::parse(
                            path,
                            "extends directive entries must be strings",
                        ));
                    }
                }
            }
        }
        _ => {
            return Err(ResolveError::parse(
                path,
                "extends directive must be a string or a list of strings",
            ));
        }
    }
    Ok(())
}

fn flatten(value: &Value, prefix: String, domain: &mut TextDomain) {
    match value {
        Value::Mapping(mapping) => {
            for (key, value) in mapping {
                if let Value::String(key) = key {
                    flatten(value, format!("{}.{}", prefix, key), domain);
                }
            }
        }
        Value::String(s) => domain.insert(prefix, s.clone()),
        // Unquoted scalars are common in hand-edited files; keep them.
        Value::Number(n) => domain.insert(prefix, n.to_string()),
        Value::Bool(b) => domain.insert(prefix, b.to_string()),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(content: &str) -> LoadedFile {
        parse(content, Path::new("en.yaml")).unwrap()
    }

    #[test]
    fn test_nested_mappings_flatten_to_dotted_keys() {
        let loaded = parse_ok(
            r#"
Search:
  title: "Search"
  Advanced:
    title: "Advanced Search"
greeting: "Hello"
"#,
        );
        assert_eq!(loaded.domain.get("Search.title"), Some("Search"));
        assert_eq!(
            loaded.domain.get("Search.Advanced.title"),
            Some("Advanced Search")
        );
        assert_eq!(loaded.domain.get("greeting"), Some("Hello"));
    }

    #[test]
    fn test_extends_scalar_and_sequence() {
        let loaded = parse_ok("\"@extends\": base.yaml\ntitle: \"Child\"\n");
        assert_eq!(loaded.extends, vec!["base.yaml"]);
        assert!(!loaded.domain.contains_key(EXTENDS_DIRECTIVE));

        let loaded = parse_ok(
            r#"
"@extends":
  - first.yaml
  - second.yaml
"#,
        );
        assert_eq!(loaded.extends, vec!["first.yaml", "second.yaml"]);
    }

    #[test]
    fn test_parent_yaml_alias() {
        let loaded = parse_ok("\"@parent_yaml\": base.yaml\n");
        assert_eq!(loaded.extends, vec!["base.yaml"]);
        assert!(!loaded.domain.contains_key(PARENT_DIRECTIVE_ALIAS));
    }

    #[test]
    fn test_scalar_values_stringified() {
        let loaded = parse_ok("count: 5\nenabled: true\n");
        assert_eq!(loaded.domain.get("count"), Some("5"));
        assert_eq!(loaded.domain.get("enabled"), Some("true"));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = parse("key: [unclosed\n", Path::new("en.yaml")).unwrap_err();
        assert!(matches!(err, ResolveError::Parse { .. }));
        assert!(err.to_string().contains("en.yaml"));
    }

    #[test]
    fn test_top_level_scalar_rejected() {
        let err = parse("just a string", Path::new("en.yaml")).unwrap_err();
        assert!(matches!(err, ResolveError::Parse { .. }));
    }

    #[test]
    fn test_empty_file_is_empty_domain() {
        let loaded = parse_ok("");
        assert!(loaded.domain.is_empty());
        assert!(loaded.extends.is_empty());
    }
}
