//! Resolver configuration.

use std::collections::HashMap;

use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};
use crate::locale::{self, WILDCARD_LOCALE};
use crate::probe::{DEFAULT_TEXT_DOMAIN, SearchPath};

/// Configuration handed in by the hosting application.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Directories to search for language files, in precedence order.
    #[serde(default)]
    pub search_paths: Vec<SearchPath>,
    /// Explicit locale -> next-locale overrides; the `*` entry applies to
    /// any locale not listed.
    #[serde(default)]
    pub fallback_map: HashMap<String, String>,
    #[serde(default = "default_enable_fallback")]
    pub enable_fallback: bool,
    /// Convert quoted-empty ini values into the non-joining blank marker.
    #[serde(default = "default_convert_blanks")]
    pub convert_blanks: bool,
    #[serde(default = "default_use_aliases")]
    pub use_aliases: bool,
    #[serde(default = "default_text_domain_name")]
    pub default_text_domain: String,
}

fn default_enable_fallback() -> bool {
    true
}

fn default_convert_blanks() -> bool {
    true
}

fn default_use_aliases() -> bool {
    true
}

fn default_text_domain_name() -> String {
    DEFAULT_TEXT_DOMAIN.to_string()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            search_paths: Vec::new(),
            fallback_map: HashMap::new(),
            enable_fallback: default_enable_fallback(),
            convert_blanks: default_convert_blanks(),
            use_aliases: default_use_aliases(),
            default_text_domain: default_text_domain_name(),
        }
    }
}

impl ResolverConfig {
    /// Validate configuration values.
    ///
    /// Checks that every search path extension parses as a glob pattern and
    /// that fallback map entries are well-formed locale codes.
    pub fn validate(&self) -> Result<()> {
        for search_path in &self.search_paths {
            Pattern::new(&search_path.extension).map_err(|e| ResolveError::Parse {
                path: search_path.dir.clone(),
                message: format!(
                    "invalid extension glob \"{}\": {}",
                    search_path.extension, e
                ),
            })?;
        }
        for (from, to) in &self.fallback_map {
            if from != WILDCARD_LOCALE && !locale::is_well_formed(from) {
                return Err(config_error(format!(
                    "invalid locale \"{from}\" in fallback map"
                )));
            }
            if !locale::is_well_formed(to) {
                return Err(config_error(format!(
                    "invalid fallback locale \"{to}\" in fallback map"
                )));
            }
        }
        if self.default_text_domain.is_empty() {
            return Err(config_error("default text domain name must not be empty"));
        }
        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> ResolveError {
    ResolveError::Parse {
        path: "<config>".into(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert!(config.search_paths.is_empty());
        assert!(config.enable_fallback);
        assert!(config.convert_blanks);
        assert!(config.use_aliases);
        assert_eq!(config.default_text_domain, "default");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let yaml = r#"
searchPaths:
  - dir: /languages
"#;
        let config: ResolverConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.search_paths.len(), 1);
        assert_eq!(config.search_paths[0].extension, "ini");
        assert!(config.enable_fallback);
    }

    #[test]
    fn test_invalid_extension_glob_rejected() {
        let config = ResolverConfig {
            search_paths: vec![SearchPath::new("/languages", "[invalid")],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("[invalid"));
    }

    #[test]
    fn test_invalid_fallback_locale_rejected() {
        let config = ResolverConfig {
            fallback_map: [("en--".to_string(), "en".to_string())]
                .into_iter()
                .collect(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wildcard_fallback_key_accepted() {
        let config = ResolverConfig {
            fallback_map: [("*".to_string(), "en".to_string())].into_iter().collect(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
