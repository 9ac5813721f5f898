//! Error types for translation resolution.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Failures surfaced while resolving a text domain.
///
/// Parse and cycle errors are configuration mistakes and always fatal;
/// `NoTranslationFound` is a soft outcome that callers may map to an empty
/// domain.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A language file is absent or unreadable. Fatal when the file was
    /// positively declared via an extends directive; a missing
    /// locale-specific candidate never produces this error because the
    /// prober simply yields no match.
    #[error("language file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// A language file exists but could not be parsed.
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// A file was reached twice within one extends chain.
    #[error("circular extension chain: {}", display_path_chain(.chain))]
    CircularExtension { chain: Vec<PathBuf> },

    /// The configured fallback map revisited a locale.
    #[error("circular locale fallback chain: {}", .chain.join(" -> "))]
    CircularFallback { chain: Vec<String> },

    /// An alias target chain looped back on itself.
    #[error("circular alias chain: {}", .chain.join(" -> "))]
    CircularAlias { chain: Vec<String> },

    /// Every probed locale/directory combination yielded zero files.
    #[error("no translation files found for locale '{locale}' in text domain '{text_domain}'")]
    NoTranslationFound { locale: String, text_domain: String },
}

impl ResolveError {
    pub fn parse(path: &Path, message: impl Into<String>) -> Self {
        ResolveError::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

fn display_path_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_extension_names_every_link() {
        let err = ResolveError::CircularExtension {
            chain: vec![
                PathBuf::from("a.ini"),
                PathBuf::from("b.ini"),
                PathBuf::from("a.ini"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "circular extension chain: a.ini -> b.ini -> a.ini"
        );
    }

    #[test]
    fn test_no_translation_found_is_distinguishable() {
        let err = ResolveError::NoTranslationFound {
            locale: "sv".to_string(),
            text_domain: "default".to_string(),
        };
        assert!(matches!(err, ResolveError::NoTranslationFound { .. }));
        assert!(err.to_string().contains("sv"));
    }
}
