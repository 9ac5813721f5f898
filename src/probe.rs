//! Candidate file discovery across ordered search paths.
//!
//! Each search path is a directory plus a file-extension glob. Language
//! files for the default text domain live directly in the directory; a
//! named domain keeps its files in a subdirectory of the same name. The
//! prober only looks for one exact locale; locale fallback is composed on
//! top by the orchestrator, which re-probes per candidate locale.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

/// Name of the default text domain.
pub const DEFAULT_TEXT_DOMAIN: &str = "default";

/// One directory to search for language files.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPath {
    pub dir: PathBuf,
    /// Glob matched against the file extension, e.g. `ini` or `y*ml`.
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    "ini".to_string()
}

impl SearchPath {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    /// Directory holding the given text domain's files.
    fn domain_dir(&self, text_domain: &str, default_domain: &str) -> PathBuf {
        if text_domain == default_domain {
            self.dir.clone()
        } else {
            self.dir.join(text_domain)
        }
    }
}

/// Lazy sequence of candidate files for one exact locale, preserving search
/// path declaration order.
pub fn probe<'a>(
    locale: &str,
    text_domain: &'a str,
    search_paths: &'a [SearchPath],
    default_domain: &'a str,
) -> impl Iterator<Item = PathBuf> + use<'a> {
    // The locale is data, not a pattern; escape it so `en[x]` style names
    // cannot change the glob's meaning.
    let locale = glob::Pattern::escape(locale);
    search_paths.iter().flat_map(move |search_path| {
        let base = search_path.domain_dir(text_domain, default_domain);
        let pattern = format!(
            "{}/{}.{}",
            base.display(),
            locale,
            search_path.extension
        );
        glob::glob(&pattern)
            .into_iter()
            .flatten()
            .filter_map(|entry| entry.ok())
    })
}

/// Locales with at least one language file for the given text domain,
/// sorted and deduplicated. Used by tooling around the resolver.
pub fn available_locales(
    search_paths: &[SearchPath],
    text_domain: &str,
    default_domain: &str,
) -> Vec<String> {
    let mut locales = BTreeSet::new();
    for search_path in search_paths {
        let Some(pattern) = extension_pattern(&search_path.extension) else {
            continue;
        };
        let base = search_path.domain_dir(text_domain, default_domain);
        for entry in WalkDir::new(&base)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            // Alias definition files sit next to the language files but do
            // not name a locale.
            if entry.file_name() == crate::alias::ALIAS_FILE_NAME {
                continue;
            }
            let path = entry.path();
            if extension_matches(path, &pattern)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                locales.insert(stem.to_string());
            }
        }
    }
    locales.into_iter().collect()
}

/// Named text domains present under the search paths (their subdirectories),
/// sorted and deduplicated. The default domain is implicit and not listed.
pub fn available_domains(search_paths: &[SearchPath]) -> Vec<String> {
    let mut domains = BTreeSet::new();
    for search_path in search_paths {
        for entry in WalkDir::new(&search_path.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.file_type().is_dir()
                && let Some(name) = entry.file_name().to_str()
            {
                domains.insert(name.to_string());
            }
        }
    }
    domains.into_iter().collect()
}

fn extension_pattern(extension: &str) -> Option<glob::Pattern> {
    glob::Pattern::new(extension).ok()
}

fn extension_matches(path: &Path, pattern: &glob::Pattern) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| pattern.matches(e))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn touch(dir: &Path, name: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "k = \"v\"\n").unwrap();
    }

    #[test]
    fn test_default_domain_searches_directory_root() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "en.ini");
        touch(dir.path(), "fi.ini");

        let paths = [SearchPath::new(dir.path(), "ini")];
        let hits: Vec<PathBuf> = probe("en", DEFAULT_TEXT_DOMAIN, &paths, DEFAULT_TEXT_DOMAIN).collect();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].ends_with("en.ini"));
    }

    #[test]
    fn test_named_domain_searches_subdirectory() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "en.ini");
        touch(dir.path(), "facets/en.ini");

        let paths = [SearchPath::new(dir.path(), "ini")];
        let hits: Vec<PathBuf> = probe("en", "facets", &paths, DEFAULT_TEXT_DOMAIN).collect();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].ends_with("facets/en.ini"));
    }

    #[test]
    fn test_declaration_order_preserved_across_paths() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        touch(first.path(), "en.ini");
        touch(second.path(), "en.ini");

        let paths = [
            SearchPath::new(second.path(), "ini"),
            SearchPath::new(first.path(), "ini"),
        ];
        let hits: Vec<PathBuf> = probe("en", DEFAULT_TEXT_DOMAIN, &paths, DEFAULT_TEXT_DOMAIN).collect();
        assert_eq!(hits.len(), 2);
        assert!(hits[0].starts_with(second.path()));
        assert!(hits[1].starts_with(first.path()));
    }

    #[test]
    fn test_no_fallback_inside_prober() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "en.ini");

        let paths = [SearchPath::new(dir.path(), "ini")];
        let hits: Vec<PathBuf> = probe("en-US", DEFAULT_TEXT_DOMAIN, &paths, DEFAULT_TEXT_DOMAIN).collect();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_extension_glob() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "en.yaml");
        touch(dir.path(), "en.ini");

        let paths = [SearchPath::new(dir.path(), "y*ml")];
        let hits: Vec<PathBuf> = probe("en", DEFAULT_TEXT_DOMAIN, &paths, DEFAULT_TEXT_DOMAIN).collect();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].ends_with("en.yaml"));
    }

    #[test]
    fn test_available_locales_sorted_and_deduplicated() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        touch(first.path(), "fi.ini");
        touch(first.path(), "en.ini");
        touch(second.path(), "en.ini");
        touch(second.path(), "sv.ini");

        let paths = [
            SearchPath::new(first.path(), "ini"),
            SearchPath::new(second.path(), "ini"),
        ];
        assert_eq!(
            available_locales(&paths, DEFAULT_TEXT_DOMAIN, DEFAULT_TEXT_DOMAIN),
            vec!["en", "fi", "sv"]
        );
    }

    #[test]
    fn test_available_domains_lists_subdirectories() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "en.ini");
        touch(dir.path(), "facets/en.ini");
        touch(dir.path(), "formats/en.ini");

        let paths = [SearchPath::new(dir.path(), "ini")];
        assert_eq!(available_domains(&paths), vec!["facets", "formats"]);
    }
}
