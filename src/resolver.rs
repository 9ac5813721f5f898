//! The resolution orchestrator.
//!
//! Composes the prober, loader, extension resolver and locale fallback into
//! one pipeline: for a (locale, text domain) pair, probe the exact locale
//! across every search path, then each fallback locale, merging every hit
//! with first-writer-wins precedence so a more specific source is never
//! overwritten by a less specific one.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::alias::AliasEngine;
use crate::config::ResolverConfig;
use crate::domain::TextDomain;
use crate::error::{ResolveError, Result};
use crate::extension;
use crate::loader::LoadOptions;
use crate::locale::{self, WILDCARD_LOCALE};
use crate::probe::{self, DEFAULT_TEXT_DOMAIN, SearchPath};

/// Resolves text domains against a fixed set of search paths and fallback
/// configuration. Stateless between calls; each resolution is a pure
/// function of the configuration and the files on disk.
#[derive(Debug, Clone)]
pub struct Resolver {
    search_paths: Vec<SearchPath>,
    fallback_map: HashMap<String, String>,
    enable_fallback: bool,
    use_aliases: bool,
    load_options: LoadOptions,
    default_domain: String,
}

impl Resolver {
    pub fn new(search_paths: Vec<SearchPath>) -> Self {
        Self {
            search_paths,
            fallback_map: HashMap::new(),
            enable_fallback: true,
            use_aliases: true,
            load_options: LoadOptions::default(),
            default_domain: DEFAULT_TEXT_DOMAIN.to_string(),
        }
    }

    /// Build a resolver from a validated configuration.
    pub fn from_config(config: ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            search_paths: config.search_paths,
            fallback_map: config.fallback_map,
            enable_fallback: config.enable_fallback,
            use_aliases: config.use_aliases,
            load_options: LoadOptions {
                convert_blanks: config.convert_blanks,
            },
            default_domain: config.default_text_domain,
        })
    }

    pub fn with_fallback_map(mut self, fallback_map: HashMap<String, String>) -> Self {
        self.fallback_map = fallback_map;
        self
    }

    pub fn with_fallback(mut self, enable: bool) -> Self {
        self.enable_fallback = enable;
        self
    }

    pub fn with_aliases(mut self, enable: bool) -> Self {
        self.use_aliases = enable;
        self
    }

    pub fn with_convert_blanks(mut self, enable: bool) -> Self {
        self.load_options.convert_blanks = enable;
        self
    }

    pub fn with_default_domain(mut self, name: impl Into<String>) -> Self {
        self.default_domain = name.into();
        self
    }

    pub fn default_domain(&self) -> &str {
        &self.default_domain
    }

    /// Resolve one (locale, text domain) pair into a merged mapping.
    ///
    /// Fails with `NoTranslationFound` when no probed locale/directory
    /// combination yields a file; parse and cycle errors from any consulted
    /// file propagate as-is.
    pub fn resolve(&self, locale: &str, text_domain: &str) -> Result<TextDomain> {
        let (mut result, files_loaded) = self.resolve_locale_stack(locale, text_domain)?;
        if files_loaded == 0 {
            return Err(ResolveError::NoTranslationFound {
                locale: locale.to_string(),
                text_domain: text_domain.to_string(),
            });
        }
        if self.use_aliases {
            AliasEngine::new(self, locale).apply(text_domain, &mut result)?;
        }
        tracing::debug!(
            locale,
            text_domain,
            keys = result.len(),
            files = files_loaded,
            "text domain resolved"
        );
        Ok(result)
    }

    /// Resolve without alias application, mapping "no files" to an empty
    /// domain. Used for domains referenced from alias targets.
    pub(crate) fn resolve_raw(&self, locale: &str, text_domain: &str) -> Result<TextDomain> {
        let (result, _) = self.resolve_locale_stack(locale, text_domain)?;
        Ok(result)
    }

    /// Directories that may hold the given domain's files, in declaration
    /// order. Shared with the alias engine, which looks for alias files in
    /// the same places.
    pub(crate) fn domain_dirs(&self, text_domain: &str) -> impl Iterator<Item = PathBuf> + '_ {
        let text_domain = text_domain.to_string();
        self.search_paths.iter().map(move |sp| {
            if text_domain == self.default_domain {
                sp.dir.clone()
            } else {
                sp.dir.join(&text_domain)
            }
        })
    }

    fn resolve_locale_stack(&self, locale: &str, text_domain: &str) -> Result<(TextDomain, usize)> {
        if !locale::is_well_formed(locale) {
            tracing::warn!(locale, "malformed locale code requested");
        }

        let mut result = TextDomain::new();
        let mut files_loaded = 0;
        // The search path list is identical for every candidate locale, so
        // skipping an already-seen locale skips exactly the already-probed
        // (directory, locale, domain) combinations.
        let mut seen_locales = HashSet::new();

        self.merge_locale(locale, text_domain, &mut seen_locales, &mut result, &mut files_loaded)?;

        if self.enable_fallback {
            for base in locale::base_locales(locale) {
                self.merge_locale(&base, text_domain, &mut seen_locales, &mut result, &mut files_loaded)?;
            }
            for next in locale::fallback_chain(locale, &self.fallback_map, WILDCARD_LOCALE) {
                let next = next?;
                self.merge_locale(&next, text_domain, &mut seen_locales, &mut result, &mut files_loaded)?;
            }
        }

        Ok((result, files_loaded))
    }

    /// Probe one candidate locale and fill gaps from every hit.
    fn merge_locale(
        &self,
        candidate: &str,
        text_domain: &str,
        seen_locales: &mut HashSet<String>,
        result: &mut TextDomain,
        files_loaded: &mut usize,
    ) -> Result<()> {
        if !seen_locales.insert(candidate.to_string()) {
            return Ok(());
        }
        for path in probe::probe(candidate, text_domain, &self.search_paths, &self.default_domain) {
            let mut chain = extension::ResolutionChain::new();
            let data = extension::resolve_with_chain(&path, &mut chain, self.load_options)?;
            tracing::debug!(
                locale = candidate,
                text_domain,
                file = %path.display(),
                keys = data.len(),
                "merging language file"
            );
            result.fill_missing_from(&data);
            *files_loaded += 1;
        }
        Ok(())
    }
}
