//! Request-scoped translation facade.
//!
//! A [`Translator`] binds a [`Resolver`] to one locale and caches the text
//! domains it touches. It owns the string-level conveniences the resolver
//! core stays out of: `domain::key` targets, token substitution, default
//! fallback when a key has no translation, and the `debug` pseudo-locale.
//! There is no global registry; construct one per request or test and pass
//! it where it is needed.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::domain::TextDomain;
use crate::error::{ResolveError, Result};
use crate::resolver::Resolver;

/// Pseudo-locale that renders keys and tokens instead of translating.
pub const DEBUG_LOCALE: &str = "debug";

/// Split a `domain::key` target into its text domain and key. A target
/// without a domain part (or with an empty one) belongs to `default_domain`.
pub fn extract_text_domain(target: &str, default_domain: &str) -> (String, String) {
    match target.split_once("::") {
        Some((domain, key)) if !domain.is_empty() => (domain.to_string(), key.to_string()),
        Some((_, key)) => (default_domain.to_string(), key.to_string()),
        None => (default_domain.to_string(), target.to_string()),
    }
}

/// Replace characters some translation platforms reject in keys with
/// underscore-prefixed hex codes, so such keys can still be translated when
/// the input cannot be changed.
pub fn sanitize_key(key: &str) -> String {
    let mut sanitized = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '(' => sanitized.push_str("_28"),
            ')' => sanitized.push_str("_29"),
            '!' => sanitized.push_str("_21"),
            '?' => sanitized.push_str("_3F"),
            '|' => sanitized.push_str("_7C"),
            other => sanitized.push(other),
        }
    }
    sanitized
}

pub struct Translator {
    resolver: Resolver,
    locale: String,
    cache: HashMap<String, TextDomain>,
}

impl Translator {
    pub fn new(resolver: Resolver, locale: impl Into<String>) -> Self {
        Self {
            resolver,
            locale: locale.into(),
            cache: HashMap::new(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Translate a `key` or `domain::key` target.
    ///
    /// When no translation exists, `default` (or the raw key) is returned.
    /// Tokens are plain find/replace pairs applied to the final string.
    pub fn translate(
        &mut self,
        target: &str,
        tokens: &[(&str, &str)],
        default: Option<&str>,
    ) -> Result<String> {
        let (domain, key) = extract_text_domain(target, self.resolver.default_domain());
        if self.locale == DEBUG_LOCALE {
            return Ok(debug_translation(
                &domain,
                &key,
                self.resolver.default_domain(),
                tokens,
            ));
        }

        let translated = self.lookup(&domain, &key)?;
        let message = translated.unwrap_or_else(|| default.unwrap_or(&key).to_string());
        Ok(substitute_tokens(&message, tokens))
    }

    /// Translate `prefix + key`, falling back to the unprefixed key as the
    /// default so prefixed lookups degrade gracefully.
    pub fn translate_with_prefix(
        &mut self,
        prefix: &str,
        target: &str,
        tokens: &[(&str, &str)],
        default: Option<&str>,
    ) -> Result<String> {
        let (domain, key) = extract_text_domain(target, self.resolver.default_domain());
        let prefixed = format!("{}::{}{}", domain, prefix, key);
        self.translate(&prefixed, tokens, Some(default.unwrap_or(&key)))
    }

    /// Look a key up in a resolved domain. A stored value equal to the key
    /// itself counts as untranslated, mirroring translators that echo
    /// unknown keys back.
    fn lookup(&mut self, domain: &str, key: &str) -> Result<Option<String>> {
        let sanitized = sanitize_key(key);
        let data = self.domain(domain)?;
        Ok(data
            .get(&sanitized)
            .filter(|value| *value != sanitized)
            .map(str::to_string))
    }

    /// Fetch (and cache) a resolved text domain. "No files at all" is an
    /// empty domain here; real configuration errors still propagate.
    fn domain(&mut self, name: &str) -> Result<&TextDomain> {
        match self.cache.entry(name.to_string()) {
            Entry::Occupied(cached) => Ok(cached.into_mut()),
            Entry::Vacant(slot) => {
                let data = match self.resolver.resolve(&self.locale, name) {
                    Ok(data) => data,
                    Err(ResolveError::NoTranslationFound { .. }) => TextDomain::new(),
                    Err(e) => return Err(e),
                };
                Ok(slot.insert(data))
            }
        }
    }
}

fn debug_translation(
    domain: &str,
    key: &str,
    default_domain: &str,
    tokens: &[(&str, &str)],
) -> String {
    let target = if domain != default_domain {
        format!("{}::{}", domain, key)
    } else {
        key.to_string()
    };
    if tokens.is_empty() {
        format!("*{}*", target)
    } else {
        let details = tokens
            .iter()
            .map(|(k, v)| format!("{} = {}", k, v))
            .collect::<Vec<_>>()
            .join(", ");
        format!("*{} | [{}]*", target, details)
    }
}

fn substitute_tokens(message: &str, tokens: &[(&str, &str)]) -> String {
    let mut result = message.to_string();
    for (from, to) in tokens {
        result = result.replace(from, to);
    }
    result
}
