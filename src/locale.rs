//! Locale codes and fallback sequences.
//!
//! Two fallback mechanisms compose in the orchestrator: base-locale
//! derivation (`en-US` probes `en` next) and an explicitly configured
//! locale -> next-locale map with an optional wildcard default.

use std::collections::HashMap;
use std::iter;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ResolveError, Result};

/// Map key applying to any locale without an explicit entry of its own.
pub const WILDCARD_LOCALE: &str = "*";

static LOCALE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+(-[A-Za-z0-9]+)*$").unwrap());

/// A well-formed locale code is one or more non-empty alphanumeric segments
/// joined by hyphens (`en`, `en-US`, `zh-Hant-TW`).
pub fn is_well_formed(locale: &str) -> bool {
    LOCALE_REGEX.is_match(locale)
}

/// Lazy sequence of base locales, most specific first, produced by stripping
/// one trailing segment at a time. The original locale itself is excluded;
/// callers probe it before consulting this sequence.
pub fn base_locales(locale: &str) -> impl Iterator<Item = String> + use<> {
    let mut current = locale.to_string();
    iter::from_fn(move || {
        let cut = current.rfind('-')?;
        current.truncate(cut);
        Some(current.clone())
    })
}

/// Lazy walk of the configured fallback map starting from `locale`.
///
/// Each step looks up the current locale in the map, falling back to the
/// `wildcard_key` entry for locales with no explicit mapping. The chain ends
/// when no next locale is configured, or when the wildcard would map a
/// locale onto itself. Revisiting an earlier member of the chain yields
/// `CircularFallback` naming the full chain.
pub fn fallback_chain<'a>(
    locale: &str,
    fallback_map: &'a HashMap<String, String>,
    wildcard_key: &'a str,
) -> impl Iterator<Item = Result<String>> + use<'a> {
    let mut current = locale.to_string();
    let mut trail = vec![current.clone()];
    let mut dead = false;
    iter::from_fn(move || {
        if dead {
            return None;
        }
        let explicit = fallback_map.get(&current);
        let next = explicit.or_else(|| fallback_map.get(wildcard_key))?;
        if *next == current && explicit.is_none() {
            // The wildcard default pointing at the current locale is a
            // normal end of the chain, not a cycle.
            return None;
        }
        if trail.contains(next) {
            dead = true;
            let mut chain = trail.clone();
            chain.push(next.clone());
            return Some(Err(ResolveError::CircularFallback { chain }));
        }
        current = next.clone();
        trail.push(current.clone());
        Some(Ok(current.clone()))
    })
}
