//! Translation aliases.
//!
//! An `aliases.ini` file next to the language files of a text domain maps
//! alias keys to targets, written as `key` or `domain::key`. After a domain
//! resolves, aliases fill in keys that are still missing; an alias never
//! overwrites a resolved key and is skipped entirely when its target value
//! cannot be found. Targets may themselves be aliases; the chase carries a
//! breadcrumb list and fails on a repeat.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::domain::TextDomain;
use crate::error::{ResolveError, Result};
use crate::loader::{self, LoadOptions};
use crate::resolver::Resolver;

/// File holding alias definitions for the domain whose directory it sits in.
pub const ALIAS_FILE_NAME: &str = "aliases.ini";

/// Parsed right-hand side of one alias definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTarget {
    /// Explicit text domain, or the defining domain when absent.
    pub domain: Option<String>,
    pub key: String,
}

impl AliasTarget {
    pub fn parse(raw: &str) -> Self {
        match raw.split_once("::") {
            Some((domain, key)) if !domain.is_empty() => Self {
                domain: Some(domain.to_string()),
                key: key.to_string(),
            },
            Some((_, key)) => Self {
                domain: None,
                key: key.to_string(),
            },
            None => Self {
                domain: None,
                key: raw.to_string(),
            },
        }
    }
}

pub type AliasMap = IndexMap<String, AliasTarget>;

/// Request-scoped alias application over one resolver and locale.
///
/// Alias maps and the raw data of referenced domains load lazily and are
/// cached for the lifetime of the engine (one resolution request).
pub(crate) struct AliasEngine<'a> {
    resolver: &'a Resolver,
    locale: &'a str,
    alias_maps: HashMap<String, AliasMap>,
    domains: HashMap<String, TextDomain>,
}

impl<'a> AliasEngine<'a> {
    pub fn new(resolver: &'a Resolver, locale: &'a str) -> Self {
        Self {
            resolver,
            locale,
            alias_maps: HashMap::new(),
            domains: HashMap::new(),
        }
    }

    /// Fill missing keys of `data` from the domain's alias definitions.
    pub fn apply(&mut self, domain_name: &str, data: &mut TextDomain) -> Result<()> {
        self.ensure_alias_map(domain_name)?;
        let aliases = self
            .alias_maps
            .get(domain_name)
            .cloned()
            .unwrap_or_default();

        for (alias, target) in &aliases {
            if data.contains_key(alias) {
                continue;
            }
            let mut breadcrumbs = Vec::new();
            if let Some(value) =
                self.resolve_target(target, domain_name, domain_name, data, &mut breadcrumbs)?
            {
                tracing::debug!(alias = %alias, domain = domain_name, "alias applied");
                data.insert_missing(alias.clone(), value);
            }
        }
        Ok(())
    }

    /// Chase a target to a concrete value, following alias-to-alias links.
    ///
    /// `defining_domain` is the domain whose alias map produced `target`
    /// (unqualified targets bind to it); `origin_domain`/`origin_data` are
    /// the domain being assembled, consulted directly since its data is
    /// still in flight.
    fn resolve_target(
        &mut self,
        target: &AliasTarget,
        defining_domain: &str,
        origin_domain: &str,
        origin_data: &TextDomain,
        breadcrumbs: &mut Vec<String>,
    ) -> Result<Option<String>> {
        let domain = target
            .domain
            .clone()
            .unwrap_or_else(|| defining_domain.to_string());

        let value = if domain == origin_domain {
            origin_data.get(&target.key).map(str::to_string)
        } else {
            self.domain_value(&domain, &target.key)?
        };
        if value.is_some() {
            return Ok(value);
        }

        let crumb = format!("{}::{}", domain, target.key);
        if breadcrumbs.contains(&crumb) {
            let mut chain = breadcrumbs.clone();
            chain.push(crumb);
            return Err(ResolveError::CircularAlias { chain });
        }
        breadcrumbs.push(crumb);

        self.ensure_alias_map(&domain)?;
        let next = self
            .alias_maps
            .get(&domain)
            .and_then(|map| map.get(&target.key))
            .cloned();
        match next {
            Some(next_target) => {
                self.resolve_target(&next_target, &domain, origin_domain, origin_data, breadcrumbs)
            }
            None => Ok(None),
        }
    }

    fn domain_value(&mut self, domain: &str, key: &str) -> Result<Option<String>> {
        if !self.domains.contains_key(domain) {
            let data = self.resolver.resolve_raw(self.locale, domain)?;
            self.domains.insert(domain.to_string(), data);
        }
        Ok(self
            .domains
            .get(domain)
            .and_then(|d| d.get(key))
            .map(str::to_string))
    }

    /// Load alias definitions for a domain across the search paths,
    /// earlier-declared paths winning on duplicate alias keys.
    fn ensure_alias_map(&mut self, domain: &str) -> Result<()> {
        if self.alias_maps.contains_key(domain) {
            return Ok(());
        }
        let mut map = AliasMap::new();
        for dir in self.resolver.domain_dirs(domain) {
            let path = dir.join(ALIAS_FILE_NAME);
            if !path.is_file() {
                continue;
            }
            let loaded = loader::load(
                &path,
                LoadOptions {
                    convert_blanks: false,
                },
            )?;
            for (alias, raw_target) in loaded.domain.iter() {
                map.entry(alias.to_string())
                    .or_insert_with(|| AliasTarget::parse(raw_target));
            }
        }
        self.alias_maps.insert(domain.to_string(), map);
        Ok(())
    }
}
