//! Resolution of language file inheritance chains.
//!
//! A file may declare parent files through its extends directive. Resolution
//! is depth-first: the file's own keys always win, and each parent (in
//! declared order) only fills keys still missing, so among siblings the
//! first-listed parent takes precedence. The chain of files from the
//! original request down to the current file travels along as an explicit
//! parameter; meeting the same file twice on one chain is a fatal
//! configuration error.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::TextDomain;
use crate::error::{ResolveError, Result};
use crate::loader::{self, LoadOptions};

/// The ordered list of files consulted on the way to the current file.
#[derive(Debug, Clone, Default)]
pub struct ResolutionChain {
    files: Vec<PathBuf>,
}

impl ResolutionChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, identity: &Path) -> bool {
        self.files.iter().any(|f| f == identity)
    }

    fn push(&mut self, identity: PathBuf) {
        self.files.push(identity);
    }

    fn pop(&mut self) {
        self.files.pop();
    }

    /// The chain plus the repeated file, for error reporting.
    fn with_repeat(&self, identity: &Path) -> Vec<PathBuf> {
        let mut chain = self.files.clone();
        chain.push(identity.to_path_buf());
        chain
    }
}

/// Load `path` and merge its transitive parents underneath it.
pub fn resolve(path: &Path, options: LoadOptions) -> Result<TextDomain> {
    let mut chain = ResolutionChain::new();
    resolve_with_chain(path, &mut chain, options)
}

/// As [`resolve`], but continuing an existing chain. The orchestrator calls
/// this directly so that chains started from different probe hits stay
/// independent.
pub fn resolve_with_chain(
    path: &Path,
    chain: &mut ResolutionChain,
    options: LoadOptions,
) -> Result<TextDomain> {
    let identity = identity_of(path);
    if chain.contains(&identity) {
        return Err(ResolveError::CircularExtension {
            chain: chain.with_repeat(&identity),
        });
    }
    chain.push(identity);

    let result = resolve_parents(path, chain, options);
    chain.pop();
    result
}

fn resolve_parents(
    path: &Path,
    chain: &mut ResolutionChain,
    options: LoadOptions,
) -> Result<TextDomain> {
    let loaded = loader::load(path, options)?;
    let mut result = loaded.domain;

    for target in &loaded.extends {
        let parent_path = resolve_target(path, target);
        tracing::debug!(
            child = %path.display(),
            parent = %parent_path.display(),
            "resolving declared parent file"
        );
        // A declared parent that is missing is a broken configuration chain,
        // so FileNotFound propagates as-is here.
        let parent = resolve_with_chain(&parent_path, chain, options)?;
        result.fill_missing_from(&parent);
    }

    Ok(result)
}

/// Identity used for cycle detection: the canonical path when the file
/// exists, the literal path otherwise (the load step then reports it).
fn identity_of(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// An extends target is interpreted relative to the declaring file.
fn resolve_target(declaring_file: &Path, target: &str) -> PathBuf {
    let target = Path::new(target);
    if target.is_absolute() {
        target.to_path_buf()
    } else {
        declaring_file
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(target)
    }
}
