//! Polyglot - translation text-domain resolution
//!
//! Polyglot resolves translation text domains for library catalog style
//! applications: language files in an extended ini dialect or YAML, spread
//! across ordered search paths, inheriting from parent files and falling
//! back across locales. It also ships a wildcard matcher for hierarchical
//! (slash-delimited) keys and a small request-scoped translator facade.
//!
//! ## Module Structure
//!
//! - `alias`: translation alias definitions and their application
//! - `config`: resolver configuration struct and validation
//! - `domain`: the `TextDomain` mapping type and merge primitives
//! - `error`: the `ResolveError` taxonomy
//! - `extension`: language-file inheritance chains with cycle detection
//! - `hierarchy`: wildcard matching for hierarchical keys
//! - `loader`: extended-ini and YAML file parsing
//! - `locale`: base-locale derivation and configured fallback chains
//! - `probe`: candidate-file discovery across search paths
//! - `resolver`: the resolution orchestrator
//! - `translator`: per-request translation facade

pub mod alias;
pub mod config;
pub mod domain;
pub mod error;
pub mod extension;
pub mod hierarchy;
pub mod loader;
pub mod locale;
pub mod probe;
pub mod resolver;
pub mod translator;

pub use config::ResolverConfig;
pub use domain::{NON_JOINING_BLANK, TextDomain};
pub use error::{ResolveError, Result};
pub use hierarchy::translate_hierarchical;
pub use probe::{DEFAULT_TEXT_DOMAIN, SearchPath};
pub use resolver::Resolver;
pub use translator::Translator;
