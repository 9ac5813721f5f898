//! Language file loading.
//!
//! A loader turns one file on disk into a flat [`TextDomain`] plus the list
//! of parent files the file declares via its extends directive. Loaders are
//! pure parsing; which parents get loaded, and in what order results merge,
//! is decided by the extension resolver and the orchestrator.

mod ini;
mod yaml;

use std::fs;
use std::path::Path;

use crate::domain::TextDomain;
use crate::error::{ResolveError, Result};

/// Supported language file formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Ini,
    Yaml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Option<FileFormat> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ini") => Some(FileFormat::Ini),
            Some("yaml") | Some("yml") => Some(FileFormat::Yaml),
            _ => None,
        }
    }
}

/// Switches that change how file contents are interpreted.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Convert a quoted-empty ini value into [`crate::domain::NON_JOINING_BLANK`]
    /// instead of the empty string.
    pub convert_blanks: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            convert_blanks: true,
        }
    }
}

/// One parsed language file.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub domain: TextDomain,
    /// Parent files declared by the extends directive, in declared order.
    pub extends: Vec<String>,
}

/// Parse `path` into a flat mapping plus its declared parents.
///
/// A missing or unreadable file is `FileNotFound`; malformed content is
/// `Parse` with the underlying parser message.
pub fn load(path: &Path, options: LoadOptions) -> Result<LoadedFile> {
    let format = FileFormat::from_path(path).ok_or_else(|| {
        ResolveError::parse(path, "unsupported language file extension")
    })?;

    let content = fs::read_to_string(path).map_err(|_| ResolveError::FileNotFound {
        path: path.to_path_buf(),
    })?;

    match format {
        FileFormat::Ini => ini::parse(&content, path, options),
        FileFormat::Yaml => yaml::parse(&content, path),
    }
}
