// src/core/discovery.rs

//! Resolves the document reference given on the command line.
//!
//! Users may omit the extension (`nightingale thesis`); each known file type
//! is tried in order and the first existing match wins. The file type also
//! decides which comment prefix introduces a directive.

use crate::{constants::TEX_COMMENT_PATTERN, core::paths, i18n::Localize};
use lazy_static::lazy_static;
use std::path::{Path, PathBuf};
use thiserror::Error;

lazy_static! {
    /// Bundled file types, in lookup order.
    static ref DEFAULT_FILE_TYPES: Vec<FileType> = ["tex", "dtx", "ltx", "drv", "ins"]
        .iter()
        .map(|ext| FileType::new(*ext, TEX_COMMENT_PATTERN))
        .collect();
}

/// The document reference matched no file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    /// Neither the reference nor any `reference.<ext>` exists.
    #[error("File '{reference}' could not be found (also tried: {}).", .extensions.join(", "))]
    FileNotFound {
        /// The reference as typed.
        reference: String,
        /// Extensions tried, in order.
        extensions: Vec<String>,
    },
}

impl Localize for DiscoveryError {
    fn message_key(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "error.file_not_found",
        }
    }

    fn placeholders(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::FileNotFound {
                reference,
                extensions,
            } => vec![
                ("reference", reference.clone()),
                ("extensions", extensions.join(", ")),
            ],
        }
    }
}

/// A document type: its extension and the comment prefix directives follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileType {
    /// Extension without the dot.
    pub extension: String,
    /// Regular expression matching the comment prefix.
    pub pattern: String,
}

impl FileType {
    /// A file type from its extension and comment prefix pattern.
    pub fn new(extension: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            pattern: pattern.into(),
        }
    }

    /// The bundled TeX family types: `tex`, `dtx`, `ltx`, `drv`, `ins`.
    pub fn defaults() -> Vec<FileType> {
        DEFAULT_FILE_TYPES.clone()
    }
}

/// A located document together with its file type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovered {
    /// Absolute, resolved path of the document.
    pub path: PathBuf,
    /// The type whose extension matched.
    pub file_type: FileType,
}

/// Locates the document named by `reference`.
///
/// # Logic:
/// - If `reference` is an existing file with a known extension, it is used as is.
/// - Otherwise `reference.<ext>` is tried for every type in `types`, in order.
///
/// # Errors
/// Returns [`DiscoveryError::FileNotFound`] listing the extensions tried.
pub fn discover(reference: &str, types: &[FileType]) -> Result<Discovered, DiscoveryError> {
    let base_dir = Path::new(".");
    let direct = paths::canonicalize(base_dir, reference);
    if direct.is_file()
        && let Some(file_type) = find_type(&direct, types)
    {
        log::debug!("Reference '{}' resolved directly.", reference);
        return Ok(Discovered {
            path: direct,
            file_type: file_type.clone(),
        });
    }

    for file_type in types {
        let candidate = paths::canonicalize(base_dir, &format!("{}.{}", reference, file_type.extension));
        if candidate.is_file() {
            log::debug!(
                "Reference '{}' resolved to '{}'.",
                reference,
                candidate.display()
            );
            return Ok(Discovered {
                path: candidate,
                file_type: file_type.clone(),
            });
        }
    }

    Err(DiscoveryError::FileNotFound {
        reference: reference.to_string(),
        extensions: types.iter().map(|t| t.extension.clone()).collect(),
    })
}

fn find_type<'a>(path: &Path, types: &'a [FileType]) -> Option<&'a FileType> {
    let extension = path.extension()?.to_str()?;
    types.iter().find(|t| t.extension == extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_exact_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("doc.dtx");
        fs::write(&file, "% arara: pdflatex").unwrap();

        let found = discover(&file.to_string_lossy(), &FileType::defaults()).unwrap();

        assert_eq!(found.file_type.extension, "dtx");
        assert!(found.path.ends_with("doc.dtx"));
    }

    #[test]
    fn test_discover_appends_extension_in_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("thesis.ltx"), "").unwrap();
        fs::write(dir.path().join("thesis.ins"), "").unwrap();

        let reference = dir.path().join("thesis");
        let found = discover(&reference.to_string_lossy(), &FileType::defaults()).unwrap();

        assert_eq!(found.file_type.extension, "ltx");
    }

    #[test]
    fn test_discover_unknown_extension_is_not_used_directly() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "").unwrap();

        let err = discover(&file.to_string_lossy(), &FileType::defaults()).unwrap_err();
        let DiscoveryError::FileNotFound { extensions, .. } = err;
        assert_eq!(extensions, vec!["tex", "dtx", "ltx", "drv", "ins"]);
    }

    #[test]
    fn test_discover_custom_type() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), "").unwrap();
        let types = vec![FileType::new("md", r"^\s*<!--\s+")];

        let found = discover(&dir.path().join("readme").to_string_lossy(), &types).unwrap();
        assert_eq!(found.file_type.pattern, r"^\s*<!--\s+");
    }
}
