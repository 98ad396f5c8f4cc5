// src/core/document.rs

//! Line-oriented access to the document being scanned.

use crate::core::error::DirectiveError;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// A document as an ordered sequence of lines (line 1 is `lines()[0]`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    path: Option<PathBuf>,
    lines: Vec<String>,
}

impl Document {
    /// Reads a UTF-8 document from disk.
    ///
    /// # Errors
    /// Returns [`DirectiveError::DocumentRead`] if the file cannot be read or
    /// is not valid UTF-8.
    pub fn read(path: &Path) -> Result<Self, DirectiveError> {
        let content = fs::read_to_string(path).map_err(|source| DirectiveError::DocumentRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            lines: content.lines().map(str::to_string).collect(),
        })
    }

    /// Builds an in-memory document from text, splitting on `\n` and `\r\n`.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Builds an in-memory document from lines given in order.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: None,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// All lines, without their terminators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The file this document was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
