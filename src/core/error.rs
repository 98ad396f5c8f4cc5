// src/core/error.rs

//! Errors raised while turning a document into validated directives.

use crate::{i18n::Localize, models::format_lines};
use std::path::PathBuf;
use thiserror::Error;

/// Machine-distinguishable category of a [`DirectiveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`DirectiveError::DocumentRead`].
    DocumentRead,
    /// See [`DirectiveError::NoDirectivesFound`].
    NoDirectivesFound,
    /// See [`DirectiveError::OrphanContinuation`].
    OrphanContinuation,
    /// See [`DirectiveError::GrammarMismatch`].
    GrammarMismatch,
    /// See [`DirectiveError::ParameterDecode`].
    ParameterDecode,
    /// See [`DirectiveError::ReservedKey`].
    ReservedKey,
    /// See [`DirectiveError::FilesNotList`].
    FilesNotList,
    /// See [`DirectiveError::EmptyFilesList`].
    EmptyFilesList,
    /// See [`DirectiveError::InvalidPattern`].
    InvalidPattern,
}

/// Represents every failure of the extraction and validation pipeline.
///
/// Each variant carries structured context only; user-facing text is produced
/// by [`crate::i18n::Localizer`].
#[derive(Error, Debug)]
pub enum DirectiveError {
    /// The document could not be read, or is not valid UTF-8.
    #[error("Could not read document '{}': {source}", .path.display())]
    DocumentRead {
        /// The document that was being read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Scanning the document produced no directive candidates.
    #[error("No directives were found in the document.")]
    NoDirectivesFound,
    /// A continuation marker appeared before any directive.
    #[error("Line break marker at line {line} has no directive to continue.")]
    OrphanContinuation {
        /// Line of the stray marker.
        line: usize,
    },
    /// The assembled text does not match the directive grammar.
    #[error("Directive at lines {} does not match the directive grammar.", format_lines(.lines))]
    GrammarMismatch {
        /// Source lines of the directive.
        lines: Vec<usize>,
    },
    /// The parameter block is not a valid key-value mapping.
    #[error("Parameters of the directive at lines {} could not be decoded: {reason}", format_lines(.lines))]
    ParameterDecode {
        /// Source lines of the directive.
        lines: Vec<usize>,
        /// What the YAML decoder rejected.
        reason: String,
    },
    /// The user wrote the reserved `file` parameter.
    #[error("Directive at lines {} uses the reserved key 'file'.", format_lines(.lines))]
    ReservedKey {
        /// Source lines of the directive.
        lines: Vec<usize>,
    },
    /// `files` holds something other than a list.
    #[error("The 'files' parameter of the directive at lines {} is not a list.", format_lines(.lines))]
    FilesNotList {
        /// Source lines of the directive.
        lines: Vec<usize>,
    },
    /// `files` is an empty list.
    #[error("The 'files' parameter of the directive at lines {} is empty.", format_lines(.lines))]
    EmptyFilesList {
        /// Source lines of the directive.
        lines: Vec<usize>,
    },
    /// A configured pattern fragment is not a valid regular expression.
    #[error("The '{name}' pattern is invalid: {source}")]
    InvalidPattern {
        /// Which fragment failed: `marker`, `linebreak` or `directive`.
        name: &'static str,
        /// Why the compiled expression was rejected.
        #[source]
        source: regex::Error,
    },
}

impl DirectiveError {
    /// The category of this error, for matching without destructuring.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DocumentRead { .. } => ErrorKind::DocumentRead,
            Self::NoDirectivesFound => ErrorKind::NoDirectivesFound,
            Self::OrphanContinuation { .. } => ErrorKind::OrphanContinuation,
            Self::GrammarMismatch { .. } => ErrorKind::GrammarMismatch,
            Self::ParameterDecode { .. } => ErrorKind::ParameterDecode,
            Self::ReservedKey { .. } => ErrorKind::ReservedKey,
            Self::FilesNotList { .. } => ErrorKind::FilesNotList,
            Self::EmptyFilesList { .. } => ErrorKind::EmptyFilesList,
            Self::InvalidPattern { .. } => ErrorKind::InvalidPattern,
        }
    }

    /// The offending source lines, when the error is tied to a directive.
    pub fn line_numbers(&self) -> &[usize] {
        match self {
            Self::OrphanContinuation { line } => std::slice::from_ref(line),
            Self::GrammarMismatch { lines }
            | Self::ParameterDecode { lines, .. }
            | Self::ReservedKey { lines }
            | Self::FilesNotList { lines }
            | Self::EmptyFilesList { lines } => lines.as_slice(),
            Self::DocumentRead { .. } | Self::NoDirectivesFound | Self::InvalidPattern { .. } => {
                &[]
            }
        }
    }
}

impl Localize for DirectiveError {
    fn message_key(&self) -> &'static str {
        match self {
            Self::DocumentRead { .. } => "error.document_read",
            Self::NoDirectivesFound => "error.no_directives",
            Self::OrphanContinuation { .. } => "error.orphan_linebreak",
            Self::GrammarMismatch { .. } => "error.invalid_directive",
            Self::ParameterDecode { .. } => "error.parameters",
            Self::ReservedKey { .. } => "error.file_reserved",
            Self::FilesNotList { .. } => "error.files_not_list",
            Self::EmptyFilesList { .. } => "error.files_empty",
            Self::InvalidPattern { .. } => "error.invalid_pattern",
        }
    }

    fn placeholders(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::DocumentRead { path, .. } => vec![("path", path.display().to_string())],
            Self::NoDirectivesFound => Vec::new(),
            Self::OrphanContinuation { line } => vec![("line", line.to_string())],
            Self::ParameterDecode { lines, reason } => {
                vec![("lines", format_lines(lines)), ("reason", reason.clone())]
            }
            Self::GrammarMismatch { lines }
            | Self::ReservedKey { lines }
            | Self::FilesNotList { lines }
            | Self::EmptyFilesList { lines } => vec![("lines", format_lines(lines))],
            Self::InvalidPattern { name, source } => {
                vec![("name", name.to_string()), ("reason", source.to_string())]
            }
        }
    }
}
