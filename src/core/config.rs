// src/core/config.rs

//! Explicit configuration for one pipeline run.
//!
//! Every stage receives what it needs through [`PipelineConfig`]; there is no
//! process-wide store.

use crate::{
    constants::{
        DEFAULT_APPLICATION_PATTERN, DEFAULT_DIRECTIVE_PATTERN, DEFAULT_LINEBREAK_PATTERN,
        TEX_COMMENT_PATTERN,
    },
    core::error::DirectiveError,
};
use regex::Regex;
use std::path::PathBuf;

/// The pattern fragments that drive extraction, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patterns {
    /// Comment prefix of the document's file type (e.g. `^\s*%\s+`).
    pub file_type: String,
    /// Application tag appended to the comment prefix (e.g. `arara:\s`).
    pub application: String,
    /// Continuation marker; group 1 captures the continued text.
    pub linebreak: String,
    /// Directive grammar; groups 1, 3, 5 and 6 capture identifier,
    /// parameter block, conditional keyword and condition.
    pub directive: String,
}

impl Default for Patterns {
    fn default() -> Self {
        Self {
            file_type: TEX_COMMENT_PATTERN.to_string(),
            application: DEFAULT_APPLICATION_PATTERN.to_string(),
            linebreak: DEFAULT_LINEBREAK_PATTERN.to_string(),
            directive: DEFAULT_DIRECTIVE_PATTERN.to_string(),
        }
    }
}

impl Patterns {
    /// Replaces the comment prefix, keeping every other fragment.
    pub fn with_file_type(mut self, pattern: impl Into<String>) -> Self {
        self.file_type = pattern.into();
        self
    }

    /// Replaces the application tag, keeping every other fragment.
    pub fn with_application(mut self, pattern: impl Into<String>) -> Self {
        self.application = pattern.into();
        self
    }

    /// The marker pattern: comment prefix followed by the application tag.
    pub fn marker(&self) -> String {
        format!("{}{}", self.file_type, self.application)
    }

    /// Compiles all fragments.
    ///
    /// # Errors
    /// Returns [`DirectiveError::InvalidPattern`] naming the first fragment
    /// that is not a valid regular expression.
    pub fn compile(&self) -> Result<CompiledPatterns, DirectiveError> {
        Ok(CompiledPatterns {
            marker: compile("marker", &self.marker())?,
            linebreak: compile("linebreak", &self.linebreak)?,
            directive: compile("directive", &self.directive)?,
        })
    }
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex, DirectiveError> {
    Regex::new(pattern).map_err(|source| DirectiveError::InvalidPattern { name, source })
}

/// The compiled form of [`Patterns`].
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    /// Matches lines that start a directive.
    pub marker: Regex,
    /// Matches continuation lines.
    pub linebreak: Regex,
    /// Matches a whole assembled directive.
    pub directive: Regex,
}

/// Everything the extraction and validation stages need for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// The document in scope. It is read by [`crate::core::extractor::extract_file`]
    /// and becomes the `file` parameter of directives without `files`.
    pub reference: PathBuf,
    /// Directory that relative `files` entries are resolved against.
    pub base_dir: PathBuf,
    /// Extraction patterns, compiled once per run.
    pub patterns: Patterns,
}

impl PipelineConfig {
    /// A configuration with default patterns, resolving relative paths
    /// against the current working directory.
    pub fn new(reference: impl Into<PathBuf>) -> Self {
        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            reference: reference.into(),
            base_dir,
            patterns: Patterns::default(),
        }
    }

    /// Resolves relative `files` entries against `base_dir` instead.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Replaces the extraction patterns.
    pub fn with_patterns(mut self, patterns: Patterns) -> Self {
        self.patterns = patterns;
        self
    }
}
