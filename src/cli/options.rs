// src/cli/options.rs

//! Turns command-line values and user settings into [`ExecutionOptions`].

use crate::{
    core::settings::Settings,
    i18n::{Language, Localize, UnsupportedLanguage},
    models::ExecutionOptions,
};
use std::time::Duration;
use thiserror::Error;

/// A command-line or settings value that cannot become an option.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// `--timeout` is not an integer.
    #[error("The timeout value '{0}' is not a number.")]
    TimeoutNotANumber(String),
    /// `--timeout` is zero or negative.
    #[error("The timeout value must be greater than zero, got {0}.")]
    TimeoutInvalidRange(i64),
    /// `--max-loops` is not an integer.
    #[error("The maximum number of loops '{0}' is not a number.")]
    LoopsNotANumber(String),
    /// `--max-loops` is zero or negative.
    #[error("The maximum number of loops must be greater than zero, got {0}.")]
    LoopsInvalidRange(i64),
    /// The requested language has no bundled translation.
    #[error(transparent)]
    UnsupportedLanguage(#[from] UnsupportedLanguage),
}

impl Localize for OptionsError {
    fn message_key(&self) -> &'static str {
        match self {
            Self::TimeoutNotANumber(_) => "error.timeout_nan",
            Self::TimeoutInvalidRange(_) => "error.timeout_range",
            Self::LoopsNotANumber(_) => "error.loops_nan",
            Self::LoopsInvalidRange(_) => "error.loops_range",
            Self::UnsupportedLanguage(inner) => inner.message_key(),
        }
    }

    fn placeholders(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::UnsupportedLanguage(inner) => inner.placeholders(),
            _ => Vec::new(),
        }
    }
}

/// Command-line values that feed [`ExecutionOptions`], still unparsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOptions {
    /// `--dry-run`
    pub dry_run: bool,
    /// `--verbose`
    pub verbose: bool,
    /// `--log`
    pub log: bool,
    /// `--timeout`, in milliseconds.
    pub timeout: Option<String>,
    /// `--max-loops`
    pub max_loops: Option<String>,
}

/// Parses a timeout given in milliseconds.
pub fn parse_timeout(value: &str) -> Result<Duration, OptionsError> {
    let millis: i64 = value
        .parse()
        .map_err(|_| OptionsError::TimeoutNotANumber(value.to_string()))?;
    let millis = u64::try_from(millis)
        .ok()
        .filter(|m| *m > 0)
        .ok_or(OptionsError::TimeoutInvalidRange(millis))?;
    Ok(Duration::from_millis(millis))
}

/// Parses the maximum number of loops.
pub fn parse_max_loops(value: &str) -> Result<u64, OptionsError> {
    let loops: i64 = value
        .parse()
        .map_err(|_| OptionsError::LoopsNotANumber(value.to_string()))?;
    u64::try_from(loops)
        .ok()
        .filter(|l| *l > 0)
        .ok_or(OptionsError::LoopsInvalidRange(loops))
}

/// Picks the language: the flag, then the settings file, then the built-in default.
pub fn resolve_language(
    flag: Option<&str>,
    settings: &Settings,
) -> Result<Language, OptionsError> {
    match flag.or(settings.language.as_deref()) {
        Some(code) => Ok(Language::parse(code)?),
        None => Ok(Language::default()),
    }
}

/// Builds the run-wide options. Flags win over settings.
///
/// # Errors
/// Returns the first invalid timeout or loop value, whether it came from a
/// flag or from the settings file.
pub fn build(
    raw: &RawOptions,
    settings: &Settings,
    language: &Language,
) -> Result<ExecutionOptions, OptionsError> {
    let mut options = ExecutionOptions {
        language: language.code().to_string(),
        ..ExecutionOptions::default()
    };

    options.timeout = match (&raw.timeout, settings.timeout) {
        (Some(value), _) => Some(parse_timeout(value)?),
        (None, Some(millis)) => Some(parse_timeout(&millis.to_string())?),
        (None, None) => None,
    };
    options.max_loops = match (&raw.max_loops, settings.max_loops) {
        (Some(value), _) => parse_max_loops(value)?,
        (None, Some(loops)) => parse_max_loops(&loops.to_string())?,
        (None, None) => options.max_loops,
    };

    options.verbose = raw.verbose;
    options.logging = raw.log;
    if raw.dry_run {
        options.dry_run = true;
        options.halt_on_errors = false;
    }
    Ok(options)
}
