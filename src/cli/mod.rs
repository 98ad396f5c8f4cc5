// src/cli/mod.rs

//! Command-line surface of the `nightingale` binary.
//!
//! Parsing never fails on malformed input: anything clap rejects, as well as
//! a missing or extra document argument, falls back to printing the usage.

use crate::{core::settings::Settings, i18n::Language, models::ExecutionOptions};
use clap::{ArgAction, Parser};

pub mod options;
pub mod report;

pub use options::OptionsError;

/// nightingale: extracts, parses and validates build directives.
#[derive(Parser, Debug, Default)]
#[command(
    name = "nightingale",
    about = t!("cli.about"),
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Exactly one document is expected; anything else shows the usage.
    #[arg(value_name = "file", help = t!("cli.option.file"))]
    pub files: Vec<String>,

    /// Go through the motions without running anything.
    #[arg(short = 'n', long = "dry-run", help = t!("cli.option.dry_run"))]
    pub dry_run: bool,

    /// Write the run log to a file.
    #[arg(short = 'l', long, help = t!("cli.option.log"))]
    pub log: bool,

    /// Print more while running.
    #[arg(short = 'v', long, help = t!("cli.option.verbose"))]
    pub verbose: bool,

    /// Kept as text so that `abc` and `-5` reach our own validation.
    #[arg(
        short = 't',
        long,
        value_name = "number",
        allow_hyphen_values = true,
        help = t!("cli.option.timeout")
    )]
    pub timeout: Option<String>,

    /// Same treatment as `timeout`.
    #[arg(
        short = 'm',
        long = "max-loops",
        value_name = "number",
        allow_hyphen_values = true,
        help = t!("cli.option.max_loops")
    )]
    pub max_loops: Option<String>,

    /// Overrides the language from the settings file.
    #[arg(short = 'L', long, value_name = "code", help = t!("cli.option.language"))]
    pub language: Option<String>,

    /// Print the usage.
    #[arg(short = 'h', long, action = ArgAction::SetTrue, help = t!("cli.option.help"))]
    pub help: bool,

    /// Print the version.
    #[arg(short = 'V', long, action = ArgAction::SetTrue, help = t!("cli.option.version"))]
    pub version: bool,
}

/// What the binary should do after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Process `reference` with the given options.
    Process(Invocation),
    /// Print the version banner and the usage.
    ShowUsage,
    /// Print the version banner and the notes.
    ShowVersion,
}

/// A request to process one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The document reference as typed, possibly without extension.
    pub reference: String,
    /// Options resolved from the flags and the settings file.
    pub options: ExecutionOptions,
}

impl Cli {
    /// Parses `args` (program name included). Unparseable input yields `None`,
    /// which callers treat as a request for the usage.
    pub fn parse_args<I, T>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Some(cli),
            Err(e) => {
                log::debug!("Command line rejected: {}", e);
                None
            }
        }
    }

    /// The language for every message of this run.
    pub fn language(&self, settings: &Settings) -> Result<Language, OptionsError> {
        options::resolve_language(self.language.as_deref(), settings)
    }

    /// Decides what to do, in order: help, version, document count, options.
    ///
    /// # Errors
    /// Returns an [`OptionsError`] for an invalid timeout or loop value.
    pub fn action(
        &self,
        settings: &Settings,
        language: &Language,
    ) -> Result<Action, OptionsError> {
        if self.help {
            return Ok(Action::ShowUsage);
        }
        if self.version {
            return Ok(Action::ShowVersion);
        }
        let [reference] = self.files.as_slice() else {
            return Ok(Action::ShowUsage);
        };

        let raw = options::RawOptions {
            dry_run: self.dry_run,
            verbose: self.verbose,
            log: self.log,
            timeout: self.timeout.clone(),
            max_loops: self.max_loops.clone(),
        };
        let options = options::build(&raw, settings, language)?;
        Ok(Action::Process(Invocation {
            reference: reference.clone(),
            options,
        }))
    }
}
