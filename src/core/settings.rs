// src/core/settings.rs

//! User settings read from `nightingale.toml` in the user config directory.

use crate::{
    core::{discovery::FileType, paths},
    i18n::Localize,
};
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path, path::PathBuf};
use thiserror::Error;

/// The settings file exists but cannot be used.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("Could not read settings file '{}': {source}", .path.display())]
    Io {
        /// Location of the settings file.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or has unexpected values.
    #[error("Failed to parse TOML file at '{}': {source}", .path.display())]
    TomlParse {
        /// Location of the settings file.
        path: PathBuf,
        /// What the TOML parser rejected.
        #[source]
        source: toml::de::Error,
    },
}

impl Localize for SettingsError {
    fn message_key(&self) -> &'static str {
        match self {
            Self::Io { .. } => "error.settings_io",
            Self::TomlParse { .. } => "error.settings_parse",
        }
    }

    fn placeholders(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Io { path, .. } => vec![("path", path.display().to_string())],
            Self::TomlParse { path, source } => vec![
                ("path", path.display().to_string()),
                ("reason", source.message().to_string()),
            ],
        }
    }
}

/// Defaults a user can set once instead of passing flags on every run.
/// Command-line flags always win.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Language code, as accepted by `--language`.
    pub language: Option<String>,
    /// Execution timeout in milliseconds.
    pub timeout: Option<u64>,
    /// Loop limit, as accepted by `--max-loops`.
    pub max_loops: Option<u64>,
    /// Overrides the application tag pattern (`arara:\s`).
    pub application_tag: Option<String>,
    /// Extra or overridden file types: extension -> comment prefix pattern.
    pub file_types: BTreeMap<String, String>,
}

impl Settings {
    /// The bundled file types with this file's overrides applied. Bundled
    /// types keep their order; new extensions follow in alphabetical order.
    pub fn file_types(&self) -> Vec<FileType> {
        let mut types: Vec<FileType> = FileType::defaults()
            .into_iter()
            .map(|mut ft| {
                if let Some(pattern) = self.file_types.get(&ft.extension) {
                    ft.pattern = pattern.clone();
                }
                ft
            })
            .collect();

        for (extension, pattern) in &self.file_types {
            if !types.iter().any(|ft| &ft.extension == extension) {
                types.push(FileType::new(extension, pattern));
            }
        }
        types
    }
}

/// Loads the settings file from the user config directory.
/// A missing file (or a system without a config directory) yields defaults.
pub fn load_settings() -> Result<Settings, SettingsError> {
    match paths::settings_path() {
        Some(path) if path.exists() => load_settings_from(&path),
        _ => Ok(Settings::default()),
    }
}

/// Loads settings from an explicit path.
pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    log::debug!("Loading settings from '{}'", path.display());
    let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| SettingsError::TomlParse {
        path: path.to_path_buf(),
        source,
    })
}
