// src/i18n.rs

//! Runtime rendering of user-facing messages.
//!
//! Messages live in `locales/*.toml` and are compiled in by the build script:
//! the `t!` macro resolves keys of the build-time default language, while
//! [`Localizer`] looks them up at runtime for the language picked with
//! `--language`. Errors expose a message key plus placeholder values through
//! [`Localize`]; the text itself is only produced here.

use crate::{DEFAULT_LANGUAGE, LOCALES};
use std::fmt;
use thiserror::Error;

const FALLBACK_LANGUAGE: &str = "en";

/// Implemented by every error that is shown to the user.
pub trait Localize {
    /// The key of the message template in `locales/*.toml`.
    fn message_key(&self) -> &'static str;
    /// Values for the `{name}` placeholders of the template.
    fn placeholders(&self) -> Vec<(&'static str, String)>;
}

/// A language code with no bundled locale.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("The language '{code}' is not supported.")]
pub struct UnsupportedLanguage {
    /// The code as the user gave it.
    pub code: String,
}

impl Localize for UnsupportedLanguage {
    fn message_key(&self) -> &'static str {
        "error.unsupported_language"
    }

    fn placeholders(&self) -> Vec<(&'static str, String)> {
        vec![
            ("code", self.code.clone()),
            ("available", Language::available().join(", ")),
        ]
    }
}

/// A validated language code, one of the bundled locales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    code: &'static str,
}

impl Language {
    /// Validates a user-supplied code such as `en` or `ES`.
    pub fn parse(code: &str) -> Result<Self, UnsupportedLanguage> {
        let wanted = code.trim().to_lowercase();
        LOCALES
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(name, _)| Self { code: *name })
            .ok_or_else(|| UnsupportedLanguage {
                code: code.to_string(),
            })
    }

    /// The normalized, lowercase code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Codes of every bundled locale.
    pub fn available() -> Vec<&'static str> {
        LOCALES.iter().map(|(name, _)| *name).collect()
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::parse(DEFAULT_LANGUAGE).unwrap_or(Self {
            code: FALLBACK_LANGUAGE,
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

/// Looks up and fills message templates for one language.
#[derive(Debug, Clone, Default)]
pub struct Localizer {
    language: Language,
}

impl Localizer {
    /// A localizer for `language`.
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// The language messages are rendered in.
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Returns the template for `key`, falling back to English and then to
    /// the key itself.
    pub fn message<'k>(&self, key: &'k str) -> &'k str {
        lookup(self.language.code, key)
            .or_else(|| lookup(FALLBACK_LANGUAGE, key))
            .unwrap_or(key)
    }

    /// Returns the template for `key` with its placeholders filled in.
    pub fn format(&self, key: &str, values: &[(&str, String)]) -> String {
        fill(self.message(key), values)
    }

    /// Renders an error in this localizer's language.
    pub fn render(&self, error: &dyn Localize) -> String {
        let values = error.placeholders();
        fill(self.message(error.message_key()), &values)
    }
}

fn lookup(code: &str, key: &str) -> Option<&'static str> {
    let (_, messages) = LOCALES.iter().find(|(name, _)| *name == code)?;
    messages
        .binary_search_by(|(k, _)| (*k).cmp(key))
        .ok()
        .and_then(|i| messages.get(i))
        .map(|(_, message)| *message)
}

fn fill(template: &str, values: &[(&str, String)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::DirectiveError;

    #[test]
    fn test_language_parse() {
        assert_eq!(Language::parse("EN").unwrap().code(), "en");
        assert_eq!(Language::parse("es").unwrap().code(), "es");
        let err = Language::parse("xx").unwrap_err();
        assert_eq!(err.code, "xx");
        assert!(Language::available().contains(&"en"));
    }

    #[test]
    fn test_render_fills_placeholders() {
        let localizer = Localizer::new(Language::parse("en").unwrap());
        let rendered = localizer.render(&DirectiveError::EmptyFilesList { lines: vec![4, 5] });
        assert!(rendered.contains("(4, 5)"));
        assert!(!rendered.contains("{lines}"));
    }

    #[test]
    fn test_render_in_spanish() {
        let localizer = Localizer::new(Language::parse("es").unwrap());
        let rendered = localizer.render(&DirectiveError::OrphanContinuation { line: 12 });
        assert!(rendered.contains("12"));
        assert!(rendered.contains("línea"));
    }

    #[test]
    fn test_missing_key_falls_back() {
        let localizer = Localizer::new(Language::parse("es").unwrap());
        // Only present in the English locale, merged into Spanish at build time.
        assert_eq!(
            localizer.message("info.summary.parameter"),
            Localizer::new(Language::parse("en").unwrap()).message("info.summary.parameter")
        );
        assert_eq!(localizer.message("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_compile_time_messages_match_runtime_default() {
        let localizer = Localizer::default();
        assert_eq!(localizer.message("cli.usage"), t!("cli.usage"));
    }
}
