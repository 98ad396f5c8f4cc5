// src/core/extractor.rs

//! Entry points of the directive pipeline.
//!
//! `extract` runs scan, assemble, parse and decode; `validate` (re-exported
//! from [`crate::core::validator`]) runs the validator/expander. Both are
//! fail-fast: the first error aborts the run.

use crate::{
    core::{
        assembler, config::PipelineConfig, document::Document, error::DirectiveError, grammar,
        observer::PipelineObserver, scanner, validator,
    },
    models::Directive,
};

pub use crate::core::validator::validate;

/// Extracts the raw directives of `document`.
///
/// # Errors
/// - [`DirectiveError::InvalidPattern`] if a configured pattern does not compile.
/// - [`DirectiveError::NoDirectivesFound`] if no line carries the marker.
/// - [`DirectiveError::OrphanContinuation`], [`DirectiveError::GrammarMismatch`]
///   or [`DirectiveError::ParameterDecode`] for the first malformed directive.
pub fn extract(
    document: &Document,
    config: &PipelineConfig,
    observer: &mut dyn PipelineObserver,
) -> Result<Vec<Directive>, DirectiveError> {
    let patterns = config.patterns.compile()?;

    let candidates = scanner::scan(document.lines(), &patterns.marker);
    for candidate in &candidates {
        observer.candidate_found(candidate.line, candidate.text.trim());
    }
    if candidates.is_empty() {
        return Err(DirectiveError::NoDirectivesFound);
    }

    let logical = assembler::assemble(&candidates, &patterns.linebreak)?;
    logical
        .iter()
        .map(|current| {
            let directive = grammar::generate_directive(current, &patterns.directive)?;
            observer.directive_found(&directive);
            Ok(directive)
        })
        .collect()
}

/// Reads the document named by `config.reference` and extracts its directives.
pub fn extract_file(
    config: &PipelineConfig,
    observer: &mut dyn PipelineObserver,
) -> Result<Vec<Directive>, DirectiveError> {
    let document = Document::read(&config.reference)?;
    extract(&document, config, observer)
}

/// Reads, extracts and validates in one go: the list handed to the rule engine.
pub fn process(
    config: &PipelineConfig,
    observer: &mut dyn PipelineObserver,
) -> Result<Vec<Directive>, DirectiveError> {
    let directives = extract_file(config, observer)?;
    validator::validate(directives, config, observer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            config::Patterns,
            error::ErrorKind,
            observer::{NoopObserver, tests::RecordingObserver},
        },
        models::{ConditionalType, DynamicValue},
    };
    use std::fs;
    use tempfile::tempdir;

    const THESIS: &str = r"% arara: pdflatex: { shell: yes }
% arara: bibtex
% arara: pdflatex: {
% arara: --> synctex: yes }
% arara: --> until !found('log', 'Rerun')
\documentclass{article}
\begin{document}
Hello.
\end{document}
";

    #[test]
    fn test_extract_full_document() {
        // --- Setup ---
        let document = Document::from_text(THESIS);
        let config = PipelineConfig::new("thesis.tex");
        let mut observer = RecordingObserver::default();

        // --- Execute ---
        let directives = extract(&document, &config, &mut observer).unwrap();

        // --- Assert ---
        assert_eq!(directives.len(), 3);
        assert_eq!(directives[0].identifier, "pdflatex");
        assert_eq!(directives[0].parameters.get("shell"), Some(&DynamicValue::from("yes")));
        assert_eq!(directives[1].identifier, "bibtex");
        assert_eq!(directives[1].line_numbers, vec![2]);
        assert_eq!(directives[2].line_numbers, vec![3, 4, 5]);
        assert_eq!(directives[2].conditional.kind, ConditionalType::Until);
        assert_eq!(directives[2].conditional.condition, "!found('log', 'Rerun')");

        assert_eq!(observer.candidates.len(), 5);
        assert_eq!(observer.candidates[0], (1, "pdflatex: { shell: yes }".to_string()));
        assert_eq!(observer.directives, ["pdflatex", "bibtex", "pdflatex"]);
    }

    #[test]
    fn test_no_directives_found() {
        let document = Document::from_text("\\documentclass{article}\n% a comment\n");
        let err = extract(&document, &PipelineConfig::new("a.tex"), &mut NoopObserver).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoDirectivesFound);
    }

    #[test]
    fn test_first_error_aborts() {
        let document = Document::from_lines([
            "% arara: pdflatex",
            "% arara: not a directive",
            "% arara: --> still not",
            "% arara: bibtex: { broken: [ }",
        ]);
        let err = extract(&document, &PipelineConfig::new("a.tex"), &mut NoopObserver).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GrammarMismatch);
        assert_eq!(err.line_numbers(), &[2, 3]);
    }

    #[test]
    fn test_orphan_continuation_in_document() {
        let document = Document::from_lines(["text", "% arara: --> shell: yes }", "% arara: pdflatex"]);
        let err = extract(&document, &PipelineConfig::new("a.tex"), &mut NoopObserver).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OrphanContinuation);
        assert_eq!(err.line_numbers(), &[2]);
    }

    #[test]
    fn test_custom_file_type_pattern() {
        let document = Document::from_lines(["# arara: make", "% arara: ignored"]);
        let config = PipelineConfig::new("Makefile.sh")
            .with_patterns(Patterns::default().with_file_type(r"^\s*#\s+"));
        let directives = extract(&document, &config, &mut NoopObserver).unwrap();
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].identifier, "make");
    }

    #[test]
    fn test_process_reads_and_validates() {
        // --- Setup ---
        let dir = tempdir().unwrap();
        let main = dir.path().join("main.tex");
        fs::write(&main, "% arara: pdflatex\n% arara: clean: { files: [main.aux, main.log] }\n").unwrap();
        let config = PipelineConfig::new(&main).with_base_dir(dir.path());

        // --- Execute ---
        let directives = process(&config, &mut NoopObserver).unwrap();

        // --- Assert ---
        assert_eq!(directives.len(), 3);
        assert_eq!(
            directives[0].parameters.get("file"),
            Some(&DynamicValue::Scalar(main.to_string_lossy().into_owned()))
        );
        assert!(directives[1].parameters["file"].text().ends_with("main.aux"));
        assert!(directives[2].parameters["file"].text().ends_with("main.log"));
        assert!(directives.iter().all(|d| !d.parameters.contains_key("files")));
    }

    #[test]
    fn test_process_missing_document() {
        let dir = tempdir().unwrap();
        let config = PipelineConfig::new(dir.path().join("absent.tex"));
        let err = process(&config, &mut NoopObserver).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DocumentRead);
    }
}
