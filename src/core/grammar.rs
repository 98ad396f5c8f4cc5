// src/core/grammar.rs

//! Parses one logical directive against the directive grammar:
//!
//! ```text
//! <identifier> [ ':' <parameter-block> ] [ <keyword> <condition> ]
//! ```
//!
//! The grammar itself is a configurable regular expression whose capture
//! groups 1, 3, 5 and 6 hold identifier, parameter block, conditional
//! keyword and condition expression.

use crate::{
    core::{assembler::LogicalDirective, error::DirectiveError, parameters},
    models::{Conditional, ConditionalType, Directive},
};
use regex::Regex;

const IDENTIFIER_GROUP: usize = 1;
const PARAMETERS_GROUP: usize = 3;
const KEYWORD_GROUP: usize = 5;
const CONDITION_GROUP: usize = 6;

/// The raw pieces of a directive, borrowed from its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveParts<'t> {
    /// The rule name, never empty.
    pub identifier: &'t str,
    /// The block after `:`, braces included.
    pub parameters: Option<&'t str>,
    /// `if`, `unless`, `while` or `until`, as written.
    pub keyword: Option<&'t str>,
    /// The expression following the keyword.
    pub condition: Option<&'t str>,
}

/// Splits `text` into its parts, or `None` if it does not match the grammar
/// or has an empty identifier.
pub fn split<'t>(text: &'t str, grammar: &Regex) -> Option<DirectiveParts<'t>> {
    let caps = grammar.captures(text)?;
    let group = |i: usize| caps.get(i).map(|m| m.as_str());

    let identifier = group(IDENTIFIER_GROUP).filter(|id| !id.is_empty())?;
    Some(DirectiveParts {
        identifier,
        parameters: group(PARAMETERS_GROUP),
        keyword: group(KEYWORD_GROUP),
        condition: group(CONDITION_GROUP),
    })
}

/// Maps the conditional keyword to its type.
///
/// Any keyword other than `if`, `while` and `until` maps to `Unless`; the
/// default grammar only admits `unless` there, but custom grammars may not.
pub fn conditional_type(keyword: Option<&str>) -> ConditionalType {
    match keyword {
        None => ConditionalType::None,
        Some("if") => ConditionalType::If,
        Some("while") => ConditionalType::While,
        Some("until") => ConditionalType::Until,
        Some(_) => ConditionalType::Unless,
    }
}

/// Parses a logical directive into a [`Directive`], decoding its parameters.
///
/// # Errors
/// - [`DirectiveError::GrammarMismatch`] if the text does not match the grammar.
/// - [`DirectiveError::ParameterDecode`] if the parameter block is malformed.
pub fn generate_directive(
    logical: &LogicalDirective,
    grammar: &Regex,
) -> Result<Directive, DirectiveError> {
    let lines = &logical.line_numbers;
    let parts = split(logical.text(), grammar).ok_or_else(|| DirectiveError::GrammarMismatch {
        lines: lines.clone(),
    })?;

    let parameters = parameters::decode(parts.parameters, lines)?;
    let conditional = Conditional::new(
        conditional_type(parts.keyword),
        parts.condition.unwrap_or_default(),
    );

    Ok(Directive::new(
        parts.identifier,
        parameters,
        conditional,
        lines.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{assembler, config::Patterns, error::ErrorKind, scanner::Candidate},
        models::DynamicValue,
    };

    fn grammar() -> Regex {
        Patterns::default().compile().unwrap().directive
    }

    fn logical(lines: &[(usize, &str)]) -> LogicalDirective {
        let patterns = Patterns::default().compile().unwrap();
        let candidates: Vec<Candidate> = lines
            .iter()
            .map(|(line, text)| Candidate::new(*line, *text))
            .collect();
        assembler::assemble(&candidates, &patterns.linebreak)
            .unwrap()
            .remove(0)
    }

    #[test]
    fn test_identifier_only() {
        let directive = generate_directive(&logical(&[(1, "pdflatex")]), &grammar()).unwrap();
        assert_eq!(directive.identifier, "pdflatex");
        assert!(directive.parameters.is_empty());
        assert_eq!(directive.conditional, Conditional::none());
        assert_eq!(directive.line_numbers, vec![1]);
    }

    #[test]
    fn test_parameters_and_conditionals() {
        let cases = [
            ("pdflatex if missing('pdf')", ConditionalType::If, "missing('pdf')"),
            ("pdflatex while changed('aux')", ConditionalType::While, "changed('aux')"),
            ("pdflatex until !found('log', 'Rerun')", ConditionalType::Until, "!found('log', 'Rerun')"),
            ("pdflatex unless exists('pdf')", ConditionalType::Unless, "exists('pdf')"),
        ];
        for (text, kind, condition) in cases {
            let directive = generate_directive(&logical(&[(1, text)]), &grammar()).unwrap();
            assert_eq!(directive.conditional.kind, kind, "for '{}'", text);
            assert_eq!(directive.conditional.condition, condition, "for '{}'", text);
        }
    }

    #[test]
    fn test_parameters_with_conditional() {
        let directive = generate_directive(
            &logical(&[(2, "pdflatex: { shell: yes } if missing('pdf')")]),
            &grammar(),
        )
        .unwrap();
        assert_eq!(directive.parameters.get("shell"), Some(&DynamicValue::from("yes")));
        assert_eq!(directive.conditional.kind, ConditionalType::If);
    }

    #[test]
    fn test_multiline_directive() {
        let directive = generate_directive(
            &logical(&[(3, "pdflatex: {"), (4, "--> shell: yes }"), (5, "--> until !found('log', 'Rerun')")]),
            &grammar(),
        )
        .unwrap();
        assert_eq!(directive.line_numbers, vec![3, 4, 5]);
        assert_eq!(directive.parameters.get("shell"), Some(&DynamicValue::from("yes")));
        assert_eq!(directive.conditional.kind, ConditionalType::Until);
    }

    #[test]
    fn test_conditional_type_mapping() {
        assert_eq!(conditional_type(None), ConditionalType::None);
        assert_eq!(conditional_type(Some("if")), ConditionalType::If);
        assert_eq!(conditional_type(Some("while")), ConditionalType::While);
        assert_eq!(conditional_type(Some("until")), ConditionalType::Until);
        assert_eq!(conditional_type(Some("unless")), ConditionalType::Unless);
        // Anything else the grammar lets through is treated as `unless`.
        assert_eq!(conditional_type(Some("when")), ConditionalType::Unless);
    }

    #[test]
    fn test_custom_grammar_keyword_falls_back_to_unless() {
        let custom = Regex::new(r"^\s*(\w+)\s*(:\s*(\{.*\})\s*)?((\w+)\s+(\S.*))?$").unwrap();
        let directive = generate_directive(&logical(&[(1, "clean when dirty")]), &custom).unwrap();
        assert_eq!(directive.conditional.kind, ConditionalType::Unless);
        assert_eq!(directive.conditional.condition, "dirty");
    }

    #[test]
    fn test_grammar_mismatch_carries_lines() {
        let err = generate_directive(&logical(&[(7, "pdf latex: shell")]), &grammar()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GrammarMismatch);
        assert_eq!(err.line_numbers(), &[7]);
    }

    #[test]
    fn test_bad_parameters_carry_lines() {
        let err = generate_directive(&logical(&[(9, "pdflatex: { shell: [ }")]), &grammar()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParameterDecode);
        assert_eq!(err.line_numbers(), &[9]);
    }
}
