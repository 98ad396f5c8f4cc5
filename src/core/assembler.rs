// src/core/assembler.rs

//! Folds scanner candidates into logical directives.
//!
//! A directive may continue over several lines, each continuation starting
//! with the line break marker (`% arara: --> ...`). The assembler is a two
//! state machine: `Idle` before the first directive, `Accumulating` while a
//! directive is open and may still receive continuation lines.

use crate::core::{error::DirectiveError, scanner::Candidate};
use regex::Regex;

/// One directive's text, stitched from its physical lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogicalDirective {
    /// The lines that contributed to the text, ascending.
    pub line_numbers: Vec<usize>,
    buffer: String,
}

impl LogicalDirective {
    fn seeded(line: usize, text: &str) -> Self {
        let mut directive = Self::default();
        directive.append(line, text);
        directive
    }

    fn append(&mut self, line: usize, text: &str) {
        self.line_numbers.push(line);
        self.buffer.push_str(text);
        self.buffer.push(' ');
    }

    /// The segments in order, separated by single spaces and trimmed.
    pub fn text(&self) -> &str {
        self.buffer.trim()
    }
}

#[derive(Debug)]
enum State {
    Idle,
    Accumulating(LogicalDirective),
}

/// Incremental assembler; feed candidates in line order, then [`finish`](Self::finish).
#[derive(Debug)]
pub struct Assembler<'p> {
    linebreak: &'p Regex,
    state: State,
    completed: Vec<LogicalDirective>,
}

impl<'p> Assembler<'p> {
    /// An idle assembler recognising continuations with `linebreak`.
    pub fn new(linebreak: &'p Regex) -> Self {
        Self {
            linebreak,
            state: State::Idle,
            completed: Vec::new(),
        }
    }

    /// Processes the next candidate.
    ///
    /// # Errors
    /// Returns [`DirectiveError::OrphanContinuation`] when a continuation line
    /// arrives while no directive is open.
    pub fn feed(&mut self, candidate: &Candidate) -> Result<(), DirectiveError> {
        if let Some(caps) = self.linebreak.captures(&candidate.text) {
            let rest = caps.get(1).map_or("", |m| m.as_str());
            return match &mut self.state {
                State::Accumulating(open) => {
                    open.append(candidate.line, rest);
                    Ok(())
                }
                State::Idle => Err(DirectiveError::OrphanContinuation {
                    line: candidate.line,
                }),
            };
        }

        let next = State::Accumulating(LogicalDirective::seeded(candidate.line, &candidate.text));
        if let State::Accumulating(done) = std::mem::replace(&mut self.state, next) {
            self.completed.push(done);
        }
        Ok(())
    }

    /// Closes the open directive, if any, and returns all directives in
    /// encounter order.
    pub fn finish(mut self) -> Vec<LogicalDirective> {
        if let State::Accumulating(done) = self.state {
            self.completed.push(done);
        }
        self.completed
    }
}

/// Assembles all candidates at once.
pub fn assemble(
    candidates: &[Candidate],
    linebreak: &Regex,
) -> Result<Vec<LogicalDirective>, DirectiveError> {
    let mut assembler = Assembler::new(linebreak);
    for candidate in candidates {
        assembler.feed(candidate)?;
    }
    Ok(assembler.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::Patterns, error::ErrorKind};

    fn linebreak() -> Regex {
        Patterns::default().compile().unwrap().linebreak
    }

    #[test]
    fn test_single_line_directives() {
        let candidates = [Candidate::new(1, "pdflatex"), Candidate::new(4, "bibtex")];

        let assembled = assemble(&candidates, &linebreak()).unwrap();

        assert_eq!(assembled.len(), 2);
        assert_eq!(assembled[0].line_numbers, vec![1]);
        assert_eq!(assembled[0].text(), "pdflatex");
        assert_eq!(assembled[1].line_numbers, vec![4]);
        assert_eq!(assembled[1].text(), "bibtex");
    }

    #[test]
    fn test_continuation_lines_are_stitched() {
        let candidates = [
            Candidate::new(2, "pdflatex: {"),
            Candidate::new(3, "--> shell: yes,"),
            Candidate::new(5, "  --> synctex: yes }"),
            Candidate::new(6, "makeindex"),
        ];

        let assembled = assemble(&candidates, &linebreak()).unwrap();

        assert_eq!(assembled.len(), 2);
        assert_eq!(assembled[0].line_numbers, vec![2, 3, 5]);
        assert_eq!(assembled[0].text(), "pdflatex: { shell: yes, synctex: yes }");
        assert_eq!(assembled[1].line_numbers, vec![6]);
    }

    #[test]
    fn test_orphan_continuation_names_its_line() {
        let candidates = [Candidate::new(8, "--> shell: yes }")];

        let err = assemble(&candidates, &linebreak()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::OrphanContinuation);
        assert_eq!(err.line_numbers(), &[8]);
    }

    #[test]
    fn test_marker_without_space_is_not_a_continuation() {
        let candidates = [Candidate::new(1, "pdflatex"), Candidate::new(2, "-->x")];
        let assembled = assemble(&candidates, &linebreak()).unwrap();
        assert_eq!(assembled.len(), 2);
    }

    #[test]
    fn test_no_candidates_yields_nothing() {
        assert!(assemble(&[], &linebreak()).unwrap().is_empty());
    }
}
