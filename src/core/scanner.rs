// src/core/scanner.rs

//! Finds the lines that carry a directive marker.

use regex::Regex;

/// A line that carries the directive marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// 1-based line number in the document.
    pub line: usize,
    /// Everything after the first marker match on that line.
    pub text: String,
}

impl Candidate {
    /// A candidate found on `line`.
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }
}

/// Yields one [`Candidate`] per line matching `marker`, in line order.
///
/// Only the first match of a line counts. An empty result is not an error
/// here; the extractor decides what it means.
pub fn scan<S: AsRef<str>>(lines: &[S], marker: &Regex) -> Vec<Candidate> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.as_ref();
            let found = marker.find(line)?;
            line.get(found.end()..)
                .map(|rest| Candidate::new(index + 1, rest))
        })
        .collect()
}
