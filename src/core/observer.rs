// src/core/observer.rs

//! Event sink for notable pipeline events.
//!
//! The pipeline itself never logs; it reports to a [`PipelineObserver`].

use crate::models::Directive;

/// Receives notable pipeline events. Every method defaults to a no-op.
pub trait PipelineObserver {
    /// A line carrying the directive marker was found.
    fn candidate_found(&mut self, _line: usize, _text: &str) {}

    /// A logical directive was parsed.
    fn directive_found(&mut self, _directive: &Directive) {}

    /// Validation finished; `directives` is the final list.
    fn directives_validated(&mut self, _directives: &[Directive]) {}
}

/// Ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl PipelineObserver for LogObserver {
    fn candidate_found(&mut self, line: usize, text: &str) {
        log::info!(t!("log.candidate"), line = line, text = text);
    }

    fn directive_found(&mut self, directive: &Directive) {
        log::info!(t!("log.directive"), directive = directive);
    }

    fn directives_validated(&mut self, directives: &[Directive]) {
        log::info!(t!("log.validated"), count = directives.len());
        for directive in directives {
            log::info!("{}", directive);
        }
    }
}
