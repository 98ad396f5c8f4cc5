//! Nightingale: a directive-driven build automation tool.
//!
//! Documents carry build instructions inside comments (`% arara: pdflatex`).
//! The library scans a document for those directives, stitches continuation
//! lines, parses each directive against the directive grammar, decodes its
//! parameter block and validates the result before it is handed to a rule
//! engine.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod cli;
pub mod constants;
pub mod core;
pub mod i18n;
pub mod models;
