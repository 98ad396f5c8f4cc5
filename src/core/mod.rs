// src/core/mod.rs

//! The directive pipeline: scan, assemble, parse, decode and validate.

pub mod assembler;
pub mod command;
pub mod config;
pub mod discovery;
pub mod document;
pub mod error;
pub mod extractor;
pub mod grammar;
pub mod observer;
pub mod parameters;
pub mod paths;
pub mod scanner;
pub mod settings;
pub mod validator;
