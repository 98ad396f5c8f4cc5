// src/core/validator.rs

//! Enforces the reserved parameters and expands multi-file directives.
//!
//! Every directive leaves validation with a `file` parameter:
//! - `file` written by the user is rejected, it is reserved.
//! - `files: [a, b]` fans the directive out, one copy per file, in list order.
//! - otherwise `file` is the document in scope.

use crate::{
    constants::{FILES_KEY, FILE_KEY},
    core::{config::PipelineConfig, error::DirectiveError, observer::PipelineObserver, paths},
    models::{Directive, DynamicValue},
};

/// Validates and expands `directives`, preserving encounter order.
///
/// Directives that already went through validation are passed through
/// unchanged, so validating a validated list is a no-op.
///
/// # Errors
/// Fails on the first offending directive with
/// [`DirectiveError::ReservedKey`], [`DirectiveError::FilesNotList`] or
/// [`DirectiveError::EmptyFilesList`].
pub fn validate(
    directives: Vec<Directive>,
    config: &PipelineConfig,
    observer: &mut dyn PipelineObserver,
) -> Result<Vec<Directive>, DirectiveError> {
    let mut result = Vec::with_capacity(directives.len());
    for directive in directives {
        result.extend(expand(directive, config)?);
    }
    observer.directives_validated(&result);
    Ok(result)
}

/// Validates a single directive, returning the directives it expands into.
pub fn expand(
    mut directive: Directive,
    config: &PipelineConfig,
) -> Result<Vec<Directive>, DirectiveError> {
    if directive.resolved {
        return Ok(vec![directive]);
    }

    if directive.parameters.contains_key(FILE_KEY) {
        return Err(DirectiveError::ReservedKey {
            lines: directive.line_numbers,
        });
    }

    let Some(files) = directive.parameters.remove(FILES_KEY) else {
        let reference = config.reference.to_string_lossy().into_owned();
        directive
            .parameters
            .insert(FILE_KEY.to_string(), DynamicValue::Scalar(reference));
        directive.resolved = true;
        return Ok(vec![directive]);
    };

    let files = match files {
        DynamicValue::Sequence(files) => files,
        DynamicValue::Scalar(_) | DynamicValue::Mapping(_) => {
            return Err(DirectiveError::FilesNotList {
                lines: directive.line_numbers,
            });
        }
    };
    if files.is_empty() {
        return Err(DirectiveError::EmptyFilesList {
            lines: directive.line_numbers,
        });
    }

    let expanded = files
        .iter()
        .map(|file| {
            let path = paths::canonicalize(&config.base_dir, &file.text());
            let mut parameters = directive.parameters.clone();
            parameters.insert(
                FILE_KEY.to_string(),
                DynamicValue::Scalar(path.to_string_lossy().into_owned()),
            );
            Directive {
                identifier: directive.identifier.clone(),
                parameters,
                conditional: directive.conditional.clone(),
                line_numbers: directive.line_numbers.clone(),
                resolved: true,
            }
        })
        .collect();
    Ok(expanded)
}
