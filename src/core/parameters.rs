// src/core/parameters.rs

//! Decodes the parameter block of a directive.
//!
//! The block is YAML flow markup (`{ shell: yes, files: [a.tex, b.tex] }`)
//! decoded into a [`Parameters`] tree. Scalars keep their source text:
//! `1.10`, `0x1F` and `yes` reach the rules exactly as written.
//!
//! Decoding takes two passes over the block. The first builds a
//! [`serde_yaml::Value`] only to learn the shape of the tree and to reject
//! malformed markup. The second walks the same text again, guided by that
//! shape, and reads every scalar as a string so that numbers are never
//! reformatted.

use crate::{
    core::error::DirectiveError,
    models::{DynamicValue, Parameters},
};
use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_yaml::Value;
use std::fmt;

/// Decodes a raw parameter block.
///
/// Absent or blank text decodes to an empty mapping.
///
/// # Errors
/// Returns [`DirectiveError::ParameterDecode`] carrying `lines` when the text is
/// not valid YAML, is not a mapping, or uses keys that are not scalars.
pub fn decode(text: Option<&str>, lines: &[usize]) -> Result<Parameters, DirectiveError> {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return Ok(Parameters::new());
    };

    let failure = |reason: String| DirectiveError::ParameterDecode {
        lines: lines.to_vec(),
        reason,
    };

    let value: Value = serde_yaml::from_str(text).map_err(|e| failure(e.to_string()))?;
    let shape = match strip_tags(&value) {
        Value::Null => return Ok(Parameters::new()),
        mapping @ Value::Mapping(_) => Shape::of(mapping).map_err(failure)?,
        _ => return Err(failure("expected a mapping of parameters".to_string())),
    };

    let decoded = RawValue(&shape)
        .deserialize(serde_yaml::Deserializer::from_str(text))
        .map_err(|e| failure(e.to_string()))?;
    match decoded {
        DynamicValue::Mapping(parameters) => Ok(parameters),
        _ => Err(failure("expected a mapping of parameters".to_string())),
    }
}

fn strip_tags(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => strip_tags(&tagged.value),
        other => other,
    }
}

/// The structure of a decoded block, without its scalar values.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Shape {
    Null,
    Scalar,
    Sequence(Vec<Shape>),
    /// Value shapes in document order.
    Mapping(Vec<Shape>),
}

impl Shape {
    fn of(value: &Value) -> Result<Self, String> {
        Ok(match strip_tags(value) {
            Value::Null => Shape::Null,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => Shape::Scalar,
            Value::Sequence(items) => {
                Shape::Sequence(items.iter().map(Shape::of).collect::<Result<_, _>>()?)
            }
            Value::Mapping(mapping) => {
                let mut values = Vec::with_capacity(mapping.len());
                for (key, value) in mapping {
                    if matches!(strip_tags(key), Value::Sequence(_) | Value::Mapping(_)) {
                        return Err("parameter names must be plain values".to_string());
                    }
                    values.push(Shape::of(value)?);
                }
                Shape::Mapping(values)
            }
            Value::Tagged(_) => Shape::Scalar,
        })
    }
}

/// Reads one node of the given shape, scalars as their source text.
struct RawValue<'s>(&'s Shape);

impl<'de> DeserializeSeed<'de> for RawValue<'_> {
    type Value = DynamicValue;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        match self.0 {
            Shape::Null => {
                IgnoredAny::deserialize(deserializer)?;
                Ok(DynamicValue::Scalar(String::new()))
            }
            Shape::Scalar => String::deserialize(deserializer).map(DynamicValue::Scalar),
            Shape::Sequence(items) => deserializer.deserialize_seq(SequenceVisitor(items)),
            Shape::Mapping(values) => deserializer.deserialize_map(MappingVisitor(values)),
        }
    }
}

struct SequenceVisitor<'s>(&'s [Shape]);

impl<'de> Visitor<'de> for SequenceVisitor<'_> {
    type Value = DynamicValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of parameter values")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(self.0.len());
        for shape in self.0 {
            match seq.next_element_seed(RawValue(shape))? {
                Some(item) => items.push(item),
                None => return Err(de::Error::invalid_length(items.len(), &self)),
            }
        }
        Ok(DynamicValue::Sequence(items))
    }
}

struct MappingVisitor<'s>(&'s [Shape]);

impl<'de> Visitor<'de> for MappingVisitor<'_> {
    type Value = DynamicValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of parameters")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut parameters = Parameters::new();
        for shape in self.0 {
            let Some(key) = map.next_key::<String>()? else {
                return Err(de::Error::invalid_length(parameters.len(), &self));
            };
            let value = map.next_value_seed(RawValue(shape))?;
            if parameters.contains_key(&key) {
                return Err(de::Error::custom(format!("duplicate parameter '{}'", key)));
            }
            parameters.insert(key, value);
        }
        Ok(DynamicValue::Mapping(parameters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    #[test]
    fn test_absent_and_blank_blocks_are_empty() {
        assert!(decode(None, &[1]).unwrap().is_empty());
        assert!(decode(Some("   "), &[1]).unwrap().is_empty());
        assert!(decode(Some("{}"), &[1]).unwrap().is_empty());
    }

    #[test]
    fn test_scalars_keep_their_text() {
        let params = decode(Some("{ shell: yes, passes: 2, draft: true }"), &[1]).unwrap();
        assert_eq!(params.get("shell"), Some(&DynamicValue::from("yes")));
        assert_eq!(params.get("passes"), Some(&DynamicValue::from("2")));
        assert_eq!(params.get("draft"), Some(&DynamicValue::from("true")));
    }

    #[test]
    fn test_numeric_looking_scalars_are_not_reformatted() {
        let params = decode(
            Some("{ version: 1.10, mode: 0x1F, big: 1e3, files: [2024.10, 007], 08: eight }"),
            &[1],
        )
        .unwrap();

        assert_eq!(params.get("version"), Some(&DynamicValue::from("1.10")));
        assert_eq!(params.get("mode"), Some(&DynamicValue::from("0x1F")));
        assert_eq!(params.get("big"), Some(&DynamicValue::from("1e3")));
        assert_eq!(
            params.get("files"),
            Some(&DynamicValue::Sequence(vec![
                DynamicValue::from("2024.10"),
                DynamicValue::from("007"),
            ]))
        );
        assert_eq!(params.get("08"), Some(&DynamicValue::from("eight")));
    }

    #[test]
    fn test_nested_sequences_and_mappings() {
        let params = decode(
            Some("{ files: [a.tex, 'b c.tex'], options: { engine: xetex, flags: [-a] } }"),
            &[1],
        )
        .unwrap();

        let files = params.get("files").and_then(DynamicValue::as_sequence).unwrap();
        assert_eq!(files, &[DynamicValue::from("a.tex"), DynamicValue::from("b c.tex")]);

        let options = params.get("options").and_then(DynamicValue::as_mapping).unwrap();
        assert_eq!(options.get("engine"), Some(&DynamicValue::from("xetex")));
        assert_eq!(
            options.get("flags"),
            Some(&DynamicValue::Sequence(vec![DynamicValue::from("-a")]))
        );
    }

    #[test]
    fn test_null_decodes_to_empty_text() {
        let params = decode(Some("{ target: ~, other: null }"), &[1]).unwrap();
        assert_eq!(params.get("target"), Some(&DynamicValue::from("")));
        assert_eq!(params.get("other"), Some(&DynamicValue::from("")));
    }

    #[test]
    fn test_malformed_block_carries_lines() {
        let err = decode(Some("{ shell: [yes }"), &[3, 4]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParameterDecode);
        assert_eq!(err.line_numbers(), &[3, 4]);
    }

    #[test]
    fn test_non_mapping_block_is_rejected() {
        let err = decode(Some("[a, b]"), &[2]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParameterDecode);
    }

    #[test]
    fn test_complex_keys_are_rejected() {
        let err = decode(Some("{ [a, b]: c }"), &[2]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParameterDecode);
    }
}
