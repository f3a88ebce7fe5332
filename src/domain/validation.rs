//! Schema and range rules for a generated commit description.
//!
//! The rules run against the raw JSON value rather than a typed struct so the
//! exact same check can be applied to a fresh model response and to a
//! [`CommitInfo`](crate::domain::commit_info::CommitInfo) that is about to be
//! printed or committed.

use std::fmt;
use std::ops::RangeInclusive;

use serde_json::{Number, Value};
use thiserror::Error;

pub const SCORE_RANGE: RangeInclusive<i64> = 1..=5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    List,
    Integer,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "string"),
            FieldKind::List => write!(f, "array of strings"),
            FieldKind::Integer => write!(f, "integer"),
        }
    }
}

/// Every field a commit description must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [(&str, FieldKind); 8] = [
    ("message", FieldKind::Text),
    ("small_description", FieldKind::List),
    ("large_description", FieldKind::List),
    ("file_changes", FieldKind::List),
    ("issue", FieldKind::List),
    ("solution", FieldKind::List),
    ("impact", FieldKind::Integer),
    ("priority", FieldKind::Integer),
];

const SCORED_FIELDS: [&str; 2] = ["impact", "priority"];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("incorrect type for field '{field}': expected {expected}, got {found}")]
    WrongType {
        field: &'static str,
        expected: FieldKind,
        found: &'static str,
    },
    #[error("invalid value for '{field}': {value}, it should be between 1 and 5")]
    OutOfRange { field: &'static str, value: Number },
}

/// Check `value` against the commit description schema, stopping at the first problem.
pub fn check(value: &Value) -> Result<(), ValidationError> {
    let object = value
        .as_object()
        .ok_or(ValidationError::NotAnObject(type_name(value)))?;

    for (field, kind) in REQUIRED_FIELDS {
        let entry = object
            .get(field)
            .ok_or(ValidationError::MissingField(field))?;
        if !matches_kind(entry, kind) {
            return Err(ValidationError::WrongType {
                field,
                expected: kind,
                found: type_name(entry),
            });
        }
    }

    for field in SCORED_FIELDS {
        if let Some(Value::Number(number)) = object.get(field) {
            let in_range = number
                .as_i64()
                .is_some_and(|score| SCORE_RANGE.contains(&score));
            if !in_range {
                return Err(ValidationError::OutOfRange {
                    field,
                    value: number.clone(),
                });
            }
        }
    }

    Ok(())
}

fn matches_kind(value: &Value, kind: FieldKind) -> bool {
    match (kind, value) {
        (FieldKind::Text, Value::String(_)) => true,
        (FieldKind::List, Value::Array(items)) => items.iter().all(Value::is_string),
        (FieldKind::Integer, Value::Number(number)) => number.is_i64() || number.is_u64(),
        _ => false,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(items) if items.iter().all(Value::is_string) => "array of strings",
        Value::Array(_) => "array with non-string entries",
        Value::Object(_) => "object",
    }
}
