// File: src/parsers/mod.rs

pub mod json;

use crate::error::RecordError;
use serde_json::Value;

/// Result of looking at one input line.
#[derive(Debug, PartialEq)]
pub enum LineOutcome {
    /// Empty or whitespace-only; produces nothing.
    Blank,
    /// A parsed JSON object.
    Record(Value),
}

/// Parses a single NDJSON line into a record.
///
/// Surrounding whitespace is ignored. Anything other than a JSON object is an
/// error, including valid JSON scalars and arrays.
pub fn parse_record_line(line: &str) -> Result<LineOutcome, RecordError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(LineOutcome::Blank);
    }

    let value = json::parse_json_line(trimmed)?;
    if !value.is_object() {
        return Err(RecordError::NotAnObject(kind_of(&value)));
    }
    Ok(LineOutcome::Record(value))
}

/// Returns `record[field]` when it is a JSON string, `default` otherwise.
///
/// Absent fields, `null`, numbers, booleans, arrays and objects all fall back to
/// `default`; nothing is stringified.
pub fn text_or_default<'a>(record: &'a Value, field: &str, default: &'a str) -> &'a str {
    record.get(field).and_then(Value::as_str).unwrap_or(default)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
