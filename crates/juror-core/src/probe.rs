//! Value Prober
//!
//! Turns raw field values into structured values. Text is parsed as JSON
//! first and, failing that, run through the literal decoder and parsed
//! again. The first success wins; a miss is never an error.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::literal::decode_literal;

/// Maximum number of nested encodings unwrapped by [`decode_value`].
///
/// A string leaf that itself holds structured text counts as one level.
pub const MAX_DECODE_DEPTH: usize = 8;

/// Field name used for each record produced from newline-delimited text.
pub const LINE_FIELD: &str = "line";

lazy_static! {
    /// Text whose first non-blank character opens a mapping or sequence.
    static ref STRUCTURED_PREFIX: Regex = Regex::new(r"^\s*[\[{]").unwrap();
}

/// Result of [`decode_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Decoded {
    /// A structured value (mapping, sequence, or primitive).
    Structured(Value),

    /// Plain text with several non-blank lines, one entry per line.
    Lines(Vec<String>),

    /// Text that could not be decoded, passed through unchanged.
    Text(String),
}

impl Decoded {
    /// Whether decoding produced a structured value.
    pub fn is_structured(&self) -> bool {
        matches!(self, Decoded::Structured(_))
    }

    /// Collapse into a single value.
    ///
    /// `Lines` become a sequence of single-field records
    /// (`{"line": "..."}`); `Text` becomes a string.
    pub fn into_value(self) -> Value {
        match self {
            Decoded::Structured(value) => value,
            Decoded::Lines(lines) => Value::Array(
                lines
                    .into_iter()
                    .map(|line| {
                        let mut record = Map::new();
                        record.insert(LINE_FIELD.to_string(), Value::String(line));
                        Value::Object(record)
                    })
                    .collect(),
            ),
            Decoded::Text(text) => Value::String(text),
        }
    }
}

/// Probe text for a keyed mapping.
///
/// Returns `None` immediately unless the trimmed text starts with `{`.
/// Otherwise tries JSON, then literal-decoded JSON, accepting only a
/// top-level mapping. String leaves are returned exactly as parsed.
pub fn probe_structured(text: &str) -> Option<Map<String, Value>> {
    let trimmed = text.trim();
    if !trimmed.starts_with('{') {
        return None;
    }

    if let Some(Value::Object(map)) = parse_json(trimmed) {
        return Some(map);
    }

    match parse_json(&decode_literal(trimmed)) {
        Some(Value::Object(map)) => Some(map),
        _ => {
            trace!("probe miss: text is not a mapping");
            None
        }
    }
}

/// Decode a raw field value.
///
/// Non-text values are returned as [`Decoded::Structured`] with every
/// string leaf that holds structured text decoded in place. Text is parsed
/// with the same two-stage strategy as [`probe_structured`] but any
/// top-level shape is accepted, including a bare primitive such as `None`
/// or `0.5`. Text with no structural prefix and several non-blank lines is
/// reported as [`Decoded::Lines`].
///
/// `context_hint` names the field being decoded and is only used for
/// diagnostics.
pub fn decode_value(raw: &Value, context_hint: Option<&str>) -> Decoded {
    let decoded = match raw {
        Value::String(text) => decode_text(text, 0),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            Decoded::Structured(decode_leaves(raw.clone(), 0))
        }
    };

    debug!(
        field = context_hint.unwrap_or("-"),
        structured = decoded.is_structured(),
        "decoded field value"
    );

    decoded
}

/// Whether a string looks like it holds an encoded mapping or sequence.
pub fn looks_structured(text: &str) -> bool {
    STRUCTURED_PREFIX.is_match(text)
}

fn decode_text(text: &str, depth: usize) -> Decoded {
    if depth >= MAX_DECODE_DEPTH {
        return Decoded::Text(text.to_string());
    }

    let trimmed = text.trim();

    if looks_structured(trimmed) {
        if let Some(value) = parse_any(trimmed) {
            return Decoded::Structured(decode_leaves(value, depth + 1));
        }
    } else if trimmed.starts_with('"') {
        // Double-encoded payload: a JSON string wrapping a mapping or sequence.
        if let Some(Value::String(inner)) = parse_json(trimmed) {
            let unwrapped = decode_text(&inner, depth + 1);
            if matches!(unwrapped, Decoded::Structured(Value::Array(_) | Value::Object(_))) {
                return unwrapped;
            }
        }
    }

    let lines = non_blank_lines(text);
    if lines.len() > 1 {
        return Decoded::Lines(lines);
    }

    // Bare primitives: `null`, `None`, `NaN`, `0.5`, `True`.
    match parse_any(trimmed) {
        Some(value @ (Value::Null | Value::Bool(_) | Value::Number(_))) => Decoded::Structured(value),
        _ => Decoded::Text(text.to_string()),
    }
}

fn decode_leaves(value: Value, depth: usize) -> Value {
    match value {
        Value::String(text) if looks_structured(&text) => match decode_text(&text, depth) {
            Decoded::Structured(decoded) => decoded,
            Decoded::Lines(_) | Decoded::Text(_) => Value::String(text),
        },
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| decode_leaves(item, depth))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, decode_leaves(item, depth)))
                .collect(),
        ),
        other => other,
    }
}

/// Non-blank lines of `text`, with trailing carriage returns removed.
pub(crate) fn non_blank_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_any(text: &str) -> Option<Value> {
    parse_json(text).or_else(|| parse_json(&decode_literal(text)))
}

fn parse_json(text: &str) -> Option<Value> {
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(e) => {
            trace!(error = %e, "json parse miss");
            None
        }
    }
}
