//! Score inference for key/value signals.

use serde_json::Value;

/// Key whose yes/no text form maps onto a 1/0 score.
pub const VERDICT_KEY: &str = "verdict";

/// Infer a confidence score for a `(key, value)` pair.
///
/// Precedence:
/// 1. A numeric value in `[0, 1]` is used directly.
/// 2. Under the `verdict` key, `yes`/`true` score 1 and `no`/`false` score 0
///    (case-insensitive, booleans included).
/// 3. Anything else has no score. Verdicts such as `unsure` or `n/a` stay
///    unscored.
pub fn infer_score(key: &str, value: &Value) -> Option<f64> {
    if let Some(score) = unit_score(value) {
        return Some(score);
    }

    if key != VERDICT_KEY {
        return None;
    }

    let text = match value {
        Value::String(s) => s.trim().to_lowercase(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Number(_) | Value::Array(_) | Value::Object(_) => return None,
    };

    match text.as_str() {
        "yes" | "true" => Some(1.0),
        "no" | "false" => Some(0.0),
        _ => None,
    }
}

/// A number in `[0, 1]`, or `None`.
pub(crate) fn unit_score(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .filter(|score| (0.0..=1.0).contains(score))
}

/// Read an explicit score field.
///
/// Accepts numbers and numeric strings in `[0, 1]`, and booleans as 1/0.
pub(crate) fn explicit_score(value: &Value) -> Option<f64> {
    match value {
        Value::Number(_) => unit_score(value),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|score| (0.0..=1.0).contains(score)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
