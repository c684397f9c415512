//! Coercion of upstream values into signals.
//!
//! Upstream judges disagree on field names, so signal-shaped mappings are
//! read through alias lists. The first alias present wins.

use serde_json::{Map, Value};

use super::score::{explicit_score, infer_score, VERDICT_KEY};
use super::Signal;
use crate::probe::non_blank_lines;

const NAME_KEYS: [&str; 5] = ["name", "signal", "key", "label", "title"];
const VALUE_KEYS: [&str; 3] = ["value", "result", "output"];
const SCORE_KEYS: [&str; 2] = ["score", "confidence"];
const DESCRIPTION_KEYS: [&str; 4] = ["description", "reason", "reasoning", "explanation"];
const HEADLINE_KEYS: [&str; 2] = ["headline", "is_headline"];

/// Label for an unnamed signal at `index` (1-based in the label).
pub fn position_label(index: usize) -> String {
    format!("#{}", index + 1)
}

/// Coerce a group's value into its signals.
pub(crate) fn coerce_signals(value: &Value) -> Vec<Signal> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| element_signal(index, item))
            .collect(),
        Value::Object(map) if looks_like_signal(map) => vec![object_signal(0, map)],
        Value::Object(map) => pair_signals(map),
        Value::String(text) => line_signals(text),
        Value::Bool(_) | Value::Number(_) => vec![Signal::new(position_label(0), value.clone())],
        Value::Null => Vec::new(),
    }
}

/// One signal per key/value pair, with inferred scores.
pub(crate) fn pair_signals(map: &Map<String, Value>) -> Vec<Signal> {
    map.iter()
        .map(|(key, value)| Signal::new(key.clone(), value.clone()).with_score(infer_score(key, value)))
        .collect()
}

/// One unscored signal per non-blank line.
pub(crate) fn line_signals(text: &str) -> Vec<Signal> {
    non_blank_lines(text)
        .into_iter()
        .enumerate()
        .map(|(index, line)| Signal::new(position_label(index), Value::String(line)))
        .collect()
}

/// A sequence element: mappings are read as signals, anything else is kept
/// as the value of a positionally named signal.
pub(crate) fn element_signal(index: usize, item: &Value) -> Signal {
    match item {
        Value::Object(map) => object_signal(index, map),
        _ => Signal::new(position_label(index), item.clone()),
    }
}

fn looks_like_signal(map: &Map<String, Value>) -> bool {
    first_present(map, &NAME_KEYS).is_some()
        && (first_present(map, &VALUE_KEYS).is_some() || first_present(map, &SCORE_KEYS).is_some())
}

fn object_signal(index: usize, map: &Map<String, Value>) -> Signal {
    let name_entry = first_present(map, &NAME_KEYS);
    let value_entry = first_present(map, &VALUE_KEYS);
    let score_entry = first_present(map, &SCORE_KEYS);
    let description_entry = first_present(map, &DESCRIPTION_KEYS);
    let headline_entry = first_present(map, &HEADLINE_KEYS);

    let name = match name_entry {
        Some((_, Value::String(name))) => name.clone(),
        Some((_, Value::Number(n))) => n.to_string(),
        _ => position_label(index),
    };

    let value = match value_entry {
        Some((_, value)) => value.clone(),
        None => {
            let consumed = [name_entry, score_entry, description_entry, headline_entry];
            let remainder: Map<String, Value> = map
                .iter()
                .filter(|(key, _)| {
                    !consumed
                        .iter()
                        .flatten()
                        .any(|(used, _)| *used == key.as_str())
                })
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            if remainder.is_empty() {
                Value::Null
            } else {
                Value::Object(remainder)
            }
        }
    };

    let score = score_entry
        .and_then(|(_, score)| explicit_score(score))
        .or_else(|| infer_score(&name, &value))
        .or_else(|| map.get(VERDICT_KEY).and_then(|verdict| infer_score(VERDICT_KEY, verdict)));

    let description = match description_entry {
        Some((_, Value::String(text))) => Some(text.clone()),
        _ => None,
    };

    let headline = matches!(headline_entry, Some((_, Value::Bool(true))));

    Signal::new(name, value)
        .with_score(score)
        .with_description(description)
        .with_headline(headline)
}

fn first_present<'a>(map: &'a Map<String, Value>, keys: &[&'static str]) -> Option<(&'static str, &'a Value)> {
    keys.iter()
        .find_map(|key| map.get(*key).map(|value| (*key, value)))
}
