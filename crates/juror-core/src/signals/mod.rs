//! Signal Normalizer
//!
//! Turns a raw judge "signals" payload into an ordered list of
//! [`SignalGroup`]s.
//!
//! ## Rules
//!
//! Checked in order, first match wins:
//!
//! | # | Input | Result |
//! |---|-------|--------|
//! | 1 | text | decoded and normalized again; undecodable text becomes a `logs` group, one signal per non-blank line |
//! | 2 | mapping + metric hint | the entry under the hint (or its `_score`-stripped / `_signals` forms) is normalized instead |
//! | 3 | mapping with group markers | each key is a group |
//! | 4 | any other mapping | one `overall` group, one signal per pair, scores inferred |
//! | 5 | sequence | one `signals` group |
//! | 6 | anything else | nothing |
//!
//! Groups without signals are dropped and `overall` is moved to the front.
//! Everything else keeps source order.

mod coerce;
mod order;
mod score;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::probe::{decode_value, Decoded};

pub use coerce::position_label;
pub use order::{order_groups, order_signals};
pub use score::{infer_score, VERDICT_KEY};

/// Group synthesized from a plain key/value mapping.
pub const OVERALL_GROUP: &str = "overall";

/// Group synthesized from undecodable text.
pub const LOGS_GROUP: &str = "logs";

/// Group synthesized from a sequence.
pub const SIGNALS_GROUP: &str = "signals";

/// Prefix of per-statement group keys (`statement_1`, `statement_2 (...)`).
pub const STATEMENT_GROUP_PREFIX: &str = "statement_";

/// Exact keys that mark a mapping as already grouped.
const GROUP_MARKERS: [&str; 3] = [OVERALL_GROUP, SIGNALS_GROUP, LOGS_GROUP];

const SCORE_SUFFIX: &str = "_score";
const SIGNALS_SUFFIX: &str = "_signals";

/// One named, optionally scored observation from a judge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    name: String,
    value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    headline: bool,
}

impl Signal {
    pub(crate) fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            score: None,
            description: None,
            headline: false,
        }
    }

    pub(crate) fn with_score(mut self, score: Option<f64>) -> Self {
        self.score = score;
        self
    }

    pub(crate) fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub(crate) fn with_headline(mut self, headline: bool) -> Self {
        self.headline = headline;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Confidence in `[0, 1]`, if known.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_headline(&self) -> bool {
        self.headline
    }
}

/// A named, ordered bundle of signals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalGroup {
    name: String,
    signals: Vec<Signal>,
}

impl SignalGroup {
    pub(crate) fn new(name: impl Into<String>, signals: Vec<Signal>) -> Self {
        Self {
            name: name.into(),
            signals,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Signals in source order.
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// A copy with signals in display order (see [`order_signals`]).
    pub fn ordered(&self) -> Self {
        let mut signals = self.signals.clone();
        order_signals(&mut signals);
        Self {
            name: self.name.clone(),
            signals,
        }
    }
}

/// Normalize a raw signals payload.
///
/// Total: never panics, returns an empty list when nothing usable is found.
/// `metric_key_hint` is the metric under evaluation and is used to unwrap
/// payloads nested per metric name.
pub fn normalize_signals(raw: &Value, metric_key_hint: Option<&str>) -> Vec<SignalGroup> {
    let mut groups: Vec<SignalGroup> = normalize(raw, metric_key_hint)
        .into_iter()
        .filter(|group| !group.is_empty())
        .collect();
    order_groups(&mut groups);
    groups
}

fn normalize(raw: &Value, hint: Option<&str>) -> Vec<SignalGroup> {
    let value = match decode_value(raw, hint) {
        Decoded::Structured(value) => value,
        Decoded::Lines(lines) => return vec![log_group(&lines.join("\n"))],
        Decoded::Text(text) => return vec![log_group(&text)],
    };

    match &value {
        Value::Object(map) => {
            if let Some((key, nested)) = hint.and_then(|hint| lookup_metric(map, hint)) {
                debug!(key = %key, "signals nested under metric key");
                return normalize(nested, None);
            }

            if is_grouped_signal_mapping(map) {
                debug!(groups = map.len(), "signals already grouped");
                map.iter()
                    .map(|(name, group)| SignalGroup::new(name.clone(), coerce::coerce_signals(group)))
                    .collect()
            } else {
                debug!("signals synthesized into overall group");
                vec![SignalGroup::new(OVERALL_GROUP, coerce::pair_signals(map))]
            }
        }
        Value::Array(items) => {
            debug!(items = items.len(), "signals synthesized from sequence");
            let signals = items
                .iter()
                .enumerate()
                .map(|(index, item)| coerce::element_signal(index, item))
                .collect();
            vec![SignalGroup::new(SIGNALS_GROUP, signals)]
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Vec::new(),
    }
}

fn log_group(text: &str) -> SignalGroup {
    SignalGroup::new(LOGS_GROUP, coerce::line_signals(text))
}

/// Whether a mapping is already keyed by signal group.
///
/// True when any key is `overall`, `signals`, `logs`, starts with
/// `statement_`, or holds a non-empty sequence of mappings.
pub fn is_grouped_signal_mapping(map: &Map<String, Value>) -> bool {
    map.iter().any(|(key, value)| {
        GROUP_MARKERS.contains(&key.as_str())
            || key.starts_with(STATEMENT_GROUP_PREFIX)
            || is_sequence_of_mappings(value)
    })
}

fn is_sequence_of_mappings(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty() && items.iter().all(Value::is_object),
        _ => false,
    }
}

/// Find the payload nested under a metric name.
///
/// Tries `hint`, then `hint` without a trailing `_score`, then that stem
/// with `_signals` appended. The first key present wins, whatever it holds.
fn lookup_metric<'a>(map: &'a Map<String, Value>, hint: &str) -> Option<(String, &'a Value)> {
    let stem = hint.strip_suffix(SCORE_SUFFIX).unwrap_or(hint);
    let candidates = [hint.to_string(), stem.to_string(), format!("{}{}", stem, SIGNALS_SUFFIX)];

    candidates
        .into_iter()
        .find_map(|key| map.get(&key).map(|value| (key, value)))
}
