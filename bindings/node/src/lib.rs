//! Node.js bindings for juror-core.
//!
//! Values cross the boundary as plain JS values through napi's serde
//! support; results use the same JSON shapes the CLI prints.

use napi::{Error, Result};
use napi_derive::napi;
use serde::Serialize;
use serde_json::Value;

fn to_js<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::from_reason(e.to_string()))
}

#[napi(js_name = "decodeLiteral")]
pub fn decode_literal(text: String) -> String {
    juror_core::decode_literal(&text)
}

/// Returns the mapping held by `text`, or `null`.
#[napi(js_name = "probeStructured")]
pub fn probe_structured(text: String) -> Option<Value> {
    juror_core::probe_structured(&text).map(Value::Object)
}

#[napi(js_name = "decodeValue")]
pub fn decode_value(raw: Value, context_hint: Option<String>) -> Result<Value> {
    to_js(&juror_core::decode_value(&raw, context_hint.as_deref()))
}

#[napi(js_name = "normalizeSignals")]
pub fn normalize_signals(raw: Value, metric_key_hint: Option<String>) -> Result<Value> {
    to_js(&juror_core::normalize_signals(&raw, metric_key_hint.as_deref()))
}

/// Classifies a raw value after decoding it.
#[napi]
pub fn classify(raw: Value) -> Result<Value> {
    let value = juror_core::decode_value(&raw, None).into_value();
    to_js(&juror_core::classify(&value))
}

#[napi(js_name = "layoutRecord")]
pub fn layout_record(record: Value, reserved: Option<Vec<String>>) -> Result<Value> {
    let Value::Object(record) = record else {
        return Err(Error::from_reason("record must be an object"));
    };
    to_js(&juror_core::layout_record(&record, &reserved.unwrap_or_default()))
}
