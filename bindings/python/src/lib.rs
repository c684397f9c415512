//! Python bindings for juror-core.
//!
//! Structured arguments and results are JSON text; callers use
//! `json.loads` / `json.dumps` on their side.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde::Serialize;
use serde_json::Value;

fn parse(json: &str) -> PyResult<Value> {
    serde_json::from_str(json).map_err(|e| PyValueError::new_err(format!("invalid JSON: {}", e)))
}

fn dump<T: Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Rewrite scripting-literal text as JSON text.
#[pyfunction]
fn decode_literal(text: &str) -> String {
    juror_core::decode_literal(text)
}

/// JSON text of the mapping held by `text`, or `None`.
#[pyfunction]
fn probe_structured(text: &str) -> PyResult<Option<String>> {
    juror_core::probe_structured(text).map(|map| dump(&map)).transpose()
}

#[pyfunction]
#[pyo3(signature = (raw_json, context_hint=None))]
fn decode_value(raw_json: &str, context_hint: Option<&str>) -> PyResult<String> {
    dump(&juror_core::decode_value(&parse(raw_json)?, context_hint))
}

#[pyfunction]
#[pyo3(signature = (raw_json, metric_key_hint=None))]
fn normalize_signals(raw_json: &str, metric_key_hint: Option<&str>) -> PyResult<String> {
    dump(&juror_core::normalize_signals(&parse(raw_json)?, metric_key_hint))
}

#[pyfunction]
fn classify(raw_json: &str) -> PyResult<String> {
    let value = juror_core::decode_value(&parse(raw_json)?, None).into_value();
    dump(&juror_core::classify(&value))
}

#[pyfunction]
#[pyo3(signature = (record_json, reserved=Vec::new()))]
fn layout_record(record_json: &str, reserved: Vec<String>) -> PyResult<String> {
    let Value::Object(record) = parse(record_json)? else {
        return Err(PyValueError::new_err("record must be a JSON object"));
    };
    dump(&juror_core::layout_record(&record, &reserved))
}

#[pymodule]
fn juror(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(decode_literal, m)?)?;
    m.add_function(wrap_pyfunction!(probe_structured, m)?)?;
    m.add_function(wrap_pyfunction!(decode_value, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_signals, m)?)?;
    m.add_function(wrap_pyfunction!(classify, m)?)?;
    m.add_function(wrap_pyfunction!(layout_record, m)?)?;
    Ok(())
}
