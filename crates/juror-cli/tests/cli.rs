use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::io::Write;
use tempfile::NamedTempFile;

fn cmd() -> Command {
    Command::cargo_bin("juror").unwrap()
}

fn file_with(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn literal_from_stdin() {
    cmd()
        .arg("literal")
        .write_stdin("{'a': None, 'b': True}\n")
        .assert()
        .success()
        .stdout(contains(r#"{"a": null, "b": true}"#));
}

#[test]
fn probe_mapping() {
    cmd()
        .arg("probe")
        .write_stdin("{'score': 0.5}")
        .assert()
        .success()
        .stdout(contains(r#"{"score":0.5}"#));
}

#[test]
fn probe_miss_exits_one() {
    cmd()
        .arg("probe")
        .write_stdin("just some text")
        .assert()
        .code(1)
        .stdout(contains("null"));
}

#[test]
fn decode_with_hint() {
    cmd()
        .args(["decode", "--hint", "output"])
        .write_stdin("[1, 2]")
        .assert()
        .success()
        .stdout(contains(r#""kind":"structured""#));
}

#[test]
fn signals_log_fallback() {
    let input = file_with("first line\n\nsecond line\n");
    cmd()
        .arg("signals")
        .arg(input.path())
        .assert()
        .success()
        .stdout(contains(r#""name":"logs""#))
        .stdout(contains("second line"));
}

#[test]
fn signals_metric_hint() {
    cmd()
        .args(["signals", "--json-input", "--metric", "faithfulness_score"])
        .write_stdin(r#"{"faithfulness": {"verdict": "no"}, "relevancy": {"verdict": "yes"}}"#)
        .assert()
        .success()
        .stdout(contains(r#""score":0.0"#))
        .stdout(contains("relevancy").not());
}

#[test]
fn classify_mapping() {
    cmd()
        .arg("classify")
        .write_stdin("{'score': 0.9, 'notes': 'fine'}")
        .assert()
        .success()
        .stdout(contains(r#""kind":"mapping""#));
}

#[test]
fn record_reserved_fields() {
    cmd()
        .args(["record", "--reserved", "id,signals"])
        .write_stdin(r#"{"id": 7, "signals": "x", "latency": 12}"#)
        .assert()
        .success()
        .stdout(contains(r#""label":"latency""#))
        .stdout(contains(r#""label":"id""#).not());
}

#[test]
fn record_rejects_non_mapping() {
    cmd()
        .arg("record")
        .write_stdin("[1, 2, 3]")
        .assert()
        .code(2)
        .stderr(contains("input is not a mapping"));
}

#[test]
fn config_applies_reserved_fields() {
    let config = file_with("record:\n  reserved_fields: [latency]\n");
    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("record")
        .write_stdin(r#"{"latency": 12, "model": "m"}"#)
        .assert()
        .success()
        .stdout(contains(r#""label":"model""#))
        .stdout(contains("latency").not());
}

#[test]
fn invalid_config_exits_two() {
    let config = file_with("classifier:\n  unknown_knob: 1\n");
    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("literal")
        .write_stdin("None")
        .assert()
        .code(2)
        .stderr(contains("error:"));
}

#[test]
fn signals_bare_primitive_is_empty() {
    cmd()
        .arg("signals")
        .write_stdin("None\n")
        .assert()
        .success()
        .stdout("[]\n");
}
