//! Behavioural properties of the decoding pipeline.

use juror_core::{
    classify, decode_literal, decode_value, layout_record, normalize_signals, probe_structured,
    PresentationKind, PresentationNode,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-1.0e6f64..1.0e6).prop_map(|f| json!(f)),
        "[a-zA-Z0-9 _'.-]{0,24}".prop_map(Value::String),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z_]{1,8}", inner), 0..6)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn arb_mapping() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::vec(("[a-z_]{1,8}", arb_value()), 0..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn max_depth(node: &PresentationNode) -> usize {
    node.children
        .iter()
        .map(|child| 1 + max_depth(&child.node))
        .max()
        .unwrap_or(0)
}

#[test]
fn literal_equivalence() {
    let decoded = decode_literal(r#"{'a': None, 'b': True, 'c': 1.5, 'd': "q\'s"}"#);
    let value: Value = serde_json::from_str(&decoded).unwrap();
    assert_eq!(value, json!({"a": null, "b": true, "c": 1.5, "d": "q's"}));
}

#[test]
fn log_fallback() {
    let groups = normalize_signals(&json!("line one\nline two\n\n"), None);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name(), "logs");
    assert_eq!(groups[0].len(), 2);
    assert_eq!(groups[0].signals()[0].value(), &json!("line one"));
    assert_eq!(groups[0].signals()[1].value(), &json!("line two"));
}

#[test]
fn verdict_scoring() {
    let groups = normalize_signals(&json!({"verdict": "Yes", "reason": "ok"}), None);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name(), "overall");
    assert_eq!(groups[0].len(), 2);
    let verdict = groups[0]
        .signals()
        .iter()
        .find(|s| s.name() == "verdict")
        .unwrap();
    assert_eq!(verdict.score(), Some(1.0));
}

#[test]
fn depth_cap() {
    let value = json!({"a": {"b": {"c": {"d": {"e": "deep"}}}}});
    let root = classify(&value);
    let level3 = &root.children[0].node.children[0].node;
    assert_eq!(level3.kind, PresentationKind::Mapping);
    let level4 = &level3.children[0].node;
    assert_eq!(level4.kind, PresentationKind::Truncated);
    assert!(level4.children.is_empty());
}

#[test]
fn malformed_corpus_never_panics() {
    let corpus = [
        "{'a': 'unterminated",
        "[1, 2, {'x': }",
        "{\"a\": [1, 2}",
        "NONE true FaLsE nAn",
        "'''\"\"\"",
        "\\",
        "{'a': \\'b\\'}",
        "[[[[[[[[[[",
        "}}}]]]",
        "{'k': None, 'v': True, 'n': NaN}",
        "line\n\n\nline\r\n",
        "\u{0}\u{1}\u{7f}",
        "",
    ];

    for text in corpus {
        let raw = Value::String(text.to_string());
        let decoded = decode_literal(text);
        let _ = probe_structured(text);
        let _ = probe_structured(&decoded);
        let value = decode_value(&raw, None).into_value();
        let _ = classify(&value);
        for group in normalize_signals(&raw, Some("metric_score")) {
            for signal in group.signals() {
                if let Some(score) = signal.score() {
                    assert!((0.0..=1.0).contains(&score));
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn decode_literal_idempotent(text in "\\PC{0,80}") {
        let once = decode_literal(&text);
        prop_assert_eq!(decode_literal(&once), once);
    }

    #[test]
    fn probe_round_trips_json_mappings(map in arb_mapping()) {
        let text = serde_json::to_string(&Value::Object(map.clone())).unwrap();
        prop_assert_eq!(probe_structured(&text), Some(map));
    }

    #[test]
    fn overall_group_always_first(
        names in prop::collection::vec("statement_[0-9]{1,2}|logs|signals|claims", 1..5),
        overall_at in 0usize..5,
    ) {
        let mut map = Map::new();
        for (index, name) in names.iter().enumerate() {
            if index == overall_at {
                map.insert("overall".to_string(), json!([{"name": "verdict", "value": "yes"}]));
            }
            map.insert(name.clone(), json!([{"name": "n", "value": index}]));
        }
        if overall_at >= names.len() {
            map.insert("overall".to_string(), json!([{"name": "verdict", "value": "yes"}]));
        }

        let expected: Vec<String> = std::iter::once("overall".to_string())
            .chain(map.keys().filter(|k| k.as_str() != "overall").cloned())
            .collect();

        let groups = normalize_signals(&Value::Object(map), None);
        let actual: Vec<String> = groups.iter().map(|g| g.name().to_string()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn scores_stay_in_unit_range(value in arb_value()) {
        for group in normalize_signals(&value, None) {
            for signal in group.signals() {
                if let Some(score) = signal.score() {
                    prop_assert!((0.0..=1.0).contains(&score));
                }
            }
        }
    }

    #[test]
    fn classify_depth_bounded(value in arb_value()) {
        let node = classify(&value);
        // arb_value nests at most four containers below the root.
        prop_assert!(max_depth(&node) <= 5);
    }

    #[test]
    fn pipeline_total_on_arbitrary_text(text in "\\PC{0,120}") {
        let raw = Value::String(text.clone());
        let value = decode_value(&raw, None).into_value();
        let _ = classify(&value);
        let _ = normalize_signals(&raw, None);
        if let Some(map) = probe_structured(&text) {
            let _ = layout_record::<&str>(&map, &[]);
        }
    }
}
