//! # juror-core
//!
//! Deterministic decoder and normalizer for LLM-judge evaluation payloads.
//!
//! Upstream evaluation services hand back field values in many shapes:
//! JSON text, legacy scripting-literal text (`{'a': None}`), newline
//! delimited logs, or already-parsed values. This crate turns them into a
//! small set of canonical structures a dashboard can render safely.
//!
//! ## Components
//!
//! 1. [`decode_literal`]: scripting-literal text to JSON text
//! 2. [`probe_structured`] / [`decode_value`]: text to structured values
//! 3. [`normalize_signals`]: judge signal payloads to [`SignalGroup`]s
//! 4. [`classify`]: decoded values to [`PresentationNode`] trees
//!
//! ## Key Guarantees
//!
//! 1. **Total**: no component returns an error or panics on malformed input
//! 2. **Deterministic**: output is a pure function of input
//! 3. **Stateless**: safe to call from any number of threads
//!
//! ## Example
//!
//! ```rust
//! use juror_core::{normalize_signals, PresentationKind, classify};
//! use serde_json::json;
//!
//! let groups = normalize_signals(&json!("{'verdict': 'Yes', 'reason': 'ok'}"), None);
//! assert_eq!(groups[0].name(), "overall");
//! assert_eq!(groups[0].signals()[0].score(), Some(1.0));
//!
//! let node = classify(&json!({"score": 0.9}));
//! assert_eq!(node.kind, PresentationKind::Mapping);
//! ```

pub mod config;
pub mod literal;
pub mod presentation;
pub mod probe;
pub mod signals;

// Re-export main types at crate root
pub use config::{CacheConfig, ClassifierConfig, Config, ConfigError, RecordConfig};
pub use literal::decode_literal;
pub use presentation::{
    classify, content_sections, layout_record, preview_text, Classifier, PresentationEntry,
    PresentationKind, PresentationNode, RecordLayout,
};
pub use probe::{decode_value, probe_structured, Decoded};
pub use signals::{
    infer_score, is_grouped_signal_mapping, normalize_signals, order_groups, order_signals, Signal,
    SignalGroup,
};

/// Raw field value handed to the decoder.
pub type RawValue = serde_json::Value;

/// Fully decoded value.
pub type DecodedValue = serde_json::Value;
