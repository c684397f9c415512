//! Configured entry point for callers that render many records.

use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use juror_core::{
    decode_value, probe_structured, Classifier, Config, Decoded, PresentationEntry,
    PresentationNode, RecordLayout, SignalGroup,
};

use crate::cache::{CacheStats, SignalCache};
use crate::RuntimeError;

/// Decoding, normalization and classification under one configuration,
/// with normalization results memoized.
///
/// `Inspector` is `Send + Sync`; share it behind an `Arc` between threads.
pub struct Inspector {
    classifier: Classifier,
    reserved_fields: Vec<String>,
    cache: SignalCache,
}

impl Inspector {
    /// Build an inspector from configuration.
    ///
    /// Fails only when `cache.ttl` is not a valid duration.
    pub fn from_config(config: &Config) -> Result<Self, RuntimeError> {
        let ttl = parse_ttl(&config.cache.ttl)?;

        debug!(
            max_entries = config.cache.max_entries,
            ttl_secs = ttl.as_secs(),
            "building inspector"
        );

        Ok(Self {
            classifier: Classifier::new(config.classifier.clone()),
            reserved_fields: config.record.reserved_fields.clone(),
            cache: SignalCache::new(config.cache.max_entries, ttl),
        })
    }

    /// Decode one raw field value.
    pub fn decode(&self, raw: &Value, context_hint: Option<&str>) -> Decoded {
        decode_value(raw, context_hint)
    }

    /// Probe text for a mapping.
    pub fn probe(&self, text: &str) -> Option<Map<String, Value>> {
        probe_structured(text)
    }

    /// Normalize a signals payload, memoized on `(raw, metric_key_hint)`.
    pub fn signals(&self, raw: &Value, metric_key_hint: Option<&str>) -> Arc<Vec<SignalGroup>> {
        self.cache.normalize(raw, metric_key_hint)
    }

    /// Classify an already-decoded value.
    pub fn classify(&self, value: &Value) -> PresentationNode {
        self.classifier.classify(value)
    }

    /// Lay out a record, skipping the configured reserved fields.
    pub fn layout_record(&self, record: &Map<String, Value>) -> RecordLayout {
        self.classifier.layout_record(record, &self.reserved_fields)
    }

    /// Classify the entries of a content field, or `None` for raw text.
    pub fn content_sections(&self, text: &str) -> Option<Vec<PresentationEntry>> {
        self.classifier.content_sections(text)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self {
            classifier: Classifier::default(),
            reserved_fields: Vec::new(),
            cache: SignalCache::default(),
        }
    }
}

fn parse_ttl(ttl: &str) -> Result<Duration, RuntimeError> {
    humantime::parse_duration(ttl.trim()).map_err(|e| RuntimeError::InvalidTtl {
        value: ttl.to_string(),
        reason: e.to_string(),
    })
}
