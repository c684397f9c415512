//! Configuration parsing from YAML/JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use super::schema::validate_config_schema;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config does not match schema: {}", .0.join("; "))]
    SchemaError(Vec<String>),

    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Presentation Classifier limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Longest text (in chars) still shown inline.
    pub short_text_limit: usize,

    /// Length (in chars) of long-text previews, before the ellipsis.
    pub preview_chars: usize,

    /// Mappings deeper than this are truncated.
    pub max_mapping_depth: usize,

    /// Containers of any kind deeper than this are truncated.
    pub max_depth: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            short_text_limit: 120,
            preview_chars: 80,
            max_mapping_depth: 2,
            max_depth: 16,
        }
    }
}

/// Record layout settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RecordConfig {
    /// Fields skipped by the record layout (shown elsewhere by the caller).
    pub reserved_fields: Vec<String>,
}

/// Memoization settings for the runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum cached normalizations.
    pub max_entries: u64,

    /// Time to live, as a human-readable duration (e.g. "15m", "1h").
    pub ttl: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl: "1h".to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub classifier: ClassifierConfig,
    pub record: RecordConfig,
    pub cache: CacheConfig,
}

impl Config {
    /// Parse configuration from a YAML string. An empty document yields
    /// the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(value)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a file, choosing JSON for a `.json` extension and YAML otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
        let is_json = ext.eq_ignore_ascii_case("json");

        if !is_json && !ext.eq_ignore_ascii_case("yaml") && !ext.eq_ignore_ascii_case("yml") {
            warn!(path = %path.display(), "unrecognized config extension, parsing as YAML");
        }
        debug!(path = %path.display(), is_json, "loading config");

        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_yaml_file(path)
        }
    }

    fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let value = if value.is_null() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            value
        };

        validate_config_schema(&value).map_err(ConfigError::SchemaError)?;

        let config: Config = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Check constraints the schema cannot express.
    fn validate(&self) -> Result<(), ConfigError> {
        let classifier = &self.classifier;

        if classifier.preview_chars > classifier.short_text_limit {
            return Err(ConfigError::ValidationError(format!(
                "classifier.preview_chars ({}) exceeds classifier.short_text_limit ({})",
                classifier.preview_chars, classifier.short_text_limit
            )));
        }

        if classifier.max_mapping_depth > classifier.max_depth {
            return Err(ConfigError::ValidationError(format!(
                "classifier.max_mapping_depth ({}) exceeds classifier.max_depth ({})",
                classifier.max_mapping_depth, classifier.max_depth
            )));
        }

        Ok(())
    }
}
