//! Configuration loading and validation.
//!
//! Configuration is YAML or JSON validated against an embedded JSON Schema.
//! Every setting has a default, so an empty file is a valid configuration.

mod parser;
mod schema;

pub use parser::{CacheConfig, ClassifierConfig, Config, ConfigError, RecordConfig};
pub use schema::{is_valid_config, validate_config_schema};
