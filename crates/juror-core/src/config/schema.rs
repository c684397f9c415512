//! JSON Schema validation for configuration files.
//!
//! The schema is embedded at compile time and compiled on first use.

use jsonschema::Validator;
use serde_json::Value;
use std::sync::OnceLock;

const CONFIG_SCHEMA_JSON: &str = include_str!("../../schema/config.schema.json");

static VALIDATOR: OnceLock<Result<Validator, String>> = OnceLock::new();

fn validator() -> Result<&'static Validator, &'static str> {
    VALIDATOR
        .get_or_init(|| {
            let schema: Value = serde_json::from_str(CONFIG_SCHEMA_JSON)
                .map_err(|e| format!("config schema is not valid JSON: {}", e))?;
            jsonschema::options()
                .build(&schema)
                .map_err(|e| format!("config schema does not compile: {}", e))
        })
        .as_ref()
        .map_err(String::as_str)
}

/// Validate a configuration value against the schema.
///
/// Returns every violation as `"<message> at <instance path>"`.
pub fn validate_config_schema(config: &Value) -> Result<(), Vec<String>> {
    let validator = validator().map_err(|e| vec![e.to_string()])?;

    let violations: Vec<String> = validator
        .iter_errors(config)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

pub fn is_valid_config(config: &Value) -> bool {
    validator().is_ok_and(|v| v.is_valid(config))
}
