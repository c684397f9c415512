//! # juror-runtime
//!
//! Memoizing inspection facade over `juror-core`.
//!
//! The core is pure and stateless, so repeated requests for the same
//! payload can reuse earlier results. This crate wires a configured
//! classifier and a bounded, time-limited normalization cache into a
//! single [`Inspector`].
//!
//! ## Important
//!
//! This crate is OPTIONAL. Every operation here is available uncached in
//! `juror-core`; use this crate when the same payloads are rendered over
//! and over (e.g. a table re-rendering rows).
//!
//! ## Example
//!
//! ```rust,ignore
//! use juror_core::Config;
//! use juror_runtime::Inspector;
//!
//! let config = Config::from_yaml_file("juror.yaml")?;
//! let inspector = Inspector::from_config(&config)?;
//!
//! let groups = inspector.signals(&record["signals"], Some("faithfulness"));
//! ```

pub mod cache;
pub mod inspector;

pub use cache::{CacheKey, CacheStats, SignalCache};
pub use inspector::Inspector;

use thiserror::Error;

/// Errors from the runtime.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Invalid cache ttl '{value}': {reason}")]
    InvalidTtl { value: String, reason: String },
}
