//! Configuration management for complaint triage
//!
//! Supports loading configuration from:
//! - YAML/TOML/JSON files (`config/default`, `config/{env}`)
//! - Environment variables (COMPLAINT_TRIAGE_ prefix, `__` separator)
//!
//! # Classification data
//!
//! - `Taxonomy`: ordered category → keyword mapping, loaded from JSON/YAML
//!   or the built-in default
//! - `TaxonomyManager`: snapshot/reload wrapper for hot-reloading a taxonomy file
//! - `SeverityBuckets`: high/medium/low severity keywords

pub mod settings;
pub mod severity;
pub mod taxonomy;

pub use settings::{load_settings, ClassifierSettings, ObservabilityConfig, Settings, ENV_PREFIX};
pub use severity::SeverityBuckets;
pub use taxonomy::{fold_case, Category, Taxonomy, TaxonomyManager};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
