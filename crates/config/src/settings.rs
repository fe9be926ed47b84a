//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{ConfigError, Taxonomy, TaxonomyManager};

/// Environment variable prefix, e.g. `COMPLAINT_TRIAGE__CLASSIFIER__SEMANTIC_ENABLED`
pub const ENV_PREFIX: &str = "COMPLAINT_TRIAGE";

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Classifier behaviour
    #[serde(default)]
    pub classifier: ClassifierSettings,

    /// Taxonomy document (JSON or YAML); built-in taxonomy when unset
    #[serde(default)]
    pub taxonomy_path: Option<PathBuf>,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Try the semantic classifier before keyword matching
    #[serde(default)]
    pub semantic_enabled: bool,

    /// Upper bound on a single semantic classifier call
    #[serde(default = "default_semantic_timeout_ms")]
    pub semantic_timeout_ms: u64,

    /// Semantic answers below this confidence fall back to keywords
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
}

fn default_semantic_timeout_ms() -> u64 {
    2000
}

fn default_min_confidence() -> f32 {
    0.3
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            semantic_enabled: false,
            semantic_timeout_ms: default_semantic_timeout_ms(),
            min_confidence: default_min_confidence(),
        }
    }
}

impl ClassifierSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.semantic_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "classifier.semantic_timeout_ms".to_string(),
                message: "Timeout must be greater than 0".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::InvalidValue {
                field: "classifier.min_confidence".to_string(),
                message: format!("Must be between 0.0 and 1.0, got {}", self.min_confidence),
            });
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.classifier.validate()?;

        if let Some(path) = &self.taxonomy_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "taxonomy_path".to_string(),
                    message: "Path must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Build the taxonomy holder: file-backed when `taxonomy_path` is set
    pub fn taxonomy_manager(&self) -> Result<TaxonomyManager, ConfigError> {
        match &self.taxonomy_path {
            Some(path) => TaxonomyManager::from_file(path),
            None => {
                tracing::info!("No taxonomy path configured, using built-in taxonomy");
                Ok(TaxonomyManager::new(Taxonomy::default()))
            }
        }
    }
}

/// Load settings from files and environment
///
/// Priority: env vars > config/{env} > config/default > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(File::with_name("config/default").required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    // Validate
    settings.validate()?;

    Ok(settings)
}
