//! Configuration for the medreport analyzer.
//!
//! Configuration is YAML with `${VAR}` environment interpolation. Every
//! section is optional; an empty document yields the built-in defaults.

mod defaults;
mod env;
pub mod types;
mod validation;

use std::path::Path;

pub use defaults::{
    DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_CONDITION_KEYWORDS, DEFAULT_MODERATE_KEYWORDS,
    DEFAULT_SEVERE_KEYWORDS, DEFAULT_SYMPTOM_KEYWORDS, SUPPORTED_EXTENSIONS,
};
pub use types::*;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Missing environment variables: {0:?}")]
    MissingEnvVars(Vec<String>),

    #[error("Unsupported upload extension '{0}' (supported: pdf, doc, docx, txt)")]
    UnsupportedExtension(String),

    #[error("Invalid {0} keyword '{1}': keywords must be a single alphanumeric word")]
    InvalidKeyword(String, String),

    #[error("Keyword '{0}' is listed as both severe and moderate")]
    AmbiguousSeverityKeyword(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AppConfig {
    /// Parse a configuration from a YAML string.
    /// Environment variables in the format `${VAR_NAME}` will be interpolated.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let interpolated = env::interpolate_env(yaml)?;

        if interpolated.trim().is_empty() {
            return Ok(AppConfig::default());
        }
        let config: Option<AppConfig> = serde_yaml::from_str(&interpolated)?;

        Ok(config.unwrap_or_default())
    }

    /// Load a configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
