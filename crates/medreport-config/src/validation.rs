use std::collections::HashSet;

use crate::defaults::SUPPORTED_EXTENSIONS;
use crate::types::AppConfig;
use crate::ConfigError;

impl AppConfig {
    /// Validate the configuration and return a list of errors.
    ///
    /// Expects a config that has been through [`AppConfig::apply_defaults`].
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push(ConfigError::InvalidConfig(
                "server.port must be non-zero".to_string(),
            ));
        }

        if self.server.request_timeout.as_duration().is_zero() {
            errors.push(ConfigError::InvalidConfig(
                "server.request_timeout must be non-zero".to_string(),
            ));
        }

        if self.server.concurrency_limit == 0 {
            errors.push(ConfigError::InvalidConfig(
                "server.concurrency_limit must be non-zero".to_string(),
            ));
        }

        if self.upload.max_size.as_bytes() == 0 {
            errors.push(ConfigError::InvalidConfig(
                "upload.max_size must be non-zero".to_string(),
            ));
        }

        if self.upload.allowed_extensions.is_empty() {
            errors.push(ConfigError::InvalidConfig(
                "upload.allowed_extensions must not be empty".to_string(),
            ));
        }

        for ext in &self.upload.allowed_extensions {
            if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
                errors.push(ConfigError::UnsupportedExtension(ext.clone()));
            }
        }

        // Keywords are matched against single alphanumeric tokens; anything
        // else can never match.
        let keywords = &self.keywords;
        for (category, list) in [
            ("severe", &keywords.severe),
            ("moderate", &keywords.moderate),
            ("symptoms", &keywords.symptoms),
            ("conditions", &keywords.conditions),
        ] {
            for word in list {
                if word.is_empty() || !word.chars().all(char::is_alphanumeric) {
                    errors.push(ConfigError::InvalidKeyword(
                        category.to_string(),
                        word.clone(),
                    ));
                }
            }
        }

        let severe: HashSet<&String> = keywords.severe.iter().collect();
        for word in &keywords.moderate {
            if severe.contains(word) {
                errors.push(ConfigError::AmbiguousSeverityKeyword(word.clone()));
            }
        }

        errors
    }

    /// Validate and return Ok(()) if valid, or Err with the first error.
    pub fn validate_or_err(&self) -> Result<(), ConfigError> {
        match self.validate().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
