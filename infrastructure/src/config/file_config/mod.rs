//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod cascade;
mod logging;
mod output;
mod provider;

pub use cascade::{FileCascadeConfig, FileGenerationConfig};
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use provider::FileProviderConfig;

use crate::chat::ChatGatewayConfig;
use hairlens_domain::{CascadeConfig, DomainError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("provider.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("cascade.max_attempts cannot be 0")]
    InvalidMaxAttempts,

    #[error("cascade.models: model name cannot be empty")]
    EmptyModelName,

    #[error("generation.temperature must be within 0.0..=2.0, got {0}")]
    InvalidTemperature(f32),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Endpoint and credentials
    pub provider: FileProviderConfig,
    /// Provider order and attempt policy
    pub cascade: FileCascadeConfig,
    /// Generation parameters
    pub generation: FileGenerationConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Analysis event log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.provider.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.cascade.max_attempts == 0 {
            return Err(ConfigValidationError::InvalidMaxAttempts);
        }
        if self.cascade.models.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyModelName);
        }
        let temperature = self.generation.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigValidationError::InvalidTemperature(temperature));
        }
        Ok(())
    }

    /// Override the cascade model list (e.g. from `--model` flags).
    pub fn with_models(mut self, models: Vec<String>) -> Self {
        if !models.is_empty() {
            self.cascade.models = models;
        }
        self
    }

    /// Convert to the domain cascade configuration.
    pub fn to_cascade_config(&self) -> Result<CascadeConfig, DomainError> {
        Ok(CascadeConfig::from_model_ids(self.cascade.models.iter().map(|m| m.trim().to_string()))?
            .with_consistency(self.cascade.policy())
            .with_generation(self.generation.params()))
    }

    /// Build the HTTP gateway settings around a resolved API key.
    pub fn to_gateway_config(&self, api_key: String) -> ChatGatewayConfig {
        ChatGatewayConfig {
            base_url: self.provider.base_url.clone(),
            api_key,
            referer: self.provider.referer.clone(),
            title: self.provider.title.clone(),
            timeout: Duration::from_secs(self.provider.timeout_seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hairlens_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
base_url = "https://example.test/v1"
api_key_env = "MY_KEY"
referer = "https://hairlens.app"
timeout_seconds = 30

[cascade]
models = ["a/vision", "b/chat"]
max_attempts = 3
variance_threshold = 5

[generation]
max_tokens = 1500
temperature = 0.2

[output]
format = "json"
color = false

[logging]
analysis_log = "/tmp/hairlens.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.base_url, "https://example.test/v1");
        assert_eq!(config.provider.api_key_env, "MY_KEY");
        assert_eq!(config.provider.timeout_seconds, 30);
        assert_eq!(config.cascade.models, vec!["a/vision", "b/chat"]);
        assert_eq!(config.cascade.max_attempts, 3);
        assert_eq!(config.generation.max_tokens, 1500);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert_eq!(config.logging.analysis_log.as_deref(), Some("/tmp/hairlens.jsonl"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[cascade]
max_attempts = 1
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.cascade.max_attempts, 1);
        // Defaults should apply
        assert_eq!(config.cascade.models.len(), 5);
        assert_eq!(config.cascade.variance_threshold, 10);
        assert_eq!(config.provider.api_key_env, "OPENROUTER_API_KEY");
        assert!(config.output.color);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FileConfig::default();
        config.provider.timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));

        let mut config = FileConfig::default();
        config.cascade.max_attempts = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidMaxAttempts));

        let mut config = FileConfig::default();
        config.cascade.models.push(" ".to_string());
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));

        let mut config = FileConfig::default();
        config.generation.temperature = 2.5;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTemperature(2.5)));
    }

    #[test]
    fn test_conversion_to_domain() {
        let config = FileConfig::default().with_models(vec!["x/vision".into(), "y/chat".into()]);
        let cascade = config.to_cascade_config().unwrap();
        assert_eq!(cascade.providers.len(), 2);
        assert_eq!(cascade.providers[0].id, "x/vision");
        assert_eq!(cascade.consistency.max_attempts, 2);
        assert_eq!(cascade.generation.max_tokens, 2000);

        let gateway = config.to_gateway_config("sk".into());
        assert_eq!(gateway.timeout, Duration::from_secs(60));
        assert_eq!(gateway.base_url, "https://openrouter.ai/api/v1");
    }

    #[test]
    fn test_empty_model_override_keeps_list() {
        let config = FileConfig::default().with_models(Vec::new());
        assert_eq!(config.cascade.models.len(), 5);
    }
}
