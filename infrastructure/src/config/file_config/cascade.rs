//! Cascade configuration from TOML (`[cascade]` and `[generation]` sections)

use hairlens_domain::{ConsistencyPolicy, DEFAULT_PROVIDER_IDS, GenerationParams};
use serde::{Deserialize, Serialize};

/// Provider order and attempt policy
///
/// # Example
///
/// ```toml
/// [cascade]
/// models = ["google/gemini-2.0-flash-exp:free", "qwen/qwen2.5-vl-72b-instruct:free"]
/// max_attempts = 2
/// variance_threshold = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCascadeConfig {
    /// Model ids, tried in order
    pub models: Vec<String>,
    pub max_attempts: u32,
    pub variance_threshold: u8,
}

impl Default for FileCascadeConfig {
    fn default() -> Self {
        let policy = ConsistencyPolicy::default();
        Self {
            models: DEFAULT_PROVIDER_IDS.iter().map(|id| id.to_string()).collect(),
            max_attempts: policy.max_attempts,
            variance_threshold: policy.variance_threshold,
        }
    }
}

impl FileCascadeConfig {
    pub fn policy(&self) -> ConsistencyPolicy {
        ConsistencyPolicy {
            max_attempts: self.max_attempts,
            variance_threshold: self.variance_threshold,
        }
    }
}

/// Generation parameters sent with every attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        }
    }
}

impl FileGenerationConfig {
    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}
