//! Cascade configuration injected into the orchestrator

use crate::consistency::ConsistencyPolicy;
use crate::core::error::DomainError;
use crate::core::provider::{ProviderDescriptor, default_lineup, lineup};
use crate::core::request::GenerationParams;
use serde::{Deserialize, Serialize};

/// Ordered providers plus the per-provider attempt policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeConfig {
    pub providers: Vec<ProviderDescriptor>,
    pub consistency: ConsistencyPolicy,
    pub generation: GenerationParams,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            providers: default_lineup(),
            consistency: ConsistencyPolicy::default(),
            generation: GenerationParams::default(),
        }
    }
}

impl CascadeConfig {
    /// Build a cascade from model ids, ranked by position.
    pub fn from_model_ids<I, S>(ids: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            providers: lineup(ids)?,
            ..Self::default()
        })
    }

    pub fn with_consistency(mut self, consistency: ConsistencyPolicy) -> Self {
        self.consistency = consistency;
        self
    }

    pub fn with_generation(mut self, generation: GenerationParams) -> Self {
        self.generation = generation;
        self
    }

    /// Check the settings the orchestrator relies on.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.providers.is_empty() {
            return Err(DomainError::NoProviders);
        }
        if self.consistency.max_attempts == 0 {
            return Err(DomainError::InvalidCascadeSetting(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_default_lineup() {
        let config = CascadeConfig::default();
        assert_eq!(config.providers.len(), 5);
        assert_eq!(config.consistency.max_attempts, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_model_ids() {
        let config = CascadeConfig::from_model_ids(["x/vision", "y/chat"]).unwrap();
        assert_eq!(config.providers[1].id, "y/chat");
        assert_eq!(config.providers[1].rank, 1);
    }

    #[test]
    fn test_validate_rejects_empty_and_zero_attempts() {
        let empty = CascadeConfig::from_model_ids(Vec::<String>::new()).unwrap();
        assert_eq!(empty.validate(), Err(DomainError::NoProviders));

        let zero = CascadeConfig::default().with_consistency(ConsistencyPolicy {
            max_attempts: 0,
            variance_threshold: 10,
        });
        assert!(matches!(
            zero.validate(),
            Err(DomainError::InvalidCascadeSetting(_))
        ));
    }
}
