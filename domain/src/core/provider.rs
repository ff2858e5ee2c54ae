//! Provider descriptors for the analysis cascade

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// What a provider is expected to handle.
///
/// Only used to order the cascade; it is never enforced when calling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderCapability {
    #[default]
    Vision,
    TextOnly,
}

/// One external inference backend in the ordered cascade (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Model identifier sent on the wire
    pub id: String,
    /// Position in the cascade (0 = tried first)
    pub rank: usize,
    pub capability: ProviderCapability,
}

impl ProviderDescriptor {
    pub fn new(id: impl Into<String>, rank: usize) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidProvider(id));
        }
        let capability = infer_capability(&id);
        Ok(Self {
            id,
            rank,
            capability,
        })
    }

    pub fn with_capability(mut self, capability: ProviderCapability) -> Self {
        self.capability = capability;
        self
    }

    pub fn is_vision(&self) -> bool {
        self.capability == ProviderCapability::Vision
    }
}

impl std::fmt::Display for ProviderDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Default cascade order: vision-capable models first, preferring free and
/// reliable tiers; text-only models last.
pub const DEFAULT_PROVIDER_IDS: &[&str] = &[
    "google/gemini-2.0-flash-exp:free",
    "meta-llama/llama-3.2-11b-vision-instruct:free",
    "qwen/qwen2.5-vl-72b-instruct:free",
    "mistralai/mistral-small-3.1-24b-instruct:free",
    "deepseek/deepseek-chat:free",
];

/// Build an ordered provider list from model ids, ranking by position.
pub fn lineup<I, S>(ids: I) -> Result<Vec<ProviderDescriptor>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter()
        .enumerate()
        .map(|(rank, id)| ProviderDescriptor::new(id, rank))
        .collect()
}

/// Default provider list built from [`DEFAULT_PROVIDER_IDS`]
pub fn default_lineup() -> Vec<ProviderDescriptor> {
    DEFAULT_PROVIDER_IDS
        .iter()
        .enumerate()
        .map(|(rank, id)| ProviderDescriptor {
            id: id.to_string(),
            rank,
            capability: infer_capability(id),
        })
        .collect()
}

fn infer_capability(id: &str) -> ProviderCapability {
    let id = id.to_lowercase();
    let vision_markers = ["vision", "-vl", "gemini", "gpt-4o", "claude", "pixtral", "mistral-small-3"];
    if vision_markers.iter().any(|m| id.contains(m)) {
        ProviderCapability::Vision
    } else {
        ProviderCapability::TextOnly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lineup_ranks_by_position() {
        let providers = lineup(["a/vision-1", "b/chat"]).unwrap();
        assert_eq!(providers[0].rank, 0);
        assert_eq!(providers[1].rank, 1);
        assert_eq!(providers[1].id, "b/chat");
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(matches!(
            ProviderDescriptor::new("  ", 0),
            Err(DomainError::InvalidProvider(_))
        ));
        assert!(lineup(["ok/model", ""]).is_err());
    }

    #[test]
    fn test_capability_inference() {
        let providers = default_lineup();
        assert!(providers[0].is_vision());
        assert!(providers[2].is_vision());
        assert_eq!(providers.last().unwrap().capability, ProviderCapability::TextOnly);
    }
}
