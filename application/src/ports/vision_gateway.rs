//! Vision gateway port
//!
//! Defines the interface for sending an analysis request to one provider of
//! the cascade. Adapters live in the infrastructure layer.

use async_trait::async_trait;
use hairlens_domain::{AnalysisRequest, ProviderDescriptor};
use serde::Serialize;
use thiserror::Error;

/// How the cascade treats a provider failure.
///
/// Every category advances the cascade; the category is kept for
/// diagnostics and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    RateLimited,
    QuotaExhausted,
    Unavailable,
    InvalidModel,
    Transient,
}

impl FailureCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCategory::RateLimited => "rate_limited",
            FailureCategory::QuotaExhausted => "quota_exhausted",
            FailureCategory::Unavailable => "unavailable",
            FailureCategory::InvalidModel => "invalid_model",
            FailureCategory::Transient => "transient",
        }
    }
}

impl std::fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while calling a provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Rate limited: {message}")]
    RateLimited {
        /// Seconds from `Retry-After`, when the provider sent one
        retry_after: Option<u64>,
        message: String,
    },

    #[error("Quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Empty response from provider")]
    EmptyResponse,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Build an error from a non-success HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>, retry_after: Option<u64>) -> Self {
        let message = message.into();
        match status {
            429 => GatewayError::RateLimited {
                retry_after,
                message,
            },
            402 => GatewayError::QuotaExhausted(message),
            502 | 503 | 504 | 529 => GatewayError::Unavailable(message),
            400 | 404 => GatewayError::InvalidModel(message),
            401 | 403 => GatewayError::Unauthorized(message),
            _ => GatewayError::Other(format!("HTTP {status}: {message}")),
        }
    }

    pub fn category(&self) -> FailureCategory {
        match self {
            GatewayError::RateLimited { .. } => FailureCategory::RateLimited,
            GatewayError::QuotaExhausted(_) => FailureCategory::QuotaExhausted,
            GatewayError::Unavailable(_) => FailureCategory::Unavailable,
            GatewayError::InvalidModel(_) => FailureCategory::InvalidModel,
            // Another provider may accept the key
            GatewayError::Unauthorized(_)
            | GatewayError::EmptyResponse
            | GatewayError::Transport(_)
            | GatewayError::Timeout
            | GatewayError::Other(_) => FailureCategory::Transient,
        }
    }
}

/// Gateway to external vision providers
///
/// One call is one attempt: the request is sent to `provider` and the raw
/// reply text is returned for interpretation.
#[async_trait]
pub trait VisionGateway: Send + Sync {
    async fn complete(
        &self,
        provider: &ProviderDescriptor,
        request: &AnalysisRequest,
    ) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GatewayError::from_status(429, "slow down", Some(12)),
            GatewayError::RateLimited {
                retry_after: Some(12),
                message: "slow down".to_string()
            }
        );
        assert_eq!(
            GatewayError::from_status(402, "x", None).category(),
            FailureCategory::QuotaExhausted
        );
        for status in [502, 503, 504, 529] {
            assert_eq!(
                GatewayError::from_status(status, "x", None).category(),
                FailureCategory::Unavailable
            );
        }
        for status in [400, 404] {
            assert_eq!(
                GatewayError::from_status(status, "x", None).category(),
                FailureCategory::InvalidModel
            );
        }
    }

    #[test]
    fn test_unauthorized_is_transient() {
        let err = GatewayError::from_status(401, "bad key", None);
        assert!(matches!(err, GatewayError::Unauthorized(_)));
        assert_eq!(err.category(), FailureCategory::Transient);
    }

    #[test]
    fn test_unknown_status_is_transient() {
        let err = GatewayError::from_status(500, "boom", None);
        assert_eq!(err.category(), FailureCategory::Transient);
        assert_eq!(err.to_string(), "Other error: HTTP 500: boom");
        assert_eq!(GatewayError::Timeout.category(), FailureCategory::Transient);
    }
}
