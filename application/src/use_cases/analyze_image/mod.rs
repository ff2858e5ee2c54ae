//! Analyze image use case
//!
//! The orchestrator: validates configuration, runs the provider cascade and
//! falls back to an offline estimate when every provider failed.
//!
//! ```text
//! Cascading ──► Accepted
//!     │
//!     └──────► Exhausted ──► Synthesized
//! ```

pub mod cascade;
pub mod consistency;
#[cfg(test)]
pub(crate) mod test_support;

pub use cascade::{CascadeController, CascadeOutcome, ProviderFailure};
pub use consistency::ConsistencyValidator;

use crate::config::AnalyzerConfig;
use crate::ports::analysis_logger::{AnalysisEvent, AnalysisLogger, NoAnalysisLogger};
use crate::ports::progress::{AnalysisProgressNotifier, NoProgress};
use crate::ports::vision_gateway::VisionGateway;
use hairlens_domain::{
    AnalysisRequest, AnalysisResult, DomainError, ImageFingerprint, ImageInput, OfflineSynthesizer,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration problems detected before any provider is called
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("No API key configured for the vision providers")]
    MissingCredentials,

    #[error("No providers configured for the analysis cascade")]
    NoProviders,

    #[error("Invalid cascade setting: {0}")]
    InvalidSetting(String),
}

/// Errors that can occur during an analysis
///
/// Provider failures never surface here; they end in an offline estimate.
#[derive(Error, Debug)]
pub enum AnalyzeImageError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Lifecycle of one analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisState {
    Cascading,
    Accepted,
    Exhausted,
    Synthesized,
}

impl AnalysisState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisState::Cascading => "cascading",
            AnalysisState::Accepted => "accepted",
            AnalysisState::Exhausted => "exhausted",
            AnalysisState::Synthesized => "synthesized",
        }
    }
}

/// Result plus how it was obtained
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    /// Terminal state: `Accepted` or `Synthesized`
    pub state: AnalysisState,
    /// Provider whose output was accepted
    pub provider: Option<String>,
    pub failures: Vec<ProviderFailure>,
}

/// Use case for analyzing one hair photo
pub struct AnalyzeImageUseCase<G: VisionGateway + 'static> {
    gateway: Arc<G>,
    config: AnalyzerConfig,
    logger: Arc<dyn AnalysisLogger>,
    synthesizer: OfflineSynthesizer,
}

impl<G: VisionGateway + 'static> AnalyzeImageUseCase<G> {
    pub fn new(gateway: Arc<G>, config: AnalyzerConfig) -> Self {
        Self {
            gateway,
            config,
            logger: Arc::new(NoAnalysisLogger),
            synthesizer: OfflineSynthesizer::new(),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn AnalysisLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze with default (no-op) progress
    pub async fn analyze(&self, image: ImageInput) -> Result<AnalysisResult, AnalyzeImageError> {
        self.analyze_with_progress(image, &NoProgress).await
    }

    /// Analyze with progress callbacks
    pub async fn analyze_with_progress(
        &self,
        image: ImageInput,
        progress: &dyn AnalysisProgressNotifier,
    ) -> Result<AnalysisResult, AnalyzeImageError> {
        Ok(self.run(image, progress).await?.result)
    }

    /// Analyze and report the path taken
    pub async fn run(
        &self,
        image: ImageInput,
        progress: &dyn AnalysisProgressNotifier,
    ) -> Result<AnalysisOutcome, AnalyzeImageError> {
        self.check_configuration()?;

        let fingerprint = ImageFingerprint::of(&image);
        info!(
            file = %fingerprint.file_name,
            size_bytes = fingerprint.size_bytes,
            "Analyzing image"
        );

        let request = AnalysisRequest::new(image, self.config.cascade.generation);
        let mut state = AnalysisState::Cascading;
        debug!(state = state.as_str(), "Analysis state");

        let cascade = CascadeController::new(
            self.gateway.as_ref(),
            &self.config.cascade.providers,
            self.config.cascade.consistency,
            self.logger.as_ref(),
        );

        let outcome = match cascade.run(&request, progress).await {
            CascadeOutcome::Accepted {
                result,
                provider,
                failures,
            } => {
                state = AnalysisState::Accepted;
                AnalysisOutcome {
                    result,
                    state,
                    provider: Some(provider.id),
                    failures,
                }
            }
            CascadeOutcome::Exhausted {
                last_error,
                failures,
            } => {
                state = AnalysisState::Exhausted;
                debug!(state = state.as_str(), "Analysis state");

                let reason = last_error.map(|e| e.to_string());
                warn!(
                    reason = reason.as_deref().unwrap_or("none"),
                    "Every provider failed; synthesizing an offline estimate"
                );
                progress.on_synthesizing(reason.as_deref());
                let result = self.synthesizer.synthesize(&fingerprint, reason.as_deref());

                state = AnalysisState::Synthesized;
                AnalysisOutcome {
                    result,
                    state,
                    provider: None,
                    failures,
                }
            }
        };

        debug!(state = outcome.state.as_str(), "Analysis state");
        self.logger.log(AnalysisEvent::new(
            "analysis_completed",
            json!({
                "file": fingerprint.file_name,
                "digest": fingerprint.digest_hex(),
                "state": outcome.state.as_str(),
                "model": outcome.result.model_name(),
                "is_hair_image": outcome.result.is_hair_image(),
                "health_score": outcome.result.health_score().map(|s| s.value()),
                "failed_providers": outcome.failures.len(),
            }),
        ));
        progress.on_complete(&outcome.result);

        Ok(outcome)
    }

    fn check_configuration(&self) -> Result<(), ConfigurationError> {
        if !self.config.has_credentials() {
            return Err(ConfigurationError::MissingCredentials);
        }
        self.config.cascade.validate().map_err(|e| match e {
            DomainError::NoProviders => ConfigurationError::NoProviders,
            other => ConfigurationError::InvalidSetting(other.to_string()),
        })
    }
}
