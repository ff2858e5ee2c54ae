//! Provider cascade: try each provider in rank order until one is accepted.

use super::consistency::ConsistencyValidator;
use crate::ports::analysis_logger::{AnalysisEvent, AnalysisLogger};
use crate::ports::progress::AnalysisProgressNotifier;
use crate::ports::vision_gateway::{FailureCategory, GatewayError, VisionGateway};
use hairlens_domain::{AnalysisRequest, AnalysisResult, ConsistencyPolicy, ProviderDescriptor};
use serde_json::json;
use tracing::{info, warn};

/// One abandoned provider, kept for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub provider: String,
    pub category: FailureCategory,
    pub error: String,
}

/// How a cascade run ended
#[derive(Debug)]
pub enum CascadeOutcome {
    /// A provider produced a result (rejection or report)
    Accepted {
        result: AnalysisResult,
        provider: ProviderDescriptor,
        failures: Vec<ProviderFailure>,
    },
    /// Every provider failed
    Exhausted {
        last_error: Option<GatewayError>,
        failures: Vec<ProviderFailure>,
    },
}

impl CascadeOutcome {
    pub fn failures(&self) -> &[ProviderFailure] {
        match self {
            CascadeOutcome::Accepted { failures, .. } | CascadeOutcome::Exhausted { failures, .. } => {
                failures
            }
        }
    }
}

/// Walks the ordered provider list sequentially.
pub struct CascadeController<'a, G: VisionGateway + ?Sized> {
    gateway: &'a G,
    providers: &'a [ProviderDescriptor],
    policy: ConsistencyPolicy,
    logger: &'a dyn AnalysisLogger,
}

impl<'a, G: VisionGateway + ?Sized> CascadeController<'a, G> {
    pub fn new(
        gateway: &'a G,
        providers: &'a [ProviderDescriptor],
        policy: ConsistencyPolicy,
        logger: &'a dyn AnalysisLogger,
    ) -> Self {
        Self {
            gateway,
            providers,
            policy,
            logger,
        }
    }

    pub async fn run(
        &self,
        request: &AnalysisRequest,
        progress: &dyn AnalysisProgressNotifier,
    ) -> CascadeOutcome {
        let mut ordered: Vec<&ProviderDescriptor> = self.providers.iter().collect();
        ordered.sort_by_key(|p| p.rank);

        info!("Starting cascade with {} providers", ordered.len());
        progress.on_cascade_start(ordered.len());

        let mut failures = Vec::new();
        let mut last_error = None;

        for provider in ordered {
            // A fresh window per provider
            let validator = ConsistencyValidator::new(self.gateway, self.policy, self.logger);

            match validator.validate(provider, request, progress).await {
                Ok(result) => {
                    info!(
                        provider = %provider.id,
                        rank = provider.rank,
                        rejected = result.is_rejected(),
                        "Provider accepted"
                    );
                    return CascadeOutcome::Accepted {
                        result,
                        provider: provider.clone(),
                        failures,
                    };
                }
                Err(e) => {
                    let category = e.category();
                    warn!(
                        provider = %provider.id,
                        category = %category,
                        error = %e,
                        "Provider failed; advancing cascade"
                    );
                    progress.on_provider_failed(provider, category, &e.to_string());
                    self.logger.log(AnalysisEvent::new(
                        "provider_failed",
                        json!({
                            "provider": provider.id,
                            "rank": provider.rank,
                            "category": category,
                            "error": e.to_string(),
                        }),
                    ));
                    failures.push(ProviderFailure {
                        provider: provider.id.clone(),
                        category,
                        error: e.to_string(),
                    });
                    last_error = Some(e);
                }
            }
        }

        warn!("All {} providers failed", failures.len());
        CascadeOutcome::Exhausted {
            last_error,
            failures,
        }
    }
}
