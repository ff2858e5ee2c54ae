//! Consistency validation: repeated attempts against one provider.

use crate::ports::analysis_logger::{AnalysisEvent, AnalysisLogger};
use crate::ports::progress::AnalysisProgressNotifier;
use crate::ports::vision_gateway::{GatewayError, VisionGateway};
use hairlens_domain::{
    AnalysisRequest, AnalysisResult, ConsistencyDecision, ConsistencyPolicy, ConsistencyWindow,
    ProviderDescriptor, interpret_with_path,
};
use serde_json::json;
use tracing::{debug, info, warn};

/// Runs up to `max_attempts` attempts against a single provider and
/// reconciles the successful ones.
pub struct ConsistencyValidator<'a, G: VisionGateway + ?Sized> {
    gateway: &'a G,
    policy: ConsistencyPolicy,
    logger: &'a dyn AnalysisLogger,
}

impl<'a, G: VisionGateway + ?Sized> ConsistencyValidator<'a, G> {
    pub fn new(gateway: &'a G, policy: ConsistencyPolicy, logger: &'a dyn AnalysisLogger) -> Self {
        Self {
            gateway,
            policy,
            logger,
        }
    }

    /// Validate `provider`'s output for `request`.
    ///
    /// An error is returned only when the provider produced nothing usable,
    /// so the caller can move on to the next provider.
    pub async fn validate(
        &self,
        provider: &ProviderDescriptor,
        request: &AnalysisRequest,
        progress: &dyn AnalysisProgressNotifier,
    ) -> Result<AnalysisResult, GatewayError> {
        let mut window = ConsistencyWindow::new(&provider.id);

        for attempt in 1..=self.policy.max_attempts.max(1) {
            progress.on_attempt_start(provider, attempt);
            self.logger.log(AnalysisEvent::new(
                "provider_attempt",
                json!({ "provider": provider.id, "rank": provider.rank, "attempt": attempt }),
            ));

            let reply = match self.gateway.complete(provider, request).await {
                Ok(reply) => reply,
                Err(e) if window.is_empty() => return Err(e),
                Err(e) => {
                    warn!(
                        provider = %provider.id,
                        attempt,
                        error = %e,
                        "Attempt failed after a successful one; deciding with {} result(s)",
                        window.len()
                    );
                    break;
                }
            };

            let (result, path) = interpret_with_path(&reply, &provider.id);
            debug!(provider = %provider.id, attempt, path = path.as_str(), "Interpreted reply");

            match result {
                AnalysisResult::Rejected(rejected) => {
                    info!(
                        provider = %provider.id,
                        detected = %rejected.detected_content,
                        "Image rejected by provider"
                    );
                    return Ok(AnalysisResult::Rejected(rejected));
                }
                AnalysisResult::Succeeded(analysis) => {
                    debug!(
                        provider = %provider.id,
                        attempt,
                        score = analysis.health_score.value(),
                        "Attempt succeeded"
                    );
                    window.push(analysis);
                }
            }
        }

        let scores: Vec<u8> = window.scores().iter().map(|s| s.value()).collect();
        let decision = window
            .decide(&self.policy)
            .ok_or_else(|| GatewayError::Other("no attempt produced a result".to_string()))?;

        match &decision {
            ConsistencyDecision::HighVariance { spread, .. } => warn!(
                provider = %provider.id,
                spread,
                threshold = self.policy.variance_threshold,
                "High score variance across attempts; keeping the first result"
            ),
            ConsistencyDecision::Averaged { result, .. } => debug!(
                provider = %provider.id,
                score = result.health_score.value(),
                "Averaged attempt scores"
            ),
            ConsistencyDecision::Single(_) => {}
        }

        progress.on_consistency_decided(provider, decision.kind());
        self.logger.log(AnalysisEvent::new(
            "consistency_decision",
            json!({
                "provider": provider.id,
                "decision": decision.kind(),
                "scores": scores,
                "final_score": decision.result().health_score.value(),
            }),
        ));

        Ok(AnalysisResult::Succeeded(decision.into_result()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::analysis_logger::NoAnalysisLogger;
    use crate::ports::progress::NoProgress;
    use crate::use_cases::analyze_image::test_support::{ScriptedGateway, request, scored_reply};

    fn provider() -> ProviderDescriptor {
        ProviderDescriptor::new("vision-a", 0).unwrap()
    }

    #[tokio::test]
    async fn test_two_close_attempts_are_averaged() {
        let gateway = ScriptedGateway::new()
            .reply("vision-a", Ok(scored_reply(70)))
            .reply("vision-a", Ok(scored_reply(74)));
        let validator = ConsistencyValidator::new(&gateway, ConsistencyPolicy::default(), &NoAnalysisLogger);

        let result = validator.validate(&provider(), &request(), &NoProgress).await.unwrap();
        assert_eq!(result.health_score().unwrap().value(), 72);
        assert_eq!(gateway.calls(), 2);
    }

    #[tokio::test]
    async fn test_high_variance_keeps_first() {
        let gateway = ScriptedGateway::new()
            .reply("vision-a", Ok(scored_reply(50)))
            .reply("vision-a", Ok(scored_reply(90)));
        let validator = ConsistencyValidator::new(&gateway, ConsistencyPolicy::default(), &NoAnalysisLogger);

        let result = validator.validate(&provider(), &request(), &NoProgress).await.unwrap();
        assert_eq!(result.health_score().unwrap().value(), 50);
    }

    #[tokio::test]
    async fn test_rejection_short_circuits() {
        let gateway = ScriptedGateway::new().reply(
            "vision-a",
            Ok(r#"{"isHairImage": false, "detectedContent": "A cat"}"#.to_string()),
        );
        let validator = ConsistencyValidator::new(&gateway, ConsistencyPolicy::default(), &NoAnalysisLogger);

        let result = validator.validate(&provider(), &request(), &NoProgress).await.unwrap();
        assert!(result.is_rejected());
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_first_attempt_error_propagates() {
        let gateway = ScriptedGateway::new()
            .reply("vision-a", Err(GatewayError::Unavailable("down".into())));
        let validator = ConsistencyValidator::new(&gateway, ConsistencyPolicy::default(), &NoAnalysisLogger);

        let err = validator.validate(&provider(), &request(), &NoProgress).await.unwrap_err();
        assert!(matches!(err, GatewayError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_second_attempt_error_keeps_first_result() {
        let gateway = ScriptedGateway::new()
            .reply("vision-a", Ok(scored_reply(66)))
            .reply("vision-a", Err(GatewayError::Timeout));
        let validator = ConsistencyValidator::new(&gateway, ConsistencyPolicy::default(), &NoAnalysisLogger);

        let result = validator.validate(&provider(), &request(), &NoProgress).await.unwrap();
        assert_eq!(result.health_score().unwrap().value(), 66);
        assert_eq!(gateway.calls(), 2);
    }

    #[tokio::test]
    async fn test_single_attempt_policy() {
        let gateway = ScriptedGateway::new().reply("vision-a", Ok(scored_reply(81)));
        let policy = ConsistencyPolicy {
            max_attempts: 1,
            variance_threshold: 10,
        };
        let validator = ConsistencyValidator::new(&gateway, policy, &NoAnalysisLogger);

        let result = validator.validate(&provider(), &request(), &NoProgress).await.unwrap();
        assert_eq!(result.health_score().unwrap().value(), 81);
        assert_eq!(gateway.calls(), 1);
    }
}
