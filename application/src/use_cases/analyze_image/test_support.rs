//! Shared mocks for the analyze-image tests.

use crate::ports::vision_gateway::{GatewayError, VisionGateway};
use async_trait::async_trait;
use hairlens_domain::{
    AnalysisRequest, Condition, GenerationParams, HealthScore, ImageInput, ProviderDescriptor,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Gateway returning scripted replies per provider, recording every call.
///
/// A provider with no scripted reply left answers `Unavailable`.
pub(crate) struct ScriptedGateway {
    replies: Mutex<HashMap<String, VecDeque<Result<String, GatewayError>>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        Self {
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn reply(self, provider: &str, reply: Result<String, GatewayError>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(provider.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls_for(&self, provider: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|p| *p == provider).count()
    }
}

#[async_trait]
impl VisionGateway for ScriptedGateway {
    async fn complete(
        &self,
        provider: &ProviderDescriptor,
        _request: &AnalysisRequest,
    ) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(provider.id.clone());
        self.replies
            .lock()
            .unwrap()
            .get_mut(&provider.id)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| Err(GatewayError::Unavailable("no scripted reply".to_string())))
    }
}

pub(crate) fn request() -> AnalysisRequest {
    let image = ImageInput::new(vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3], "my-hair.jpg").unwrap();
    AnalysisRequest::new(image, GenerationParams::default())
}

/// A well-formed JSON reply with the given score
pub(crate) fn scored_reply(score: i64) -> String {
    let condition = Condition::from_score(HealthScore::new(score));
    format!(
        r#"{{"isHairImage": true, "healthScore": {score}, "condition": "{condition}",
            "details": {{"texture": "Medium", "damage": "Mild"}},
            "analysis": "Scripted reply."}}"#
    )
}
