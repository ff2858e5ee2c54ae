//! Chat-completions gateway: implements [`VisionGateway`] over HTTP

use super::error::{from_envelope, from_reqwest, from_status, parse_retry_after};
use super::protocol::{ChatRequest, ChatResponse};
use async_trait::async_trait;
use hairlens_application::{GatewayError, VisionGateway};
use hairlens_domain::{AnalysisRequest, ProviderDescriptor};
use reqwest::header::RETRY_AFTER;
use std::time::Duration;
use tracing::debug;

/// Connection settings for an OpenAI-compatible endpoint
#[derive(Clone)]
pub struct ChatGatewayConfig {
    /// Base URL, e.g. `https://openrouter.ai/api/v1`
    pub base_url: String,
    pub api_key: String,
    /// Sent as `HTTP-Referer` when set
    pub referer: Option<String>,
    /// Sent as `X-Title` when set
    pub title: Option<String>,
    pub timeout: Duration,
}

impl std::fmt::Debug for ChatGatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatGatewayConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("referer", &self.referer)
            .field("title", &self.title)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Gateway sending each attempt to `POST {base_url}/chat/completions`
pub struct ChatCompletionsGateway {
    client: reqwest::Client,
    config: ChatGatewayConfig,
}

impl ChatCompletionsGateway {
    pub fn new(config: ChatGatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(from_reqwest)?;
        Ok(Self { client, config })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl VisionGateway for ChatCompletionsGateway {
    async fn complete(
        &self,
        provider: &ProviderDescriptor,
        request: &AnalysisRequest,
    ) -> Result<String, GatewayError> {
        let body = ChatRequest::for_analysis(&provider.id, request);

        let mut builder = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body);
        if let Some(referer) = &self.config.referer {
            builder = builder.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.config.title {
            builder = builder.header("X-Title", title);
        }

        debug!(provider = %provider.id, url = %self.endpoint(), "Sending analysis request");
        let response = builder.send().await.map_err(from_reqwest)?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);
        let text = response.text().await.map_err(from_reqwest)?;
        debug!(provider = %provider.id, status = status.as_u16(), bytes = text.len(), "Received response");

        if !status.is_success() {
            return Err(from_status(status.as_u16(), &text, retry_after));
        }

        let envelope: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| GatewayError::Other(format!("Malformed response envelope: {e}")))?;
        if let Some(error) = &envelope.error {
            return Err(from_envelope(error));
        }
        envelope.first_text().ok_or(GatewayError::EmptyResponse)
    }
}
