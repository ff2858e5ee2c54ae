//! Wire types for OpenAI-compatible chat completions
//!
//! Request: one user message carrying the instruction text and the image as a
//! `data:` URL. Response: `choices[0].message.content`, or an `error` envelope.

use hairlens_domain::AnalysisRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
pub struct ImageUrl<'a> {
    pub url: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// Build the request body for one attempt against `model`.
    pub fn for_analysis(model: &'a str, request: &'a AnalysisRequest) -> Self {
        let generation = request.generation();
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: request.prompt(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: request.image_url(),
                        },
                    },
                ],
            }],
            max_tokens: generation.max_tokens,
            temperature: generation.temperature,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<MessageContent>,
}

/// Some providers return content as a list of parts instead of a string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ResponsePart>),
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
    /// Numeric status or a provider-specific string
    pub code: Option<Value>,
}

/// Wrapper used when only the error envelope of a failed response matters
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

impl ChatResponse {
    /// Text of the first choice, if any non-blank text was returned.
    pub fn first_text(&self) -> Option<String> {
        let content = self.choices.first()?.message.as_ref()?.content.as_ref()?;
        let text = match content {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<Vec<_>>()
                .join("\n"),
        };
        (!text.trim().is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hairlens_domain::{GenerationParams, ImageInput};

    #[test]
    fn test_request_shape() {
        let image = ImageInput::new(vec![1, 2, 3], "hair.png").unwrap();
        let request = AnalysisRequest::new(image, GenerationParams::default());
        let body = serde_json::to_value(ChatRequest::for_analysis("vision/model", &request)).unwrap();

        assert_eq!(body["model"], "vision/model");
        assert_eq!(body["max_tokens"], 2000);
        let content = &body["messages"][0]["content"];
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(content[0]["type"], "text");
        assert_eq!(content[1]["type"], "image_url");
        assert_eq!(content[1]["image_url"]["url"], "data:image/png;base64,AQID");
    }

    #[test]
    fn test_string_content() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":"hi"}}]}"#)
                .unwrap();
        assert_eq!(response.first_text().as_deref(), Some("hi"));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_part_list_content() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":[{"type":"text","text":"a"},{"type":"text","text":"b"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.first_text().as_deref(), Some("a\nb"));
    }

    #[test]
    fn test_blank_or_missing_content() {
        let blank: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap();
        assert!(blank.first_text().is_none());

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(empty.first_text().is_none());
    }

    #[test]
    fn test_error_envelope() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"error":{"message":"Rate limit exceeded","code":429}}"#).unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.message.as_deref(), Some("Rate limit exceeded"));
        assert_eq!(error.code, Some(Value::from(429)));
    }
}
