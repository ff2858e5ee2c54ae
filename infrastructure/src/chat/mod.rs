//! OpenAI-compatible chat-completions adapter
//!
//! Implements the [`VisionGateway`](hairlens_application::VisionGateway) port
//! for any endpoint speaking the chat-completions protocol (OpenRouter by
//! default).

pub mod error;
pub mod gateway;
pub mod protocol;

pub use gateway::{ChatCompletionsGateway, ChatGatewayConfig};
