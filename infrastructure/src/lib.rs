//! Infrastructure layer for hairlens
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the chat-completions vision gateway, configuration file
//! loading, and the JSONL analysis logger.

pub mod chat;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use chat::{ChatCompletionsGateway, ChatGatewayConfig};
pub use config::{
    ConfigLoader, ConfigValidationError, FileCascadeConfig, FileConfig, FileGenerationConfig,
    FileLoggingConfig, FileOutputConfig, FileProviderConfig,
};
pub use logging::JsonlAnalysisLogger;
