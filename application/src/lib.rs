//! Application layer for hairlens
//!
//! This crate contains the analysis use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::AnalyzerConfig;
pub use ports::{
    analysis_logger::{AnalysisEvent, AnalysisLogger, NoAnalysisLogger},
    progress::{AnalysisProgressNotifier, NoProgress},
    vision_gateway::{FailureCategory, GatewayError, VisionGateway},
};
pub use use_cases::analyze_image::{
    AnalysisOutcome, AnalysisState, AnalyzeImageError, AnalyzeImageUseCase, CascadeOutcome,
    ConfigurationError, ProviderFailure,
};
