//! Domain layer for hairlens
//!
//! Pure business logic for turning a hair photo into a structured health
//! report. No I/O lives here.
//!
//! # Core Concepts
//!
//! ## Analysis result
//!
//! [`AnalysisResult`] is either a rejection (the photo is not usable hair) or
//! a full [`HairAnalysis`] with a [`HealthScore`], a [`Condition`] band,
//! eleven categorical attributes, insights and recommendations.
//!
//! ## Interpretation
//!
//! Provider replies are untrusted text. [`interpret_response`] parses JSON
//! when it can and falls back to keyword heuristics when it cannot, so a
//! reply always becomes a result.
//!
//! ## Consistency and synthesis
//!
//! - [`ConsistencyWindow`] reconciles repeated attempts against one provider
//! - [`OfflineSynthesizer`] produces a deterministic estimate when every
//!   provider failed

pub mod analysis;
pub mod config;
pub mod consistency;
pub mod core;
pub mod interpretation;
pub mod prompt;
pub mod synthesis;

// Re-export commonly used types
pub use analysis::{
    AnalysisResult, Condition, DAMAGE_TYPES, HairAnalysis, HairAttribute, HairDetails, HairInsights,
    HealthScore, InsightCategory, NONE_DETECTED, OFFLINE_MODEL_NAME, Recommendations,
    RejectedAnalysis, SCALP_ISSUES,
};
pub use config::{CascadeConfig, OutputFormat};
pub use consistency::{ConsistencyDecision, ConsistencyPolicy, ConsistencyWindow};
pub use core::{
    error::DomainError,
    provider::{DEFAULT_PROVIDER_IDS, ProviderCapability, ProviderDescriptor, default_lineup, lineup},
    request::{AnalysisRequest, GenerationParams, ImageInput},
};
pub use interpretation::{InterpretationPath, interpret_response, interpret_with_path};
pub use prompt::AnalysisPrompt;
pub use synthesis::{ImageFingerprint, OfflineSynthesizer};
