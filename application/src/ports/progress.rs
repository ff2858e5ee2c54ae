//! Progress notification port
//!
//! Defines the interface for reporting progress while an image is analyzed.

use super::vision_gateway::FailureCategory;
use hairlens_domain::{AnalysisResult, ProviderDescriptor};

/// Callback for progress updates during an analysis
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain lines, etc.)
pub trait AnalysisProgressNotifier: Send + Sync {
    /// Called once before the first provider is tried
    fn on_cascade_start(&self, total_providers: usize);

    /// Called before each attempt against a provider (attempts count from 1)
    fn on_attempt_start(&self, provider: &ProviderDescriptor, attempt: u32);

    /// Called when a provider is abandoned and the cascade moves on
    fn on_provider_failed(&self, provider: &ProviderDescriptor, category: FailureCategory, error: &str);

    /// Called when the consistency window for a provider is decided
    fn on_consistency_decided(&self, _provider: &ProviderDescriptor, _decision: &str) {}

    /// Called when every provider failed and an offline estimate is built
    fn on_synthesizing(&self, _reason: Option<&str>) {}

    /// Called with the final result
    fn on_complete(&self, result: &AnalysisResult);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl AnalysisProgressNotifier for NoProgress {
    fn on_cascade_start(&self, _total_providers: usize) {}
    fn on_attempt_start(&self, _provider: &ProviderDescriptor, _attempt: u32) {}
    fn on_provider_failed(&self, _provider: &ProviderDescriptor, _category: FailureCategory, _error: &str) {}
    fn on_complete(&self, _result: &AnalysisResult) {}
}
