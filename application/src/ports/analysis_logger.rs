//! Port for structured analysis logging.
//!
//! Defines the [`AnalysisLogger`] trait for recording cascade events
//! (attempts, provider failures, consistency decisions, the final result) to
//! a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable trail (JSONL) of how each result was produced.

use serde_json::Value;

/// A structured analysis event for logging.
pub struct AnalysisEvent {
    /// Event type identifier (e.g., "provider_attempt", "analysis_completed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AnalysisEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging analysis events.
///
/// `log` is synchronous and non-fallible; logging failures never disrupt an
/// analysis.
pub trait AnalysisLogger: Send + Sync {
    fn log(&self, event: AnalysisEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoAnalysisLogger;

impl AnalysisLogger for NoAnalysisLogger {
    fn log(&self, _event: AnalysisEvent) {}
}
