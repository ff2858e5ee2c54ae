//! Application-level configuration.
//!
//! [`AnalyzerConfig`] is injected into the orchestrator; the application
//! layer never reads the environment itself.

use hairlens_domain::CascadeConfig;

/// Everything the orchestrator needs besides its adapters.
#[derive(Clone, Default)]
pub struct AnalyzerConfig {
    /// Provider credential. Missing or blank fails the analysis up front.
    pub api_key: Option<String>,
    pub cascade: CascadeConfig,
}

impl AnalyzerConfig {
    pub fn new(api_key: Option<String>, cascade: CascadeConfig) -> Self {
        Self { api_key, cascade }
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

impl std::fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("cascade", &self.cascade)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_not_a_credential() {
        assert!(!AnalyzerConfig::default().has_credentials());
        assert!(!AnalyzerConfig::new(Some("  ".into()), CascadeConfig::default()).has_credentials());
        assert!(AnalyzerConfig::new(Some("sk-1".into()), CascadeConfig::default()).has_credentials());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = AnalyzerConfig::new(Some("sk-live-123".into()), CascadeConfig::default());
        let printed = format!("{config:?}");
        assert!(!printed.contains("sk-live-123"));
        assert!(printed.contains("<redacted>"));
    }
}
