//! `[output]` section: how reports are printed

use hairlens_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// Report rendering preferences
///
/// `format` stays `None` unless a file sets it, so a `-o` flag and the
/// built-in default (full report) can be told apart when resolving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// `full`, `summary` or `json`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    /// ANSI colors in the full and summary reports
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}
