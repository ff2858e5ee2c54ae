//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving analysis events; disabled when unset
    pub analysis_log: Option<String>,
}

impl FileLoggingConfig {
    /// The log path with a leading `~/` expanded to the home directory
    pub fn analysis_log_path(&self) -> Option<PathBuf> {
        let raw = self.analysis_log.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
            None => Some(PathBuf::from(raw)),
        }
    }
}
