//! Presentation-level configuration

use hairlens_domain::OutputFormat;

/// Resolved output settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Full,
            color: true,
        }
    }
}

impl OutputConfig {
    /// Resolve the format: command line, then config file, then default.
    pub fn resolve(cli: Option<OutputFormat>, file: Option<OutputFormat>, color: bool) -> Self {
        Self {
            format: cli.or(file).unwrap_or_default(),
            color,
        }
    }

    /// Turn off terminal colors process-wide when disabled
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}
