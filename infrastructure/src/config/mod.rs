//! Configuration file loading for hairlens
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./hairlens.toml` or `./.hairlens.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/hairlens/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileCascadeConfig, FileConfig, FileGenerationConfig,
    FileLoggingConfig, FileOutputConfig, FileProviderConfig,
};
pub use loader::ConfigLoader;
