//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_FILES: [&str; 2] = ["hairlens.toml", ".hairlens.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./hairlens.toml` or `./.hairlens.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/hairlens/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load defaults merged with a single file, ignoring discovery
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("hairlens").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for --show-config)
    pub fn describe_sources(explicit: Option<&PathBuf>) -> String {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            lines.push(format!("  [{mark:^7}] Explicit: {}", path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [ FOUND ] Project:  {}", path.display())),
            None => lines.push("  [       ] Project:  ./hairlens.toml or ./.hairlens.toml".to_string()),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "" };
            lines.push(format!("  [{mark:^7}] Global:   {}", path.display()));
        }

        lines.push("  [       ] Default:  built-in defaults".to_string());
        lines.join("\n")
    }

    /// Render the effective configuration as TOML, with any direct API key masked
    pub fn render(config: &FileConfig) -> Result<String, toml::ser::Error> {
        let mut shown = config.clone();
        if shown.provider.api_key.is_some() {
            shown.provider.api_key = Some("<redacted>".to_string());
        }
        toml::to_string_pretty(&shown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.cascade.max_attempts, 2);
        assert!(config.logging.analysis_log.is_none());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("hairlens"));
    }

    #[test]
    fn test_load_file_merges_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[cascade]\nmodels = [\"only/one\"]\n\n[generation]\ntemperature = 0.4"
        )
        .unwrap();

        let config = ConfigLoader::load_file(file.path()).unwrap();
        assert_eq!(config.cascade.models, vec!["only/one"]);
        assert_eq!(config.cascade.max_attempts, 2);
        assert!((config.generation.temperature - 0.4).abs() < f32::EPSILON);
        assert_eq!(config.generation.max_tokens, 2000);
    }

    #[test]
    fn test_load_file_reports_type_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[cascade]\nmax_attempts = \"two\"").unwrap();
        assert!(ConfigLoader::load_file(file.path()).is_err());
    }

    #[test]
    fn test_render_masks_api_key() {
        let mut config = FileConfig::default();
        config.provider.api_key = Some("sk-secret".to_string());
        let rendered = ConfigLoader::render(&config).unwrap();
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("[cascade]"));
    }
}
