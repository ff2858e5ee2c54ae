//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full report with details, insights and recommendations
    Full,
    /// Score, condition and summary only
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for hairlens_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => hairlens_domain::OutputFormat::Full,
            OutputFormat::Summary => hairlens_domain::OutputFormat::Summary,
            OutputFormat::Json => hairlens_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for hairlens
#[derive(Parser, Debug)]
#[command(name = "hairlens")]
#[command(author, version, about = "Hair health analysis from a photo")]
#[command(long_about = r#"
hairlens sends a hair photo to a cascade of vision models and turns the reply
into a structured hair health report.

Providers are tried in order. Each one gets up to two attempts whose scores
are cross-checked; a failing provider hands over to the next one. When every
provider fails, an offline estimate is produced and clearly marked.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./hairlens.toml     Project-level config
3. ~/.config/hairlens/config.toml   Global config

The API key is read from the environment variable named by
provider.api_key_env (OPENROUTER_API_KEY by default).

Example:
  hairlens photos/my-hair.jpg
  hairlens -o json -m qwen/qwen2.5-vl-72b-instruct:free selfie.png
  hairlens --offline photos/my-hair.jpg
"#)]
pub struct Cli {
    /// Photo to analyze
    #[arg(required_unless_present = "show_config")]
    pub image: Option<PathBuf>,

    /// Models to try, in order (can be specified multiple times)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Output format (defaults to the configured format, then "full")
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Skip providers and produce an offline estimate (no API key needed)
    #[arg(long)]
    pub offline: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_repeated_models() {
        let cli = Cli::parse_from(["hairlens", "-m", "a/vision", "-m", "b/vision", "-vv", "hair.jpg"]);
        assert_eq!(cli.model, vec!["a/vision", "b/vision"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.image, Some(PathBuf::from("hair.jpg")));
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_image_required_unless_show_config() {
        assert!(Cli::try_parse_from(["hairlens"]).is_err());
        let cli = Cli::try_parse_from(["hairlens", "--show-config"]).unwrap();
        assert!(cli.show_config);
    }

    #[test]
    fn test_output_format_conversion() {
        let cli = Cli::parse_from(["hairlens", "-o", "summary", "--offline", "x.png"]);
        assert_eq!(cli.output, Some(OutputFormat::Summary));
        assert!(cli.offline);
        assert_eq!(
            hairlens_domain::OutputFormat::from(OutputFormat::Json),
            hairlens_domain::OutputFormat::Json
        );
    }
}
