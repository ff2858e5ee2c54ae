//! CLI entrypoint for hairlens
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use hairlens_application::{
    AnalysisOutcome, AnalysisProgressNotifier, AnalyzeImageError, AnalyzeImageUseCase,
    AnalyzerConfig, ConfigurationError, NoProgress,
};
use hairlens_domain::{AnalysisResult, ImageFingerprint, ImageInput, OfflineSynthesizer};
use hairlens_infrastructure::{ChatCompletionsGateway, ConfigLoader, FileConfig, JsonlAnalysisLogger};
use hairlens_presentation::{
    Cli, ConsoleFormatter, OutputConfig, OutputFormatter, ProgressReporter, SimpleProgress,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting hairlens");

    // === Configuration ===
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    }
    .with_models(cli.model.clone());

    if cli.show_config {
        println!("{}", ConfigLoader::describe_sources(cli.config.as_ref()));
        println!();
        println!("{}", ConfigLoader::render(&file_config)?);
        return Ok(());
    }

    file_config.validate().context("Invalid configuration")?;

    let output = OutputConfig::resolve(
        cli.output.map(Into::into),
        file_config.output.format,
        file_config.output.color,
    );
    output.apply_color();

    let image_path = cli.image.as_deref().context("An image path is required")?;
    let image = read_image(image_path).await?;

    let result = if cli.offline {
        info!("Offline mode: skipping providers");
        OfflineSynthesizer::new().synthesize(&ImageFingerprint::of(&image), None)
    } else {
        analyze(&cli, &file_config, image).await?
    };

    println!("{}", ConsoleFormatter.render(&result, output.format));

    Ok(())
}

async fn read_image(path: &Path) -> Result<ImageInput> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    ImageInput::new(bytes, file_name).with_context(|| format!("Unusable image {}", path.display()))
}

async fn analyze(cli: &Cli, file_config: &FileConfig, image: ImageInput) -> Result<AnalysisResult> {
    let api_key = file_config.provider.resolve_api_key();
    let cascade = file_config.to_cascade_config()?;

    // === Dependency Injection ===
    let gateway = Arc::new(ChatCompletionsGateway::new(
        file_config.to_gateway_config(api_key.clone().unwrap_or_default()),
    )?);
    let mut use_case = AnalyzeImageUseCase::new(gateway, AnalyzerConfig::new(api_key, cascade));

    if let Some(path) = file_config.logging.analysis_log_path() {
        match JsonlAnalysisLogger::new(&path) {
            Some(logger) => {
                debug!("Writing analysis events to {}", logger.path().display());
                use_case = use_case.with_logger(Arc::new(logger));
            }
            None => warn!("Analysis log disabled: could not open {}", path.display()),
        }
    }

    let progress: Box<dyn AnalysisProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if cli.verbose > 0 {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let outcome: AnalysisOutcome = match use_case.run(image, progress.as_ref()).await {
        Ok(outcome) => outcome,
        Err(AnalyzeImageError::Configuration(ConfigurationError::MissingCredentials)) => {
            return Err(anyhow!(
                "No API key found. Set {} or provider.api_key in the config file, or use --offline.",
                file_config.provider.api_key_env
            ));
        }
        Err(e) => return Err(e.into()),
    };

    for failure in &outcome.failures {
        info!(
            provider = %failure.provider,
            category = %failure.category,
            "Provider skipped: {}",
            failure.error
        );
    }
    info!(
        state = outcome.state.as_str(),
        provider = outcome.provider.as_deref().unwrap_or("none"),
        "Analysis finished"
    );

    Ok(outcome.result)
}
