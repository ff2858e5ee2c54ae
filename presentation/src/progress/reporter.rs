//! Progress reporting for the provider cascade

use colored::Colorize;
use hairlens_application::{AnalysisProgressNotifier, FailureCategory};
use hairlens_domain::{AnalysisResult, ProviderDescriptor};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner on stderr
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
    total: Mutex<usize>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            total: Mutex::new(0),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.spinner.lock()
            && let Some(spinner) = guard.as_ref()
        {
            f(spinner);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisProgressNotifier for ProgressReporter {
    fn on_cascade_start(&self, total_providers: usize) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.set_prefix("Analyzing");
        spinner.set_message("Preparing image...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut total) = self.total.lock() {
            *total = total_providers;
        }
        if let Ok(mut guard) = self.spinner.lock() {
            *guard = Some(spinner);
        }
    }

    fn on_attempt_start(&self, provider: &ProviderDescriptor, attempt: u32) {
        let total = self.total.lock().map(|t| *t).unwrap_or(0);
        self.with_spinner(|spinner| {
            spinner.set_message(format!(
                "{} (provider {}/{}, attempt {})",
                provider.id,
                provider.rank + 1,
                total,
                attempt
            ));
        });
    }

    fn on_provider_failed(&self, provider: &ProviderDescriptor, category: FailureCategory, _error: &str) {
        self.with_spinner(|spinner| {
            spinner.println(format!(
                "  {} {} ({})",
                "x".red(),
                provider.id,
                category.as_str().dimmed()
            ));
        });
    }

    fn on_synthesizing(&self, _reason: Option<&str>) {
        self.with_spinner(|spinner| {
            spinner.set_message("All providers failed, building offline estimate...");
        });
    }

    fn on_complete(&self, result: &AnalysisResult) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(spinner) = guard.take()
        {
            let status = if result.is_synthesized() {
                format!("{} offline estimate", "!".yellow())
            } else {
                format!("{} {}", "v".green(), result.model_name())
            };
            spinner.finish_with_message(status);
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl AnalysisProgressNotifier for SimpleProgress {
    fn on_cascade_start(&self, total_providers: usize) {
        eprintln!(
            "{} {} ({} providers)",
            "->".cyan(),
            "Analyzing image".bold(),
            total_providers
        );
    }

    fn on_attempt_start(&self, provider: &ProviderDescriptor, attempt: u32) {
        eprintln!("  {} {} (attempt {})", "..".dimmed(), provider.id, attempt);
    }

    fn on_provider_failed(&self, provider: &ProviderDescriptor, category: FailureCategory, error: &str) {
        eprintln!("  {} {} [{}] {}", "x".red(), provider.id, category, error);
    }

    fn on_consistency_decided(&self, provider: &ProviderDescriptor, decision: &str) {
        eprintln!("  {} {} ({})", "v".green(), provider.id, decision);
    }

    fn on_synthesizing(&self, _reason: Option<&str>) {
        eprintln!("  {} all providers failed, using offline estimate", "!".yellow());
    }

    fn on_complete(&self, _result: &AnalysisResult) {
        eprintln!();
    }
}
