//! Console output formatter for analysis results

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use hairlens_domain::{
    AnalysisResult, Condition, HairAnalysis, HairAttribute, InsightCategory, RejectedAnalysis,
};

/// Formats analysis results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete report
    pub fn format(result: &AnalysisResult) -> String {
        match result {
            AnalysisResult::Rejected(rejected) => Self::format_rejected(rejected),
            AnalysisResult::Succeeded(analysis) => Self::format_analysis(analysis),
        }
    }

    /// Format as JSON
    pub fn format_json(result: &AnalysisResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format score, condition and summary only (concise output)
    pub fn format_summary(result: &AnalysisResult) -> String {
        let analysis = match result {
            AnalysisResult::Rejected(rejected) => return Self::format_rejected(rejected),
            AnalysisResult::Succeeded(analysis) => analysis,
        };

        let mut output = String::new();
        if analysis.is_offline {
            output.push_str(&Self::degraded_notice(analysis));
        }
        output.push_str(&format!(
            "{} {}/100 ({})\n",
            "Hair health:".cyan().bold(),
            analysis.health_score,
            Self::condition_label(analysis.condition)
        ));
        if !analysis.analysis.is_empty() {
            output.push_str(&format!("\n{}\n", analysis.analysis));
        }
        output
    }

    fn format_analysis(analysis: &HairAnalysis) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Hair Health Report"));
        output.push('\n');

        if analysis.is_offline {
            output.push('\n');
            output.push_str(&Self::degraded_notice(analysis));
        }

        output.push_str(&format!(
            "\n{} {}/100  {}\n",
            "Health score:".cyan().bold(),
            analysis.health_score.to_string().bold(),
            Self::condition_label(analysis.condition)
        ));
        output.push_str(&format!("{} {}\n", "Model:".cyan().bold(), analysis.model_name));

        output.push_str(&Self::section_header("Details"));
        for attribute in HairAttribute::all() {
            output.push_str(&format!(
                "  {:<16} {}\n",
                format!("{}:", attribute.label()),
                analysis.details.get(attribute)
            ));
        }
        output.push_str(&format!(
            "  {:<16} {}\n",
            "Damage types:",
            analysis.details.damage_types.join(", ")
        ));
        output.push_str(&format!(
            "  {:<16} {}\n",
            "Scalp issues:",
            analysis.details.scalp_issues.join(", ")
        ));

        let insights: Vec<_> = InsightCategory::all()
            .into_iter()
            .filter(|c| !analysis.insights.get(*c).is_empty())
            .collect();
        if !insights.is_empty() {
            output.push_str(&Self::section_header("Insights"));
            for category in insights {
                output.push_str(&format!(
                    "  {} {}\n",
                    format!("{}:", category.label()).yellow().bold(),
                    analysis.insights.get(category)
                ));
            }
        }

        if !analysis.recommendations.is_empty() {
            output.push_str(&Self::section_header("Recommendations"));
            for (label, items) in analysis.recommendations.sections() {
                if items.is_empty() {
                    continue;
                }
                output.push_str(&format!("\n  {}\n", label.yellow().bold()));
                for item in items {
                    output.push_str(&format!("    * {}\n", item));
                }
            }
        }

        if !analysis.analysis.is_empty() {
            output.push_str(&Self::section_header("Summary"));
            output.push_str(&format!("\n{}\n", Self::indent(&analysis.analysis, "  ")));
        }

        if !analysis.is_offline
            && let Some(message) = &analysis.message
        {
            output.push_str(&format!("\n{} {}\n", "Note:".dimmed(), message));
        }

        output.push_str(&Self::footer());
        output
    }

    fn format_rejected(rejected: &RejectedAnalysis) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Image Not Analyzed"));
        output.push('\n');
        output.push_str(&format!(
            "\n{} {}\n",
            "Detected:".yellow().bold(),
            rejected.detected_content
        ));
        output.push_str(&format!("{}\n", rejected.message));
        output.push_str(&format!(
            "\n{} {}\n",
            "Model:".dimmed(),
            rejected.model_name
        ));
        output.push_str(&Self::footer());
        output
    }

    fn degraded_notice(analysis: &HairAnalysis) -> String {
        let mut notice = format!(
            "{}\n",
            "! Degraded analysis: this is an offline estimate, not an AI assessment."
                .yellow()
                .bold()
        );
        if let Some(message) = &analysis.message {
            notice.push_str(&format!("  {}\n", message));
        }
        notice
    }

    fn condition_label(condition: Condition) -> ColoredString {
        let label = condition.as_str();
        match condition {
            Condition::Excellent => label.green().bold(),
            Condition::Good => label.green(),
            Condition::Fair => label.yellow(),
            Condition::Poor => label.red().bold(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &AnalysisResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &AnalysisResult) -> String {
        Self::format_json(result)
    }

    fn format_summary(&self, result: &AnalysisResult) -> String {
        Self::format_summary(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hairlens_domain::{
        HairDetails, HealthScore, ImageFingerprint, OFFLINE_MODEL_NAME, OfflineSynthesizer,
        OutputFormat,
    };

    fn plain() {
        colored::control::set_override(false);
    }

    fn report() -> AnalysisResult {
        HairAnalysis::new(HealthScore::new(72), HairDetails::default(), "vision-a")
            .with_analysis("Healthy medium texture with light frizz.")
            .into()
    }

    #[test]
    fn test_full_report() {
        plain();
        let output = ConsoleFormatter::format(&report());
        assert!(output.contains("Hair Health Report"));
        assert!(output.contains("Health score: 72/100  Good"));
        assert!(output.contains("Curl pattern:"));
        assert!(output.contains("Damage types:    None Detected"));
        assert!(output.contains("Healthy medium texture"));
        assert!(!output.contains("Degraded"));
    }

    #[test]
    fn test_rejected_report() {
        plain();
        let result: AnalysisResult =
            RejectedAnalysis::new("A dog", "Please upload a clear photo of your hair.", "vision-a").into();
        let output = ConsoleFormatter::format(&result);
        assert!(output.contains("Image Not Analyzed"));
        assert!(output.contains("Detected: A dog"));
        assert!(!output.contains("Health score"));
    }

    #[test]
    fn test_offline_result_shows_degraded_notice() {
        plain();
        let fingerprint = ImageFingerprint::from_parts("hair.jpg", &[1, 2, 3, 4]);
        let result = OfflineSynthesizer::new().synthesize(&fingerprint, Some("Provider unavailable: 503"));
        let full = ConsoleFormatter::format(&result);
        let summary = ConsoleFormatter::format_summary(&result);
        for output in [&full, &summary] {
            assert!(output.contains("Degraded analysis"));
            assert!(output.contains("Provider unavailable: 503"));
        }
        assert!(full.contains(OFFLINE_MODEL_NAME));
    }

    #[test]
    fn test_summary_is_concise() {
        plain();
        let output = ConsoleFormatter.render(&report(), OutputFormat::Summary);
        assert!(output.starts_with("Hair health: 72/100 (Good)"));
        assert!(!output.contains("Details"));
    }

    #[test]
    fn test_json_output_is_contract() {
        let output = ConsoleFormatter.render(&report(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["isHairImage"], true);
        assert_eq!(value["healthScore"], 72);
        assert_eq!(value["modelName"], "vision-a");
    }
}
