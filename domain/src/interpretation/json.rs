//! JSON-first interpretation of provider replies.
//!
//! Providers are asked for strict JSON but routinely wrap it in markdown
//! fences, prepend commentary, or drift from the vocabulary. This module
//! locates the object, then validates and repairs every field.

use crate::analysis::{
    AnalysisResult, Condition, HairAnalysis, HairAttribute, HairDetails, HairInsights,
    HealthScore, InsightCategory, Recommendations, RejectedAnalysis, attributes::normalize_list,
};
use serde_json::{Map, Value};

const DEFAULT_DETECTED_CONTENT: &str = "Unknown";
const DEFAULT_REJECTION_MESSAGE: &str =
    "The image could not be analyzed. Please upload a clear, well-lit photo of your hair.";

/// Remove markdown code-fence artifacts (```` ``` ```` and ```` ```json ````).
pub fn strip_code_fences(text: &str) -> String {
    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if let Some(rest) = trimmed.strip_prefix("```") {
                rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric())
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        .replace("```", "")
}

/// Parse the span from the first `{` to the last `}` as a JSON object.
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Interpret a parsed object.
///
/// Returns `None` when the object is neither a rejection nor carries the
/// required success fields (`healthScore`, `condition`, `details`).
pub fn interpret_object(object: &Map<String, Value>, model_name: &str) -> Option<AnalysisResult> {
    if declares_not_hair(object) {
        return Some(AnalysisResult::Rejected(RejectedAnalysis::new(
            non_empty_str(object.get("detectedContent")).unwrap_or(DEFAULT_DETECTED_CONTENT),
            non_empty_str(object.get("message")).unwrap_or(DEFAULT_REJECTION_MESSAGE),
            model_name,
        )));
    }

    let score = parse_score(object.get("healthScore")?)?;
    let raw_condition = object.get("condition")?;
    let details = object.get("details")?.as_object()?;

    let condition = raw_condition
        .as_str()
        .and_then(|c| c.parse::<Condition>().ok())
        .unwrap_or_else(|| Condition::from_score(score));

    let mut analysis = HairAnalysis::new(score, parse_details(details), model_name)
        .with_condition(condition)
        .with_insights(parse_insights(object.get("insights")))
        .with_recommendations(parse_recommendations(object.get("recommendations")))
        .with_analysis(non_empty_str(object.get("analysis")).unwrap_or_default());

    if let Some(message) = non_empty_str(object.get("message")) {
        analysis = analysis.with_message(message);
    }

    Some(AnalysisResult::Succeeded(analysis))
}

fn declares_not_hair(object: &Map<String, Value>) -> bool {
    match object.get("isHairImage") {
        Some(Value::Bool(flag)) => !flag,
        Some(Value::String(flag)) => flag.trim().eq_ignore_ascii_case("false"),
        _ => false,
    }
}

/// Accepts numbers, numeric strings and strings like `"82/100"`.
fn parse_score(value: &Value) -> Option<HealthScore> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(HealthScore::new)
            .or_else(|| n.as_f64().map(HealthScore::from_f64)),
        Value::String(s) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            digits.parse::<f64>().ok().map(HealthScore::from_f64)
        }
        _ => None,
    }
}

fn parse_details(object: &Map<String, Value>) -> HairDetails {
    let mut details = HairDetails::default();
    for attribute in HairAttribute::all() {
        if let Some(raw) = object.get(attribute.field_name()).and_then(Value::as_str) {
            details.set(attribute, raw);
        }
    }
    details.damage_types = normalize_list(string_list(object.get("damageTypes")));
    details.scalp_issues = normalize_list(string_list(object.get("scalpIssues")));
    details
}

fn parse_insights(value: Option<&Value>) -> HairInsights {
    let mut insights = HairInsights::default();
    let Some(object) = value.and_then(Value::as_object) else {
        return insights;
    };
    for category in InsightCategory::all() {
        let key = insight_key(category);
        if let Some(text) = non_empty_str(object.get(key)) {
            insights.set(category, text);
        }
    }
    insights
}

fn insight_key(category: InsightCategory) -> &'static str {
    match category {
        InsightCategory::Texture => "texture",
        InsightCategory::Thickness => "thickness",
        InsightCategory::Porosity => "porosity",
        InsightCategory::Moisture => "moisture",
        InsightCategory::Shine => "shine",
        InsightCategory::Damage => "damage",
        InsightCategory::Scalp => "scalp",
    }
}

fn parse_recommendations(value: Option<&Value>) -> Recommendations {
    let Some(object) = value.and_then(Value::as_object) else {
        return Recommendations::default();
    };
    Recommendations {
        products: string_list(object.get("products")),
        treatments: string_list(object.get("treatments")),
        routine: string_list(object.get("routine")),
        styling: string_list(object.get("styling")),
        lifestyle: string_list(object.get("lifestyle")),
        avoid: string_list(object.get("avoid")),
    }
}

/// Arrays of strings, or a single comma-separated string.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::NONE_DETECTED;

    #[test]
    fn test_strip_code_fences() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(text).trim(), "{\"a\": 1}");

        let inline = "Here you go: ```{\"a\": 1}```";
        assert_eq!(strip_code_fences(inline), "Here you go: {\"a\": 1}");
    }

    #[test]
    fn test_extract_json_object_with_commentary() {
        let text = "Sure! Here is the analysis:\n{\"healthScore\": 70}\nHope this helps.";
        let object = extract_json_object(text).unwrap();
        assert_eq!(object["healthScore"], 70);
    }

    #[test]
    fn test_extract_json_object_invalid() {
        assert!(extract_json_object("no braces here").is_none());
        assert!(extract_json_object("} backwards {").is_none());
        assert!(extract_json_object("{not json}").is_none());
        assert!(extract_json_object("[1, 2]").is_none());
    }

    #[test]
    fn test_rejection_object() {
        let object = extract_json_object(r#"{"isHairImage": false, "detectedContent": "Blurry image"}"#)
            .unwrap();
        let result = interpret_object(&object, "vision-a").unwrap();
        let AnalysisResult::Rejected(rejected) = result else {
            panic!("expected rejection");
        };
        assert_eq!(rejected.detected_content, "Blurry image");
        assert_eq!(rejected.model_name, "vision-a");
        assert!(!rejected.message.is_empty());
    }

    #[test]
    fn test_rejection_flag_as_string() {
        let object = extract_json_object(r#"{"isHairImage": "false"}"#).unwrap();
        assert!(interpret_object(&object, "m").unwrap().is_rejected());
    }

    #[test]
    fn test_success_object_repairs_fields() {
        let object = extract_json_object(
            r#"{
                "isHairImage": true,
                "healthScore": 130,
                "condition": "superb",
                "details": {
                    "texture": "coarse",
                    "curlPattern": "Curly (3B)",
                    "porosity": "medium-ish",
                    "damageTypes": [],
                    "scalpIssues": "Dandruff, Buildup"
                },
                "insights": {"texture": "Coarse strands."},
                "recommendations": {"products": ["Leave-in conditioner"]},
                "analysis": "Overall healthy."
            }"#,
        )
        .unwrap();

        let analysis = interpret_object(&object, "vision-a")
            .unwrap()
            .into_succeeded()
            .unwrap();

        assert_eq!(analysis.health_score.value(), 100);
        assert_eq!(analysis.condition, Condition::Excellent);
        assert_eq!(analysis.details.texture, "Coarse");
        assert_eq!(analysis.details.curl_pattern, "Curly");
        assert_eq!(analysis.details.porosity, "Normal");
        assert_eq!(analysis.details.damage_types, vec![NONE_DETECTED]);
        assert_eq!(analysis.details.scalp_issues, vec!["Dandruff", "Buildup"]);
        assert_eq!(analysis.insights.texture, "Coarse strands.");
        assert_eq!(analysis.recommendations.products, vec!["Leave-in conditioner"]);
        assert_eq!(analysis.analysis, "Overall healthy.");
        assert_eq!(analysis.model_name, "vision-a");
    }

    #[test]
    fn test_score_as_string() {
        let object = extract_json_object(
            r#"{"healthScore": "82/100", "condition": "Excellent", "details": {}}"#,
        )
        .unwrap();
        let result = interpret_object(&object, "m").unwrap();
        assert_eq!(result.health_score(), Some(HealthScore::new(82)));
    }

    #[test]
    fn test_missing_required_fields() {
        let object = extract_json_object(r#"{"healthScore": 70, "condition": "Good"}"#).unwrap();
        assert!(interpret_object(&object, "m").is_none());

        let object =
            extract_json_object(r#"{"healthScore": null, "condition": "Good", "details": {}}"#)
                .unwrap();
        assert!(interpret_object(&object, "m").is_none());
    }
}
