//! Response interpretation: provider reply text → [`AnalysisResult`].
//!
//! Pure domain logic, no I/O. The interpreter never fails:
//!
//! 1. strip markdown fences
//! 2. parse the first `{...}` span as JSON ([`json`])
//! 3. rejection object → `Rejected`; object with required fields → `Succeeded`
//! 4. anything else → keyword heuristics ([`heuristic`])

pub mod heuristic;
pub mod json;

use crate::analysis::AnalysisResult;
use tracing::debug;

/// Which strategy produced an interpreted result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretationPath {
    Json,
    Heuristic,
}

impl InterpretationPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterpretationPath::Json => "json",
            InterpretationPath::Heuristic => "heuristic",
        }
    }
}

/// Interpret a provider reply, tagging the result with `model_name`.
pub fn interpret_response(text: &str, model_name: &str) -> AnalysisResult {
    interpret_with_path(text, model_name).0
}

/// Same as [`interpret_response`], also reporting the path taken.
pub fn interpret_with_path(text: &str, model_name: &str) -> (AnalysisResult, InterpretationPath) {
    let cleaned = json::strip_code_fences(text);

    if let Some(object) = json::extract_json_object(&cleaned) {
        if let Some(result) = json::interpret_object(&object, model_name) {
            debug!(model = model_name, "Interpreted provider reply as JSON");
            return (result, InterpretationPath::Json);
        }
        debug!(
            model = model_name,
            "JSON reply lacks required fields; falling back to heuristics"
        );
    } else {
        debug!(model = model_name, "No JSON object in reply; falling back to heuristics");
    }

    (
        heuristic::extract(&cleaned, model_name),
        InterpretationPath::Heuristic,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Condition;

    #[test]
    fn test_fenced_json_reply() {
        let reply = r#"```json
{"isHairImage": true, "healthScore": 68, "condition": "Good",
 "details": {"texture": "Fine", "damage": "Mild"}}
```"#;
        let (result, path) = interpret_with_path(reply, "vision-a");
        assert_eq!(path, InterpretationPath::Json);
        let analysis = result.into_succeeded().unwrap();
        assert_eq!(analysis.health_score.value(), 68);
        assert_eq!(analysis.condition, Condition::Good);
        assert_eq!(analysis.details.texture, "Fine");
        assert_eq!(analysis.details.damage, "Mild");
    }

    #[test]
    fn test_rejection_is_deterministic() {
        let reply = r#"{"isHairImage": false, "detectedContent": "Blurry image"}"#;
        let first = interpret_response(reply, "vision-a");
        let second = interpret_response(reply, "vision-a");
        assert!(first.is_rejected());
        assert_eq!(first, second);
    }

    #[test]
    fn test_incomplete_json_falls_back_to_heuristics() {
        let reply = r#"{"healthScore": 45} The hair shows moderate damage."#;
        let (result, path) = interpret_with_path(reply, "m");
        assert_eq!(path, InterpretationPath::Heuristic);
        let analysis = result.into_succeeded().unwrap();
        assert_eq!(analysis.details.damage, "Moderate");
    }

    #[test]
    fn test_plain_text_reply() {
        let reply = "Your hair health score: 82/100 with moderate damage at the tips.";
        let analysis = interpret_response(reply, "text-model").into_succeeded().unwrap();
        assert_eq!(analysis.health_score.value(), 82);
        assert_eq!(analysis.details.damage, "Moderate");
        assert_eq!(analysis.model_name, "text-model");
    }

    #[test]
    fn test_empty_reply_still_yields_result() {
        let analysis = interpret_response("", "m").into_succeeded().unwrap();
        assert_eq!(analysis.health_score.value(), 75);
        assert_eq!(analysis.condition, Condition::Good);
    }
}
