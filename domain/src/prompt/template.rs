//! Prompt template for hair image analysis

use crate::analysis::{Condition, DAMAGE_TYPES, HairAttribute, NONE_DETECTED, SCALP_ISSUES};

/// Instruction block for the analysis request
pub struct AnalysisPrompt;

impl AnalysisPrompt {
    /// Full instruction text.
    ///
    /// Field enumerations are rendered from the same vocabulary tables the
    /// interpreter validates against.
    pub fn instructions() -> String {
        let mut prompt = String::from(
            r#"You are a professional trichologist analyzing a photo of human hair.

STEP 1 - Image check.
If the image is blurry, too dark, unclear, or does not clearly show human hair,
respond ONLY with this JSON and nothing else:
{"isHairImage": false, "detectedContent": "<what the image shows>", "message": "<why it cannot be analyzed>"}

STEP 2 - Analysis.
Otherwise respond ONLY with a JSON object of this exact shape:
{
  "isHairImage": true,
  "healthScore": <integer 1-100>,
  "condition": "<one of: "#,
        );

        let conditions: Vec<&str> = Condition::all().iter().map(|c| c.as_str()).collect();
        prompt.push_str(&conditions.join(", "));
        prompt.push_str(">\",\n  \"details\": {\n");

        for attribute in HairAttribute::all() {
            prompt.push_str(&format!(
                "    \"{}\": \"<one of: {}>\",\n",
                attribute.field_name(),
                attribute.allowed_values().join(", ")
            ));
        }
        prompt.push_str(&format!(
            "    \"damageTypes\": [<any of: {}; or \"{}\">],\n",
            DAMAGE_TYPES.join(", "),
            NONE_DETECTED
        ));
        prompt.push_str(&format!(
            "    \"scalpIssues\": [<any of: {}; or \"{}\">]\n  }},\n",
            SCALP_ISSUES.join(", "),
            NONE_DETECTED
        ));

        prompt.push_str(
            r#"  "insights": {
    "texture": "<1-2 sentences>", "thickness": "<1-2 sentences>",
    "porosity": "<1-2 sentences>", "moisture": "<1-2 sentences>",
    "shine": "<1-2 sentences>", "damage": "<1-2 sentences>", "scalp": "<1-2 sentences>"
  },
  "recommendations": {
    "products": [], "treatments": [], "routine": [],
    "styling": [], "lifestyle": [], "avoid": []
  },
  "analysis": "<3-4 sentence overall summary>"
}

SCORING RUBRIC for healthScore:
- 80-100 (Excellent): strong shine, smooth cuticle, no visible split ends or breakage, healthy scalp.
- 60-79 (Good): mostly healthy with minor dryness, light frizz, or a few split ends.
- 40-59 (Fair): noticeable dryness or dullness, frequent split ends, moderate frizz or breakage.
- 1-39 (Poor): severe damage, widespread breakage, very dry or brittle strands, or scalp problems.

The condition MUST match the healthScore band above.
Use only the listed values for every categorical field.
Do not wrap the JSON in markdown and do not add any text outside the JSON."#,
        );

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_include_rejection_contract() {
        let prompt = AnalysisPrompt::instructions();
        assert!(prompt.contains(r#""isHairImage": false"#));
        assert!(prompt.contains("blurry"));
    }

    #[test]
    fn test_instructions_enumerate_every_attribute() {
        let prompt = AnalysisPrompt::instructions();
        for attribute in HairAttribute::all() {
            assert!(prompt.contains(attribute.field_name()));
            for value in attribute.allowed_values() {
                assert!(prompt.contains(value), "missing {}", value);
            }
        }
        assert!(prompt.contains("Split Ends"));
        assert!(prompt.contains("Dandruff"));
    }

    #[test]
    fn test_instructions_include_four_bands() {
        let prompt = AnalysisPrompt::instructions();
        for band in ["80-100", "60-79", "40-59", "1-39"] {
            assert!(prompt.contains(band));
        }
    }
}
