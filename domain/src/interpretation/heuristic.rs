//! Keyword heuristics for replies that carry no usable JSON.
//!
//! Everything here is table-driven: each table is an ordered list of rules
//! evaluated over the lower-cased reply, and the first matching rule wins.
//! Keywords only match whole words, and occurrences directly preceded by a
//! negation ("no", "not", "without") are ignored, so "no frizz" never counts
//! as frizz and "thick" never matches inside "thickness".

use crate::analysis::{
    AnalysisResult, Condition, DAMAGE_TYPES, HairAnalysis, HairAttribute, HairDetails,
    HairInsights, HealthScore, InsightCategory, RejectedAnalysis, SCALP_ISSUES,
    attributes::normalize_list, recommendations,
};
use crate::core::string::{sentences, truncate};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Score used when nothing in the text adjusts it
pub const BASELINE_SCORE: i64 = 75;

const MAX_SUMMARY_LEN: usize = 600;

/// Keyword set → value for one attribute
pub struct AttributeRule {
    pub attribute: HairAttribute,
    pub keywords: &'static [&'static str],
    pub value: &'static str,
}

/// Qualitative phrase → score adjustment
pub struct ScoreRule {
    pub keywords: &'static [&'static str],
    pub delta: i64,
}

/// Vocabulary entry → phrases that signal it
pub struct VocabularyRule {
    pub term: &'static str,
    pub keywords: &'static [&'static str],
}

pub const ATTRIBUTE_RULES: &[AttributeRule] = &[
    AttributeRule { attribute: HairAttribute::Texture, keywords: &["coarse"], value: "Coarse" },
    AttributeRule { attribute: HairAttribute::Texture, keywords: &["fine hair", "fine texture", "fine strands", "fine-textured"], value: "Fine" },
    AttributeRule { attribute: HairAttribute::Texture, keywords: &["medium texture", "medium-textured"], value: "Medium" },
    AttributeRule { attribute: HairAttribute::Thickness, keywords: &["thick hair", "thick strands", "thick"], value: "Thick" },
    AttributeRule { attribute: HairAttribute::Thickness, keywords: &["thin hair", "thin strands"], value: "Thin" },
    AttributeRule { attribute: HairAttribute::Density, keywords: &["high density", "dense"], value: "High" },
    AttributeRule { attribute: HairAttribute::Density, keywords: &["low density", "sparse"], value: "Low" },
    AttributeRule { attribute: HairAttribute::Porosity, keywords: &["high porosity", "highly porous"], value: "High" },
    AttributeRule { attribute: HairAttribute::Porosity, keywords: &["low porosity"], value: "Low" },
    AttributeRule { attribute: HairAttribute::Elasticity, keywords: &["good elasticity", "high elasticity", "elastic"], value: "High" },
    AttributeRule { attribute: HairAttribute::Elasticity, keywords: &["low elasticity", "poor elasticity", "brittle"], value: "Low" },
    AttributeRule { attribute: HairAttribute::CurlPattern, keywords: &["coily", "kinky", "type 4", "type 4a", "type 4b", "type 4c"], value: "Coily" },
    AttributeRule { attribute: HairAttribute::CurlPattern, keywords: &["curly", "curls", "type 3", "type 3a", "type 3b", "type 3c"], value: "Curly" },
    AttributeRule { attribute: HairAttribute::CurlPattern, keywords: &["wavy", "waves", "type 2", "type 2a", "type 2b", "type 2c"], value: "Wavy" },
    AttributeRule { attribute: HairAttribute::CurlPattern, keywords: &["straight"], value: "Straight" },
    AttributeRule { attribute: HairAttribute::Moisture, keywords: &["oily hair", "greasy"], value: "Oily" },
    AttributeRule { attribute: HairAttribute::Moisture, keywords: &["dehydrated", "parched", "dry hair", "dry ends", "dryness", "dry"], value: "Dry" },
    AttributeRule { attribute: HairAttribute::Moisture, keywords: &["well moisturized", "well-moisturized", "hydrated", "balanced moisture"], value: "Balanced" },
    AttributeRule { attribute: HairAttribute::Shine, keywords: &["dull", "dullness", "lackluster", "lacks shine"], value: "Dull" },
    AttributeRule { attribute: HairAttribute::Shine, keywords: &["shiny", "glossy", "lustrous", "good shine", "healthy shine"], value: "Shiny" },
    AttributeRule { attribute: HairAttribute::Frizz, keywords: &["no frizz", "frizz-free"], value: "None" },
    AttributeRule { attribute: HairAttribute::Frizz, keywords: &["very frizzy", "high frizz", "lots of frizz", "significant frizz"], value: "High" },
    AttributeRule { attribute: HairAttribute::Frizz, keywords: &["frizzy", "frizz"], value: "Moderate" },
    AttributeRule { attribute: HairAttribute::Damage, keywords: &["severe damage", "severely damaged", "heavily damaged", "extensive damage"], value: "Severe" },
    AttributeRule { attribute: HairAttribute::Damage, keywords: &["moderate damage", "moderately damaged"], value: "Moderate" },
    AttributeRule { attribute: HairAttribute::Damage, keywords: &["mild damage", "minor damage", "slight damage", "slightly damaged"], value: "Mild" },
    AttributeRule { attribute: HairAttribute::Damage, keywords: &["no damage", "no visible damage", "undamaged"], value: "None" },
    AttributeRule { attribute: HairAttribute::ScalpCondition, keywords: &["irritated scalp", "scalp irritation", "inflamed"], value: "Irritated" },
    AttributeRule { attribute: HairAttribute::ScalpCondition, keywords: &["oily scalp", "greasy scalp"], value: "Oily" },
    AttributeRule { attribute: HairAttribute::ScalpCondition, keywords: &["dry scalp", "flaky scalp"], value: "Dry" },
    AttributeRule { attribute: HairAttribute::ScalpCondition, keywords: &["healthy scalp"], value: "Healthy" },
];

pub const SCORE_RULES: &[ScoreRule] = &[
    ScoreRule { keywords: &["no damage", "no visible damage", "undamaged"], delta: 15 },
    ScoreRule { keywords: &["healthy scalp"], delta: 5 },
    ScoreRule { keywords: &["shiny", "glossy", "lustrous"], delta: 5 },
    ScoreRule { keywords: &["well moisturized", "well-moisturized"], delta: 5 },
    ScoreRule { keywords: &["severe damage", "severely damaged", "heavily damaged"], delta: -25 },
    ScoreRule { keywords: &["moderate damage", "moderately damaged"], delta: -10 },
    ScoreRule { keywords: &["split end", "split ends"], delta: -8 },
    ScoreRule { keywords: &["breakage"], delta: -10 },
    ScoreRule { keywords: &["dull", "dullness"], delta: -10 },
    ScoreRule { keywords: &["dry", "dryness"], delta: -5 },
    ScoreRule { keywords: &["frizz", "frizzy"], delta: -5 },
    ScoreRule { keywords: &["dandruff"], delta: -8 },
];

pub const DAMAGE_TYPE_RULES: &[VocabularyRule] = &[
    VocabularyRule { term: "Split Ends", keywords: &["split end", "split ends"] },
    VocabularyRule { term: "Breakage", keywords: &["breakage", "broken strands", "snapping"] },
    VocabularyRule { term: "Heat Damage", keywords: &["heat damage", "heat-damaged", "heat styling damage"] },
    VocabularyRule { term: "Chemical Damage", keywords: &["chemical damage", "chemically", "bleach", "bleached", "bleaching", "relaxer", "relaxers", "relaxed"] },
    VocabularyRule { term: "Color Damage", keywords: &["color damage", "colour damage", "color-treated", "dye damage"] },
    VocabularyRule { term: "Sun Damage", keywords: &["sun damage", "uv damage", "sun exposure"] },
];

pub const SCALP_ISSUE_RULES: &[VocabularyRule] = &[
    VocabularyRule { term: "Dandruff", keywords: &["dandruff", "flakes", "flaking", "flaky"] },
    VocabularyRule { term: "Dryness", keywords: &["dry scalp", "scalp dryness", "scalp is dry"] },
    VocabularyRule { term: "Excess Oil", keywords: &["oily scalp", "greasy scalp", "excess oil", "sebum"] },
    VocabularyRule { term: "Irritation", keywords: &["irritated", "irritation", "irritating", "redness", "itchy", "itching", "inflamed", "inflammation"] },
    VocabularyRule { term: "Thinning", keywords: &["thinning", "hair loss", "receding"] },
    VocabularyRule { term: "Buildup", keywords: &["buildup", "build-up", "residue"] },
];

/// Phrases that mean the provider could not see hair
///
/// Each must read as a complete verdict: "does not show hair" is left out
/// because it continues into "does not show hair loss".
const REJECTION_PHRASES: &[&str] = &[
    "not human hair",
    "no hair visible",
    "no hair is visible",
    "does not show any hair",
    "doesn't show any hair",
    "does not contain any hair",
    "doesn't contain any hair",
    "too blurry",
    "image is unclear",
    "not a hair image",
    "not a photo of hair",
];

const HAIR_KEYWORDS: &[&str] = &["hair", "strand", "scalp", "curl", "follicle"];

const NEGATIONS: &[&str] = &["no ", "not ", "n't ", "without ", "non-"];

static SCORE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b(\d{1,3})\s*/\s*100\b",
        r"score\s*(?:of|is|:|=)?\s*(\d{1,3})\b",
        r"\brated\s*(?:at\s*)?(\d{1,3})\b",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Reconstruct a result from free-form text.
pub fn extract(text: &str, model_name: &str) -> AnalysisResult {
    let lowered = text.to_lowercase();

    if let Some(phrase) = REJECTION_PHRASES.iter().find(|p| mentions(&lowered, p)) {
        debug!(phrase = *phrase, "Heuristic extractor detected a rejection");
        return AnalysisResult::Rejected(RejectedAnalysis::new(
            "Unclear or non-hair image",
            format!(
                "The provider reported the image could not be analyzed ({}). Please upload a clear photo of your hair.",
                phrase
            ),
            model_name,
        ));
    }

    let details = extract_details(&lowered);
    let score = extract_score(&lowered);
    let condition = Condition::from_score(score);

    let keyword_condition = condition_keyword(&lowered);
    if keyword_condition != condition {
        debug!(
            %score,
            band = %condition,
            keyword = %keyword_condition,
            "Condition keyword disagrees with score band; using band"
        );
    }

    let recommendations = recommendations::for_details(&details);

    AnalysisResult::Succeeded(
        HairAnalysis::new(score, details, model_name)
            .with_condition(condition)
            .with_insights(extract_insights(text))
            .with_recommendations(recommendations)
            .with_analysis(summary(text)),
    )
}

/// Evaluate the attribute rule table and vocabulary lists.
pub fn extract_details(lowered: &str) -> HairDetails {
    let mut details = HairDetails::default();

    for attribute in HairAttribute::all() {
        let value = labeled_value(lowered, attribute).or_else(|| {
            ATTRIBUTE_RULES
                .iter()
                .filter(|r| r.attribute == attribute)
                .find(|r| mentions_any(lowered, r.keywords))
                .map(|r| r.value)
        });
        if let Some(value) = value {
            details.set(attribute, value);
        }
    }

    details.damage_types = normalize_list(matching_terms(lowered, DAMAGE_TYPE_RULES));
    details.scalp_issues = normalize_list(matching_terms(lowered, SCALP_ISSUE_RULES));
    details
}

/// Value stated in `label: value` or `label is value` form, e.g. "density: low".
fn labeled_value(lowered: &str, attribute: HairAttribute) -> Option<&'static str> {
    let label = attribute.label().to_lowercase();
    attribute.allowed_values().iter().copied().find(|value| {
        let value = value.to_lowercase();
        [": ", " is ", " - ", " = "]
            .iter()
            .any(|sep| mentions(lowered, &format!("{label}{sep}{value}")))
    })
}

/// Explicit score if the text states one, otherwise the weighted rule score.
pub fn extract_score(lowered: &str) -> HealthScore {
    explicit_score(lowered).unwrap_or_else(|| weighted_score(lowered))
}

/// Look for `NN/100`, `score: NN` and similar phrasings.
pub fn explicit_score(lowered: &str) -> Option<HealthScore> {
    SCORE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures_iter(lowered)
            .filter_map(|c| c.get(1)?.as_str().parse::<i64>().ok())
            .find(|n| (0..=100).contains(n))
            .map(HealthScore::new)
    })
}

/// Baseline plus the delta of every matching qualitative phrase, clamped.
pub fn weighted_score(lowered: &str) -> HealthScore {
    let delta: i64 = SCORE_RULES
        .iter()
        .filter(|rule| mentions_any(lowered, rule.keywords))
        .map(|rule| rule.delta)
        .sum();
    HealthScore::new(BASELINE_SCORE + delta)
}

/// First condition keyword present in the text, defaulting to Good.
pub fn condition_keyword(lowered: &str) -> Condition {
    Condition::all()
        .into_iter()
        .find(|c| mentions(lowered, &c.as_str().to_lowercase()))
        .unwrap_or(Condition::Good)
}

/// First two sentences per category that mention the category or hair.
pub fn extract_insights(text: &str) -> HairInsights {
    let all_sentences = sentences(text);
    let mut insights = HairInsights::default();

    for category in InsightCategory::all() {
        let selected: Vec<&str> = all_sentences
            .iter()
            .filter(|s| {
                let lowered = s.to_lowercase();
                category.keywords().iter().any(|k| lowered.contains(k))
                    || HAIR_KEYWORDS.iter().any(|k| lowered.contains(k))
            })
            .take(2)
            .copied()
            .collect();
        if !selected.is_empty() {
            insights.set(category, format!("{}.", selected.join(". ")));
        }
    }

    insights
}

fn summary(text: &str) -> String {
    let first: Vec<&str> = sentences(text).into_iter().take(3).collect();
    if first.is_empty() {
        return String::new();
    }
    truncate(&format!("{}.", first.join(". ")), MAX_SUMMARY_LEN)
}

fn matching_terms(lowered: &str, rules: &[VocabularyRule]) -> Vec<&'static str> {
    rules
        .iter()
        .filter(|rule| mentions_any(lowered, rule.keywords))
        .map(|rule| rule.term)
        .collect()
}

fn mentions_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| mentions(lowered, k))
}

/// Whether `keyword` appears as whole words somewhere in the text without a
/// negation directly in front of it.
fn mentions(lowered: &str, keyword: &str) -> bool {
    lowered.match_indices(keyword).any(|(index, _)| {
        let before = &lowered[..index];
        let after = &lowered[index + keyword.len()..];
        let word_start = before
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let word_end = after.chars().next().is_none_or(|c| !c.is_alphanumeric());
        word_start && word_end && !NEGATIONS.iter().any(|n| before.ends_with(n))
    })
}
