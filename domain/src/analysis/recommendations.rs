//! Recommendation table keyed by detected attributes.
//!
//! Used when recommendations have to be reconstructed locally: by the
//! heuristic extractor and by the offline synthesizer.

use super::attributes::{HairAttribute, HairDetails};
use super::insights::Recommendations;

/// Which recommendation list a rule contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Products,
    Treatments,
    Routine,
    Styling,
    Lifestyle,
    Avoid,
}

struct RecommendationRule {
    attribute: HairAttribute,
    values: &'static [&'static str],
    section: Section,
    text: &'static str,
}

const RULES: &[RecommendationRule] = &[
    RecommendationRule {
        attribute: HairAttribute::Damage,
        values: &["Moderate", "Severe"],
        section: Section::Treatments,
        text: "Weekly protein-balancing deep conditioning treatment",
    },
    RecommendationRule {
        attribute: HairAttribute::Damage,
        values: &["Mild", "Moderate", "Severe"],
        section: Section::Routine,
        text: "Trim every 8-10 weeks to remove split ends",
    },
    RecommendationRule {
        attribute: HairAttribute::Damage,
        values: &["Moderate", "Severe"],
        section: Section::Avoid,
        text: "Heat styling above 180°C and back-to-back chemical treatments",
    },
    RecommendationRule {
        attribute: HairAttribute::Moisture,
        values: &["Dry"],
        section: Section::Products,
        text: "Sulfate-free moisturizing shampoo and a rich leave-in conditioner",
    },
    RecommendationRule {
        attribute: HairAttribute::Moisture,
        values: &["Oily"],
        section: Section::Products,
        text: "Lightweight clarifying shampoo used once a week",
    },
    RecommendationRule {
        attribute: HairAttribute::Porosity,
        values: &["High"],
        section: Section::Treatments,
        text: "Seal moisture with a light oil after conditioning",
    },
    RecommendationRule {
        attribute: HairAttribute::Porosity,
        values: &["Low"],
        section: Section::Routine,
        text: "Apply conditioner with gentle heat so it can penetrate",
    },
    RecommendationRule {
        attribute: HairAttribute::Frizz,
        values: &["Moderate", "High"],
        section: Section::Styling,
        text: "Anti-frizz serum applied to damp hair, and air-dry when possible",
    },
    RecommendationRule {
        attribute: HairAttribute::Shine,
        values: &["Dull"],
        section: Section::Treatments,
        text: "Cool-water rinse and a gloss treatment to smooth the cuticle",
    },
    RecommendationRule {
        attribute: HairAttribute::CurlPattern,
        values: &["Curly", "Coily"],
        section: Section::Styling,
        text: "Define curls with a cream or gel and detangle only when wet",
    },
    RecommendationRule {
        attribute: HairAttribute::Thickness,
        values: &["Thin"],
        section: Section::Styling,
        text: "Volumizing products that do not weigh strands down",
    },
    RecommendationRule {
        attribute: HairAttribute::ScalpCondition,
        values: &["Dry", "Irritated"],
        section: Section::Products,
        text: "Soothing scalp serum with niacinamide or aloe",
    },
    RecommendationRule {
        attribute: HairAttribute::ScalpCondition,
        values: &["Oily"],
        section: Section::Routine,
        text: "Wash every other day and avoid applying conditioner to the scalp",
    },
    RecommendationRule {
        attribute: HairAttribute::Damage,
        values: &["Severe"],
        section: Section::Lifestyle,
        text: "Sleep on a silk or satin pillowcase to reduce friction",
    },
    RecommendationRule {
        attribute: HairAttribute::ScalpCondition,
        values: &["Irritated"],
        section: Section::Avoid,
        text: "Fragranced scalp products and very hot water",
    },
];

/// Build recommendations for a set of details.
///
/// Always returns at least one entry per list so downstream renderers never
/// show an empty section.
pub fn for_details(details: &HairDetails) -> Recommendations {
    let mut recommendations = Recommendations::default();

    for rule in RULES {
        if rule.values.contains(&details.get(rule.attribute)) {
            push(&mut recommendations, rule.section, rule.text);
        }
    }

    if details.has_scalp_issues() {
        push(
            &mut recommendations,
            Section::Treatments,
            "Consult a dermatologist if scalp symptoms persist",
        );
    }

    push_fallback(&mut recommendations.products, "Gentle, sulfate-free shampoo suited to your hair type");
    push_fallback(&mut recommendations.treatments, "Monthly deep conditioning mask");
    push_fallback(&mut recommendations.routine, "Wash 2-3 times a week and condition every wash");
    push_fallback(&mut recommendations.styling, "Use a heat protectant before any heat styling");
    push(
        &mut recommendations,
        Section::Lifestyle,
        "Balanced diet with enough protein, iron and water",
    );
    push_fallback(&mut recommendations.avoid, "Tight hairstyles that pull at the roots");

    recommendations
}

fn push(recommendations: &mut Recommendations, section: Section, text: &str) {
    let list = match section {
        Section::Products => &mut recommendations.products,
        Section::Treatments => &mut recommendations.treatments,
        Section::Routine => &mut recommendations.routine,
        Section::Styling => &mut recommendations.styling,
        Section::Lifestyle => &mut recommendations.lifestyle,
        Section::Avoid => &mut recommendations.avoid,
    };
    list.push(text.to_string());
}

fn push_fallback(list: &mut Vec<String>, text: &str) {
    if list.is_empty() {
        list.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_details_fill_every_section() {
        let recommendations = for_details(&HairDetails::default());
        for (label, items) in recommendations.sections() {
            assert!(!items.is_empty(), "{} is empty", label);
        }
    }

    #[test]
    fn test_damaged_dry_hair() {
        let mut details = HairDetails::default();
        details.set(HairAttribute::Damage, "Severe");
        details.set(HairAttribute::Moisture, "Dry");

        let recommendations = for_details(&details);
        assert!(recommendations.treatments[0].contains("deep conditioning"));
        assert!(recommendations.products[0].contains("moisturizing"));
        assert!(recommendations.avoid[0].contains("Heat styling"));
    }
}
