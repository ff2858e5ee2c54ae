//! Categorical hair attributes and their fixed vocabularies.
//!
//! Provider output is free-form, so every categorical value that enters a
//! [`HairDetails`] goes through [`HairAttribute::normalize`]. The same
//! vocabulary tables feed the analysis prompt, the heuristic extractor and the
//! offline synthesizer.

use serde::{Deserialize, Serialize};

/// Sentinel used when no damage type or scalp issue applies
pub const NONE_DETECTED: &str = "None Detected";

/// Vocabulary for the `damageTypes` list
pub const DAMAGE_TYPES: &[&str] = &[
    "Split Ends",
    "Breakage",
    "Heat Damage",
    "Chemical Damage",
    "Color Damage",
    "Sun Damage",
];

/// Vocabulary for the `scalpIssues` list
pub const SCALP_ISSUES: &[&str] = &[
    "Dandruff",
    "Dryness",
    "Excess Oil",
    "Irritation",
    "Thinning",
    "Buildup",
];

/// The eleven categorical attributes of a hair analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HairAttribute {
    Texture,
    Thickness,
    Density,
    Porosity,
    Elasticity,
    CurlPattern,
    Moisture,
    Shine,
    Frizz,
    Damage,
    ScalpCondition,
}

impl HairAttribute {
    pub fn all() -> [HairAttribute; 11] {
        [
            HairAttribute::Texture,
            HairAttribute::Thickness,
            HairAttribute::Density,
            HairAttribute::Porosity,
            HairAttribute::Elasticity,
            HairAttribute::CurlPattern,
            HairAttribute::Moisture,
            HairAttribute::Shine,
            HairAttribute::Frizz,
            HairAttribute::Damage,
            HairAttribute::ScalpCondition,
        ]
    }

    /// JSON field name inside `details`
    pub fn field_name(&self) -> &'static str {
        match self {
            HairAttribute::Texture => "texture",
            HairAttribute::Thickness => "thickness",
            HairAttribute::Density => "density",
            HairAttribute::Porosity => "porosity",
            HairAttribute::Elasticity => "elasticity",
            HairAttribute::CurlPattern => "curlPattern",
            HairAttribute::Moisture => "moisture",
            HairAttribute::Shine => "shine",
            HairAttribute::Frizz => "frizz",
            HairAttribute::Damage => "damage",
            HairAttribute::ScalpCondition => "scalpCondition",
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            HairAttribute::Texture => "Texture",
            HairAttribute::Thickness => "Thickness",
            HairAttribute::Density => "Density",
            HairAttribute::Porosity => "Porosity",
            HairAttribute::Elasticity => "Elasticity",
            HairAttribute::CurlPattern => "Curl pattern",
            HairAttribute::Moisture => "Moisture",
            HairAttribute::Shine => "Shine",
            HairAttribute::Frizz => "Frizz",
            HairAttribute::Damage => "Damage",
            HairAttribute::ScalpCondition => "Scalp condition",
        }
    }

    pub fn allowed_values(&self) -> &'static [&'static str] {
        match self {
            HairAttribute::Texture => &["Fine", "Medium", "Coarse"],
            HairAttribute::Thickness => &["Thin", "Medium", "Thick"],
            HairAttribute::Density => &["Low", "Medium", "High"],
            HairAttribute::Porosity => &["Low", "Normal", "High"],
            HairAttribute::Elasticity => &["Low", "Normal", "High"],
            HairAttribute::CurlPattern => &["Straight", "Wavy", "Curly", "Coily"],
            HairAttribute::Moisture => &["Dry", "Balanced", "Oily"],
            HairAttribute::Shine => &["Dull", "Moderate", "Shiny"],
            HairAttribute::Frizz => &["None", "Low", "Moderate", "High"],
            HairAttribute::Damage => &["None", "Mild", "Moderate", "Severe"],
            HairAttribute::ScalpCondition => &["Healthy", "Dry", "Oily", "Irritated"],
        }
    }

    /// Value used when nothing usable was reported
    pub fn default_value(&self) -> &'static str {
        match self {
            HairAttribute::Texture => "Medium",
            HairAttribute::Thickness => "Medium",
            HairAttribute::Density => "Medium",
            HairAttribute::Porosity => "Normal",
            HairAttribute::Elasticity => "Normal",
            HairAttribute::CurlPattern => "Straight",
            HairAttribute::Moisture => "Balanced",
            HairAttribute::Shine => "Moderate",
            HairAttribute::Frizz => "Low",
            HairAttribute::Damage => "None",
            HairAttribute::ScalpCondition => "Healthy",
        }
    }

    /// Map a raw provider value onto the vocabulary.
    ///
    /// Matching is case-insensitive and tolerates decorations such as
    /// `"moderate damage"` or `"Wavy (2B)"`; anything unrecognized falls back to
    /// the attribute default.
    pub fn normalize(&self, raw: &str) -> &'static str {
        let lowered = raw.trim().to_lowercase();
        let allowed = self.allowed_values();

        if let Some(exact) = allowed.iter().find(|v| v.to_lowercase() == lowered) {
            return exact;
        }

        allowed
            .iter()
            .find(|v| {
                lowered
                    .split(|c: char| !c.is_alphanumeric())
                    .any(|word| word == v.to_lowercase())
            })
            .copied()
            .unwrap_or_else(|| self.default_value())
    }
}

impl std::fmt::Display for HairAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

/// Per-attribute details of a successful analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HairDetails {
    pub texture: String,
    pub thickness: String,
    pub density: String,
    pub porosity: String,
    pub elasticity: String,
    pub curl_pattern: String,
    pub moisture: String,
    pub shine: String,
    pub frizz: String,
    pub damage: String,
    pub scalp_condition: String,
    pub damage_types: Vec<String>,
    pub scalp_issues: Vec<String>,
}

impl HairDetails {
    /// Read the value of a categorical attribute
    pub fn get(&self, attribute: HairAttribute) -> &str {
        match attribute {
            HairAttribute::Texture => &self.texture,
            HairAttribute::Thickness => &self.thickness,
            HairAttribute::Density => &self.density,
            HairAttribute::Porosity => &self.porosity,
            HairAttribute::Elasticity => &self.elasticity,
            HairAttribute::CurlPattern => &self.curl_pattern,
            HairAttribute::Moisture => &self.moisture,
            HairAttribute::Shine => &self.shine,
            HairAttribute::Frizz => &self.frizz,
            HairAttribute::Damage => &self.damage,
            HairAttribute::ScalpCondition => &self.scalp_condition,
        }
    }

    /// Set a categorical attribute, normalizing it against the vocabulary
    pub fn set(&mut self, attribute: HairAttribute, raw: &str) {
        let value = attribute.normalize(raw).to_string();
        match attribute {
            HairAttribute::Texture => self.texture = value,
            HairAttribute::Thickness => self.thickness = value,
            HairAttribute::Density => self.density = value,
            HairAttribute::Porosity => self.porosity = value,
            HairAttribute::Elasticity => self.elasticity = value,
            HairAttribute::CurlPattern => self.curl_pattern = value,
            HairAttribute::Moisture => self.moisture = value,
            HairAttribute::Shine => self.shine = value,
            HairAttribute::Frizz => self.frizz = value,
            HairAttribute::Damage => self.damage = value,
            HairAttribute::ScalpCondition => self.scalp_condition = value,
        }
    }

    /// Whether any damage type other than the sentinel was reported
    pub fn has_damage_types(&self) -> bool {
        has_entries(&self.damage_types)
    }

    /// Whether any scalp issue other than the sentinel was reported
    pub fn has_scalp_issues(&self) -> bool {
        has_entries(&self.scalp_issues)
    }
}

impl Default for HairDetails {
    fn default() -> Self {
        let mut details = Self {
            texture: String::new(),
            thickness: String::new(),
            density: String::new(),
            porosity: String::new(),
            elasticity: String::new(),
            curl_pattern: String::new(),
            moisture: String::new(),
            shine: String::new(),
            frizz: String::new(),
            damage: String::new(),
            scalp_condition: String::new(),
            damage_types: vec![NONE_DETECTED.to_string()],
            scalp_issues: vec![NONE_DETECTED.to_string()],
        };
        for attribute in HairAttribute::all() {
            details.set(attribute, attribute.default_value());
        }
        details
    }
}

/// Clean up a reported list: trim, drop blanks and duplicates, and fall back
/// to the [`NONE_DETECTED`] sentinel when nothing remains.
pub fn normalize_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cleaned: Vec<String> = Vec::new();
    for item in items {
        let item = item.as_ref().trim();
        if item.is_empty() || item.eq_ignore_ascii_case(NONE_DETECTED) || item.eq_ignore_ascii_case("none") {
            continue;
        }
        if !cleaned.iter().any(|c| c.eq_ignore_ascii_case(item)) {
            cleaned.push(item.to_string());
        }
    }
    if cleaned.is_empty() {
        cleaned.push(NONE_DETECTED.to_string());
    }
    cleaned
}

fn has_entries(list: &[String]) -> bool {
    list.iter().any(|item| item != NONE_DETECTED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_exact_and_case() {
        assert_eq!(HairAttribute::Texture.normalize("coarse"), "Coarse");
        assert_eq!(HairAttribute::CurlPattern.normalize(" WAVY "), "Wavy");
    }

    #[test]
    fn test_normalize_decorated_value() {
        assert_eq!(HairAttribute::Damage.normalize("moderate damage"), "Moderate");
        assert_eq!(HairAttribute::CurlPattern.normalize("Curly (3A)"), "Curly");
    }

    #[test]
    fn test_normalize_unknown_falls_back_to_default() {
        assert_eq!(HairAttribute::Porosity.normalize("kinda porous"), "Normal");
        assert_eq!(HairAttribute::Shine.normalize(""), "Moderate");
    }

    #[test]
    fn test_default_values_are_in_vocabulary() {
        for attribute in HairAttribute::all() {
            assert!(
                attribute.allowed_values().contains(&attribute.default_value()),
                "{} default not in vocabulary",
                attribute
            );
        }
    }

    #[test]
    fn test_details_default_and_set() {
        let mut details = HairDetails::default();
        assert_eq!(details.get(HairAttribute::Damage), "None");
        assert!(!details.has_damage_types());

        details.set(HairAttribute::Damage, "SEVERE");
        assert_eq!(details.damage, "Severe");
    }

    #[test]
    fn test_normalize_list() {
        assert_eq!(normalize_list(Vec::<String>::new()), vec![NONE_DETECTED]);
        assert_eq!(
            normalize_list(["Split Ends", " split ends ", "", "Breakage"]),
            vec!["Split Ends", "Breakage"]
        );
        assert_eq!(normalize_list(["none", "None Detected"]), vec![NONE_DETECTED]);
    }

    #[test]
    fn test_details_serialize_camel_case() {
        let json = serde_json::to_value(HairDetails::default()).unwrap();
        assert_eq!(json["curlPattern"], "Straight");
        assert_eq!(json["scalpCondition"], "Healthy");
        assert_eq!(json["damageTypes"][0], NONE_DETECTED);
    }
}
