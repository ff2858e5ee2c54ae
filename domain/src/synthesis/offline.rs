//! Deterministic offline substitute for a provider analysis.
//!
//! Every field is drawn from a PRNG seeded by the image digest, so the same
//! photo always yields the same estimate.

use crate::analysis::{
    AnalysisResult, DAMAGE_TYPES, HairAnalysis, HairAttribute, HairDetails, HairInsights,
    HealthScore, InsightCategory, OFFLINE_MODEL_NAME, SCALP_ISSUES,
    attributes::normalize_list, recommendations,
};
use crate::core::request::ImageInput;
use crate::core::string::truncate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// File-name fragments that suggest the photo shows hair
const HAIR_NAME_HINTS: &[&str] = &[
    "hair", "curl", "scalp", "braid", "strand", "selfie", "head", "ponytail",
];

const MIN_SCORE: u64 = 40;
const MAX_SCORE: u64 = 85;
const KIB_PER_POINT: u64 = 25;
const MAX_REASON_LEN: usize = 160;

/// Stable identity of an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFingerprint {
    pub file_name: String,
    pub size_bytes: u64,
    /// SHA-256 over the image bytes
    pub digest: [u8; 32],
}

impl ImageFingerprint {
    pub fn of(image: &ImageInput) -> Self {
        Self::from_parts(image.file_name(), image.bytes())
    }

    pub fn from_parts(file_name: &str, bytes: &[u8]) -> Self {
        Self {
            file_name: file_name.to_string(),
            size_bytes: bytes.len() as u64,
            digest: Sha256::digest(bytes).into(),
        }
    }

    pub fn seed(&self) -> u64 {
        let mut head = [0u8; 8];
        head.copy_from_slice(&self.digest[..8]);
        u64::from_le_bytes(head) ^ self.size_bytes
    }

    pub fn digest_hex(&self) -> String {
        self.digest.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Whether the file name hints at a hair photo
    pub fn looks_like_hair(&self) -> bool {
        let name = self.file_name.to_lowercase();
        HAIR_NAME_HINTS.iter().any(|hint| name.contains(hint))
    }
}

/// Builds plausible, clearly labelled estimates without any provider
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSynthesizer;

impl OfflineSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Synthesize a result for `fingerprint`. `reason` is the last provider
    /// error, folded into the message.
    pub fn synthesize(&self, fingerprint: &ImageFingerprint, reason: Option<&str>) -> AnalysisResult {
        let mut rng = StdRng::seed_from_u64(fingerprint.seed());

        let mut details = HairDetails::default();
        for attribute in HairAttribute::all() {
            if let Some(value) = attribute.allowed_values().choose(&mut rng) {
                details.set(attribute, value);
            }
        }
        details.damage_types = pick_terms(&mut rng, DAMAGE_TYPES);
        details.scalp_issues = pick_terms(&mut rng, SCALP_ISSUES);

        let score = estimated_score(fingerprint.size_bytes);
        let insights = insights_for(&details);
        let recommendations = recommendations::for_details(&details);
        let summary = format!(
            "Offline estimate: {} {} hair with {} moisture and {} damage.",
            details.texture.to_lowercase(),
            details.curl_pattern.to_lowercase(),
            details.moisture.to_lowercase(),
            details.damage.to_lowercase(),
        );

        HairAnalysis::new(score, details, OFFLINE_MODEL_NAME)
            .with_insights(insights)
            .with_recommendations(recommendations)
            .with_analysis(summary)
            .with_message(message_for(fingerprint, reason))
            .offline()
            .into()
    }
}

fn estimated_score(size_bytes: u64) -> HealthScore {
    let kib = size_bytes / 1024;
    let score = (MIN_SCORE + kib / KIB_PER_POINT).clamp(MIN_SCORE, MAX_SCORE);
    HealthScore::new(score as i64)
}

fn pick_terms(rng: &mut StdRng, vocabulary: &[&str]) -> Vec<String> {
    let count = rng.gen_range(0..=2);
    normalize_list(vocabulary.choose_multiple(rng, count).copied())
}

fn insights_for(details: &HairDetails) -> HairInsights {
    let mut insights = HairInsights::default();
    for category in InsightCategory::all() {
        let text = match category {
            InsightCategory::Texture => format!("Texture estimated as {}.", details.texture),
            InsightCategory::Thickness => format!("Strand thickness estimated as {}.", details.thickness),
            InsightCategory::Porosity => format!("Porosity estimated as {}.", details.porosity),
            InsightCategory::Moisture => format!("Moisture balance estimated as {}.", details.moisture),
            InsightCategory::Shine => format!("Shine estimated as {}.", details.shine),
            InsightCategory::Damage => format!(
                "Damage estimated as {} ({}).",
                details.damage,
                details.damage_types.join(", ")
            ),
            InsightCategory::Scalp => format!(
                "Scalp condition estimated as {} ({}).",
                details.scalp_condition,
                details.scalp_issues.join(", ")
            ),
        };
        insights.set(category, text);
    }
    insights
}

fn message_for(fingerprint: &ImageFingerprint, reason: Option<&str>) -> String {
    let mut message = String::from(
        "AI analysis was unavailable, so this is an offline estimate based on image metadata.",
    );
    if let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) {
        message.push_str(&format!(
            " Last provider error: {}.",
            truncate(reason, MAX_REASON_LEN)
        ));
    }
    if !fingerprint.looks_like_hair() {
        message.push_str(" The photo could not be confirmed as a hair image; treat this estimate with caution.");
    }
    message.push_str(" Try again later for a full analysis.");
    message
}
