//! The analysis result contract consumed by the rest of the application.
//!
//! [`AnalysisResult`] is a tagged union serialized with an `isHairImage`
//! discriminator, so a rejection can never carry a score or details.

use super::attributes::HairDetails;
use super::insights::{HairInsights, Recommendations};
use super::score::{Condition, HealthScore};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// `modelName` of results produced without any provider
pub const OFFLINE_MODEL_NAME: &str = "offline-estimate";

/// The image was unusable: blurry, unclear, or not human hair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedAnalysis {
    /// What the provider saw instead of hair
    pub detected_content: String,
    /// Why the image could not be analyzed
    pub message: String,
    /// Provider/model that produced the verdict
    pub model_name: String,
}

impl RejectedAnalysis {
    pub fn new(
        detected_content: impl Into<String>,
        message: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            detected_content: detected_content.into(),
            message: message.into(),
            model_name: model_name.into(),
        }
    }
}

/// A full hair health report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HairAnalysis {
    pub health_score: HealthScore,
    pub condition: Condition,
    pub details: HairDetails,
    #[serde(default)]
    pub insights: HairInsights,
    #[serde(default)]
    pub recommendations: Recommendations,
    /// Free-text summary
    #[serde(default)]
    pub analysis: String,
    pub model_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Set on results synthesized without any provider
    #[serde(default)]
    pub is_offline: bool,
}

impl HairAnalysis {
    /// Create a report whose condition follows the score band.
    pub fn new(health_score: HealthScore, details: HairDetails, model_name: impl Into<String>) -> Self {
        Self {
            health_score,
            condition: Condition::from_score(health_score),
            details,
            insights: HairInsights::default(),
            recommendations: Recommendations::default(),
            analysis: String::new(),
            model_name: model_name.into(),
            message: None,
            is_offline: false,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    pub fn with_insights(mut self, insights: HairInsights) -> Self {
        self.insights = insights;
        self
    }

    pub fn with_recommendations(mut self, recommendations: Recommendations) -> Self {
        self.recommendations = recommendations;
        self
    }

    pub fn with_analysis(mut self, analysis: impl Into<String>) -> Self {
        self.analysis = analysis.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Replace only the score, keeping every other field of the report
    pub fn with_health_score(mut self, health_score: HealthScore) -> Self {
        self.health_score = health_score;
        self
    }

    pub fn offline(mut self) -> Self {
        self.is_offline = true;
        self
    }
}

/// Outcome of analyzing one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisResult {
    Rejected(RejectedAnalysis),
    Succeeded(HairAnalysis),
}

impl AnalysisResult {
    pub fn is_hair_image(&self) -> bool {
        matches!(self, AnalysisResult::Succeeded(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, AnalysisResult::Rejected(_))
    }

    /// Provenance: provider/model id, or [`OFFLINE_MODEL_NAME`]
    pub fn model_name(&self) -> &str {
        match self {
            AnalysisResult::Rejected(r) => &r.model_name,
            AnalysisResult::Succeeded(a) => &a.model_name,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            AnalysisResult::Rejected(r) => Some(&r.message),
            AnalysisResult::Succeeded(a) => a.message.as_deref(),
        }
    }

    pub fn health_score(&self) -> Option<HealthScore> {
        self.as_succeeded().map(|a| a.health_score)
    }

    pub fn condition(&self) -> Option<Condition> {
        self.as_succeeded().map(|a| a.condition)
    }

    /// Whether this result was synthesized locally instead of by a provider.
    pub fn is_synthesized(&self) -> bool {
        match self {
            AnalysisResult::Rejected(r) => r.model_name == OFFLINE_MODEL_NAME,
            AnalysisResult::Succeeded(a) => a.is_offline || a.model_name == OFFLINE_MODEL_NAME,
        }
    }

    pub fn as_succeeded(&self) -> Option<&HairAnalysis> {
        match self {
            AnalysisResult::Succeeded(a) => Some(a),
            AnalysisResult::Rejected(_) => None,
        }
    }

    pub fn into_succeeded(self) -> Option<HairAnalysis> {
        match self {
            AnalysisResult::Succeeded(a) => Some(a),
            AnalysisResult::Rejected(_) => None,
        }
    }
}

impl From<HairAnalysis> for AnalysisResult {
    fn from(analysis: HairAnalysis) -> Self {
        AnalysisResult::Succeeded(analysis)
    }
}

impl From<RejectedAnalysis> for AnalysisResult {
    fn from(rejected: RejectedAnalysis) -> Self {
        AnalysisResult::Rejected(rejected)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Tagged<'a, T: Serialize> {
    is_hair_image: bool,
    #[serde(flatten)]
    inner: &'a T,
}

impl Serialize for AnalysisResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            AnalysisResult::Rejected(inner) => Tagged {
                is_hair_image: false,
                inner,
            }
            .serialize(serializer),
            AnalysisResult::Succeeded(inner) => Tagged {
                is_hair_image: true,
                inner,
            }
            .serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for AnalysisResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let is_hair_image = value
            .get("isHairImage")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(true);

        if is_hair_image {
            serde_json::from_value(value)
                .map(AnalysisResult::Succeeded)
                .map_err(D::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(AnalysisResult::Rejected)
                .map_err(D::Error::custom)
        }
    }
}
