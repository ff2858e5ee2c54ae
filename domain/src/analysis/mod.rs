//! Analysis schema: the structured result contract.
//!
//! - [`result::AnalysisResult`]: Rejected / Succeeded tagged union
//! - [`score::HealthScore`] / [`score::Condition`]: score and its band
//! - [`attributes::HairDetails`]: eleven categorical attributes plus lists
//! - [`insights`]: free-text insights and categorized recommendations

pub mod attributes;
pub mod insights;
pub mod recommendations;
pub mod result;
pub mod score;

pub use attributes::{DAMAGE_TYPES, HairAttribute, HairDetails, NONE_DETECTED, SCALP_ISSUES};
pub use insights::{HairInsights, InsightCategory, Recommendations};
pub use result::{AnalysisResult, HairAnalysis, OFFLINE_MODEL_NAME, RejectedAnalysis};
pub use score::{Condition, HealthScore};
