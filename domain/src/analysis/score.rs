//! Health score and condition bands

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Hair health score, always within `1..=100` (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HealthScore(u8);

impl HealthScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    /// Create a score, clamping out-of-range values into `1..=100`.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Create a score from a float, rounding before clamping.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self::new(value.round() as i64)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Absolute difference between two scores
    pub fn distance(&self, other: &HealthScore) -> u8 {
        self.0.abs_diff(other.0)
    }

    /// Rounded arithmetic mean of a set of scores.
    ///
    /// Returns `None` for an empty slice.
    pub fn mean(scores: &[HealthScore]) -> Option<HealthScore> {
        if scores.is_empty() {
            return None;
        }
        let sum: u32 = scores.iter().map(|s| s.0 as u32).sum();
        Some(Self::from_f64(sum as f64 / scores.len() as f64))
    }
}

impl std::fmt::Display for HealthScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for HealthScore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for HealthScore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Ok(HealthScore::new(value))
    }
}

/// Overall hair condition derived from the health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Condition {
    /// Score band rule: ≥80 Excellent, ≥60 Good, ≥40 Fair, else Poor.
    pub fn from_score(score: HealthScore) -> Self {
        match score.value() {
            80.. => Condition::Excellent,
            60..=79 => Condition::Good,
            40..=59 => Condition::Fair,
            _ => Condition::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Excellent => "Excellent",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
            Condition::Poor => "Poor",
        }
    }

    pub fn all() -> [Condition; 4] {
        [
            Condition::Excellent,
            Condition::Good,
            Condition::Fair,
            Condition::Poor,
        ]
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "excellent" => Ok(Condition::Excellent),
            "good" => Ok(Condition::Good),
            "fair" => Ok(Condition::Fair),
            "poor" => Ok(Condition::Poor),
            other => Err(format!("Unknown condition: {}", other)),
        }
    }
}
