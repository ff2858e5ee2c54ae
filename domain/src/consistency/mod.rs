//! Cross-attempt consistency decision rule.
//!
//! A [`ConsistencyWindow`] collects the successful reports one provider
//! produced for the same request. [`ConsistencyWindow::decide`] turns it into
//! a single report:
//!
//! - one report: accepted as-is
//! - spread above the threshold: the first report, unchanged
//! - otherwise: the first report with the rounded mean score

use crate::analysis::{HairAnalysis, HealthScore};
use serde::{Deserialize, Serialize};

/// Attempt budget and variance tolerance per provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyPolicy {
    /// Attempts per provider, at least 1
    pub max_attempts: u32,
    /// Largest accepted `max - min` score spread
    pub variance_threshold: u8,
}

impl Default for ConsistencyPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            variance_threshold: 10,
        }
    }
}

/// How a window was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyDecision {
    Single(HairAnalysis),
    Averaged {
        result: HairAnalysis,
        scores: Vec<HealthScore>,
    },
    HighVariance {
        result: HairAnalysis,
        spread: u8,
    },
}

impl ConsistencyDecision {
    pub fn kind(&self) -> &'static str {
        match self {
            ConsistencyDecision::Single(_) => "single",
            ConsistencyDecision::Averaged { .. } => "averaged",
            ConsistencyDecision::HighVariance { .. } => "high_variance",
        }
    }

    pub fn result(&self) -> &HairAnalysis {
        match self {
            ConsistencyDecision::Single(result)
            | ConsistencyDecision::Averaged { result, .. }
            | ConsistencyDecision::HighVariance { result, .. } => result,
        }
    }

    pub fn into_result(self) -> HairAnalysis {
        match self {
            ConsistencyDecision::Single(result)
            | ConsistencyDecision::Averaged { result, .. }
            | ConsistencyDecision::HighVariance { result, .. } => result,
        }
    }
}

/// Successful reports from one provider within one cascade step
#[derive(Debug, Clone)]
pub struct ConsistencyWindow {
    provider: String,
    results: Vec<HairAnalysis>,
}

impl ConsistencyWindow {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            results: Vec::new(),
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn push(&mut self, result: HairAnalysis) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn scores(&self) -> Vec<HealthScore> {
        self.results.iter().map(|r| r.health_score).collect()
    }

    /// `max - min` over the collected scores
    pub fn spread(&self) -> u8 {
        let scores = self.scores();
        match (scores.iter().max(), scores.iter().min()) {
            (Some(max), Some(min)) => max.distance(min),
            _ => 0,
        }
    }

    /// Resolve the window. `None` when nothing was collected.
    pub fn decide(self, policy: &ConsistencyPolicy) -> Option<ConsistencyDecision> {
        let scores = self.scores();
        let spread = self.spread();
        let mut results = self.results.into_iter();
        let first = results.next()?;

        if scores.len() == 1 {
            return Some(ConsistencyDecision::Single(first));
        }

        if spread > policy.variance_threshold {
            return Some(ConsistencyDecision::HighVariance {
                result: first,
                spread,
            });
        }

        let mean = HealthScore::mean(&scores).unwrap_or(first.health_score);
        Some(ConsistencyDecision::Averaged {
            result: first.with_health_score(mean),
            scores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Condition, HairDetails};

    fn report(score: i64) -> HairAnalysis {
        HairAnalysis::new(HealthScore::new(score), HairDetails::default(), "vision-a")
    }

    fn window(scores: &[i64]) -> ConsistencyWindow {
        let mut window = ConsistencyWindow::new("vision-a");
        for score in scores {
            window.push(report(*score));
        }
        window
    }

    #[test]
    fn test_default_policy() {
        let policy = ConsistencyPolicy::default();
        assert_eq!(policy.max_attempts, 2);
        assert_eq!(policy.variance_threshold, 10);
    }

    #[test]
    fn test_empty_window_has_no_decision() {
        assert!(window(&[]).decide(&ConsistencyPolicy::default()).is_none());
    }

    #[test]
    fn test_single_result_accepted_as_is() {
        let decision = window(&[63]).decide(&ConsistencyPolicy::default()).unwrap();
        assert_eq!(decision.kind(), "single");
        assert_eq!(decision.result().health_score.value(), 63);
    }

    #[test]
    fn test_close_scores_are_averaged() {
        let decision = window(&[70, 74]).decide(&ConsistencyPolicy::default()).unwrap();
        match &decision {
            ConsistencyDecision::Averaged { result, scores } => {
                assert_eq!(result.health_score.value(), 72);
                assert_eq!(scores.len(), 2);
            }
            other => panic!("expected averaged, got {other:?}"),
        }
    }

    #[test]
    fn test_averaging_keeps_first_condition() {
        let mut window = ConsistencyWindow::new("vision-a");
        window.push(report(78));
        window.push(report(83));
        let result = window
            .decide(&ConsistencyPolicy::default())
            .unwrap()
            .into_result();
        // 80.5 rounds to 81 but the condition stays with the first attempt
        assert_eq!(result.health_score.value(), 81);
        assert_eq!(result.condition, Condition::Good);
    }

    #[test]
    fn test_high_variance_keeps_first_result() {
        let decision = window(&[50, 90]).decide(&ConsistencyPolicy::default()).unwrap();
        match decision {
            ConsistencyDecision::HighVariance { result, spread } => {
                assert_eq!(result.health_score.value(), 50);
                assert_eq!(spread, 40);
            }
            other => panic!("expected high variance, got {other:?}"),
        }
    }

    #[test]
    fn test_spread_at_threshold_is_averaged() {
        let decision = window(&[60, 70]).decide(&ConsistencyPolicy::default()).unwrap();
        assert_eq!(decision.kind(), "averaged");
        assert_eq!(decision.result().health_score.value(), 65);
    }
}
