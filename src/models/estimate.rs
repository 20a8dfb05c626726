//! Estimation inputs: expert judgements and historical ground truth.

use serde::{Deserialize, Serialize};

/// A three-point estimate from one expert.
///
/// Expected to satisfy `optimistic ≤ most_likely ≤ pessimistic` and
/// `confidence ∈ [0, 1]`; see [`crate::validation::validate_estimates`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertEstimate {
    /// Expert identifier.
    pub expert_id: String,
    /// Best-case value.
    pub optimistic: f64,
    /// Most probable value.
    pub most_likely: f64,
    /// Worst-case value.
    pub pessimistic: f64,
    /// Self-assessed confidence (weight in the final estimate).
    pub confidence: f64,
}

impl ExpertEstimate {
    /// Creates an estimate with full confidence.
    pub fn new(
        expert_id: impl Into<String>,
        optimistic: f64,
        most_likely: f64,
        pessimistic: f64,
    ) -> Self {
        Self {
            expert_id: expert_id.into(),
            optimistic,
            most_likely,
            pessimistic,
            confidence: 1.0,
        }
    }

    /// Sets the confidence weight.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// PERT three-point estimate: `(o + 4m + p) / 6`.
    #[inline]
    pub fn pert(&self) -> f64 {
        (self.optimistic + 4.0 * self.most_likely + self.pessimistic) / 6.0
    }
}

/// A completed project used as ground truth for similarity lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalProject {
    /// Delivered size.
    pub lines_of_code: f64,
    /// Team headcount (> 0).
    pub team_size: f64,
    /// Complexity rating in [1, 5].
    pub complexity: f64,
    /// Realized cost (> 0).
    pub actual_cost: f64,
    /// Realized duration (> 0).
    pub actual_duration: f64,
}

impl HistoricalProject {
    /// Creates a historical record.
    pub fn new(
        lines_of_code: f64,
        team_size: f64,
        complexity: f64,
        actual_cost: f64,
        actual_duration: f64,
    ) -> Self {
        Self {
            lines_of_code,
            team_size,
            complexity,
            actual_cost,
            actual_duration,
        }
    }
}

/// Size profile of a project to be estimated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProfile {
    /// Expected size.
    pub lines_of_code: f64,
    /// Planned headcount.
    pub team_size: f64,
    /// Complexity rating in [1, 5].
    pub complexity: f64,
}

impl ProjectProfile {
    /// Creates a profile.
    pub fn new(lines_of_code: f64, team_size: f64, complexity: f64) -> Self {
        Self {
            lines_of_code,
            team_size,
            complexity,
        }
    }
}
