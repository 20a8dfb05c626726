//! Similarity-based regression estimator.
//!
//! Finds the historical project closest to the new one and scales its
//! actuals by power-law size ratios.
//!
//! # Similarity
//! Per dimension: `1 − |a − b| / max(a, b, 1)` for lines of code and team
//! size, `1 − |a − b| / 5` for complexity. The score is the mean of the three.
//!
//! # Scaling
//! ```text
//! cost     = cost_h     · (LOC/LOC_h)^0.7 · (team/team_h)^0.3 · (cx/cx_h)^0.2
//! duration = duration_h · (LOC/LOC_h)^0.5 · (cx/cx_h)^0.3
//! ```

use serde::{Deserialize, Serialize};

use crate::finance::correlation;
use crate::models::{HistoricalProject, ProjectProfile};

const COST_LOC_ELASTICITY: f64 = 0.7;
const COST_TEAM_ELASTICITY: f64 = 0.3;
const COST_COMPLEXITY_ELASTICITY: f64 = 0.2;
const DURATION_LOC_ELASTICITY: f64 = 0.5;
const DURATION_COMPLEXITY_ELASTICITY: f64 = 0.3;

/// Complexity scale width (ratings run 1..=5).
const COMPLEXITY_RANGE: f64 = 5.0;

/// Regression estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionEstimate {
    /// Scaled cost of the best match.
    pub estimated_cost: f64,
    /// Scaled duration of the best match.
    pub estimated_duration: f64,
    /// Similarity score of the best match in [0, 1].
    pub confidence: f64,
    /// Max |Pearson r| of the size dimensions vs. historical cost.
    ///
    /// A coarse fit indicator, not a fitted coefficient of determination.
    pub r_squared: f64,
    /// Index of the best match in the history slice.
    pub matched_index: Option<usize>,
}

/// Similarity of one dimension for unbounded quantities.
#[inline]
fn ratio_similarity(a: f64, b: f64) -> f64 {
    1.0 - (a - b).abs() / a.max(b).max(1.0)
}

/// Similarity score between a profile and a historical project.
pub fn similarity(profile: &ProjectProfile, history: &HistoricalProject) -> f64 {
    let loc = ratio_similarity(profile.lines_of_code, history.lines_of_code);
    let team = ratio_similarity(profile.team_size, history.team_size);
    let complexity = 1.0 - (profile.complexity - history.complexity).abs() / COMPLEXITY_RANGE;
    (loc + team + complexity) / 3.0
}

/// `(new / old)^exp`, neutral when the reference is not positive.
#[inline]
fn scale(new: f64, old: f64, exponent: f64) -> f64 {
    if old > 0.0 {
        (new / old).powf(exponent)
    } else {
        1.0
    }
}

/// Estimates cost and duration from the most similar historical project.
///
/// Returns zeros when `history` is empty. Ties keep the earliest project.
pub fn regression_estimate(
    profile: &ProjectProfile,
    history: &[HistoricalProject],
) -> RegressionEstimate {
    let best = history
        .iter()
        .enumerate()
        .map(|(i, h)| (i, similarity(profile, h)))
        .fold(None, |best: Option<(usize, f64)>, (i, score)| match best {
            Some((_, s)) if s >= score => best,
            _ => Some((i, score)),
        });

    let Some((index, confidence)) = best else {
        return RegressionEstimate::default();
    };
    let matched = &history[index];

    let estimated_cost = matched.actual_cost
        * scale(profile.lines_of_code, matched.lines_of_code, COST_LOC_ELASTICITY)
        * scale(profile.team_size, matched.team_size, COST_TEAM_ELASTICITY)
        * scale(
            profile.complexity,
            matched.complexity,
            COST_COMPLEXITY_ELASTICITY,
        );
    let estimated_duration = matched.actual_duration
        * scale(
            profile.lines_of_code,
            matched.lines_of_code,
            DURATION_LOC_ELASTICITY,
        )
        * scale(
            profile.complexity,
            matched.complexity,
            DURATION_COMPLEXITY_ELASTICITY,
        );

    RegressionEstimate {
        estimated_cost,
        estimated_duration,
        confidence,
        r_squared: fit_indicator(history),
        matched_index: Some(index),
    }
}

fn fit_indicator(history: &[HistoricalProject]) -> f64 {
    let costs: Vec<f64> = history.iter().map(|h| h.actual_cost).collect();
    let dims: [Vec<f64>; 3] = [
        history.iter().map(|h| h.lines_of_code).collect(),
        history.iter().map(|h| h.team_size).collect(),
        history.iter().map(|h| h.complexity).collect(),
    ];
    dims.iter()
        .map(|d| correlation(d, &costs).abs())
        .fold(0.0, f64::max)
}
