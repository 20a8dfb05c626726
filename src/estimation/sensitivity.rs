//! One-at-a-time sensitivity analysis over the risk factors.
//!
//! Each factor is swept to a low bound (0) and a high bound (double its
//! value, capped at 1) while the others stay at baseline. Every run reuses
//! the same seed so differences come from the factor alone. Results are
//! ordered by P90 swing, largest first (tornado order).

use serde::{Deserialize, Serialize};

use super::monte_carlo::{simulate_seeded, RiskFactors, SimulationResult};

/// Which risk factor was varied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskFactorKind {
    Technical,
    Market,
    Organizational,
}

impl RiskFactorKind {
    const ALL: [RiskFactorKind; 3] = [
        RiskFactorKind::Technical,
        RiskFactorKind::Market,
        RiskFactorKind::Organizational,
    ];

    fn set(self, risks: &RiskFactors, value: f64) -> RiskFactors {
        let mut out = *risks;
        match self {
            RiskFactorKind::Technical => out.technical = value,
            RiskFactorKind::Market => out.market = value,
            RiskFactorKind::Organizational => out.organizational = value,
        }
        out
    }

    fn get(self, risks: &RiskFactors) -> f64 {
        match self {
            RiskFactorKind::Technical => risks.technical,
            RiskFactorKind::Market => risks.market,
            RiskFactorKind::Organizational => risks.organizational,
        }
    }
}

/// Effect of sweeping one factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorSensitivity {
    /// Varied factor.
    pub factor: RiskFactorKind,
    /// Factor value for the low run.
    pub low_value: f64,
    /// Factor value for the high run.
    pub high_value: f64,
    /// Median at the low bound.
    pub low_p50: f64,
    /// Median at the high bound.
    pub high_p50: f64,
    /// P90 at the low bound.
    pub low_p90: f64,
    /// P90 at the high bound.
    pub high_p90: f64,
    /// `high_p90 − low_p90`.
    pub swing: f64,
}

/// Sensitivity report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityReport {
    /// Simulation at the given risk levels.
    pub baseline: SimulationResult,
    /// Per-factor effects, largest swing first.
    pub factors: Vec<FactorSensitivity>,
}

/// Sweeps each risk factor and measures the effect on P50/P90.
pub fn sensitivity_analysis(
    base_value: f64,
    risks: &RiskFactors,
    iterations: usize,
    seed: u64,
) -> SensitivityReport {
    let baseline = simulate_seeded(base_value, risks, iterations, seed);

    let mut factors: Vec<FactorSensitivity> = RiskFactorKind::ALL
        .iter()
        .map(|&kind| {
            let low_value = 0.0;
            let high_value = (kind.get(risks) * 2.0).min(1.0);
            let low = simulate_seeded(base_value, &kind.set(risks, low_value), iterations, seed);
            let high = simulate_seeded(base_value, &kind.set(risks, high_value), iterations, seed);
            FactorSensitivity {
                factor: kind,
                low_value,
                high_value,
                low_p50: low.p50,
                high_p50: high.p50,
                low_p90: low.p90,
                high_p90: high.p90,
                swing: high.p90 - low.p90,
            }
        })
        .collect();

    factors.sort_by(|a, b| b.swing.total_cmp(&a.swing));

    SensitivityReport { baseline, factors }
}
