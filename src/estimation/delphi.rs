//! Delphi consensus over PERT three-point estimates.
//!
//! # Algorithm
//! 1. Per expert: `PERT = (o + 4m + p) / 6`.
//! 2. `pert` = simple mean of the PERT values.
//! 3. `finalEstimate` = confidence-weighted mean.
//! 4. `consensus` = `1 − stdDev / mean`, clamped to [0, 1].
//!
//! # Reference
//! Malcolm et al. (1959), "Application of a Technique for R&D Program Evaluation"

use serde::{Deserialize, Serialize};

use crate::finance::{mean, std_dev};
use crate::models::ExpertEstimate;

/// One expert's PERT value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertPert {
    /// Expert identifier.
    pub expert_id: String,
    /// `(o + 4m + p) / 6`.
    pub pert: f64,
    /// Weight applied in the final estimate.
    pub confidence: f64,
}

/// Consensus estimate across experts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelphiResult {
    /// Confidence-weighted mean PERT.
    pub final_estimate: f64,
    /// Unweighted mean PERT.
    pub pert: f64,
    /// Agreement in [0, 1]; 1 = identical estimates.
    pub consensus: f64,
    /// Population standard deviation of the PERT values.
    pub standard_deviation: f64,
    /// Per-expert breakdown, in input order.
    pub experts: Vec<ExpertPert>,
}

/// Combines expert estimates.
///
/// Zero experts yield all zeros. If every confidence is zero the final
/// estimate falls back to the unweighted mean.
///
/// # Example
/// ```
/// use u_project::estimation::delphi_estimate;
/// use u_project::models::ExpertEstimate;
///
/// let result = delphi_estimate(&[ExpertEstimate::new("E1", 80.0, 100.0, 140.0)]);
/// assert!((result.final_estimate - 103.333).abs() < 1e-3);
/// assert_eq!(result.consensus, 1.0);
/// ```
pub fn delphi_estimate(estimates: &[ExpertEstimate]) -> DelphiResult {
    if estimates.is_empty() {
        return DelphiResult::default();
    }

    let experts: Vec<ExpertPert> = estimates
        .iter()
        .map(|e| ExpertPert {
            expert_id: e.expert_id.clone(),
            pert: e.pert(),
            confidence: e.confidence,
        })
        .collect();
    let perts: Vec<f64> = experts.iter().map(|e| e.pert).collect();

    let pert = mean(&perts);
    let standard_deviation = std_dev(&perts);

    let total_confidence: f64 = experts.iter().map(|e| e.confidence).sum();
    let final_estimate = if total_confidence > 0.0 {
        experts.iter().map(|e| e.pert * e.confidence).sum::<f64>() / total_confidence
    } else {
        pert
    };

    DelphiResult {
        final_estimate,
        pert,
        consensus: consensus(pert, standard_deviation),
        standard_deviation,
        experts,
    }
}

fn consensus(mean: f64, std_dev: f64) -> f64 {
    if std_dev == 0.0 {
        1.0
    } else if mean == 0.0 {
        0.0
    } else {
        (1.0 - std_dev / mean.abs()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_expert() {
        let result = delphi_estimate(&[ExpertEstimate::new("E1", 80.0, 100.0, 140.0)]);
        let expected = (80.0 + 400.0 + 140.0) / 6.0;
        assert!((result.pert - expected).abs() < 1e-10);
        assert!((result.final_estimate - expected).abs() < 1e-10);
        assert!((result.consensus - 1.0).abs() < 1e-10);
        assert_eq!(result.standard_deviation, 0.0);
        assert_eq!(result.experts.len(), 1);
    }

    #[test]
    fn test_zero_experts() {
        let result = delphi_estimate(&[]);
        assert_eq!(result.final_estimate, 0.0);
        assert_eq!(result.pert, 0.0);
        assert_eq!(result.consensus, 0.0);
        assert!(result.experts.is_empty());
    }

    #[test]
    fn test_confidence_weighting() {
        let estimates = vec![
            ExpertEstimate::new("E1", 100.0, 100.0, 100.0).with_confidence(1.0),
            ExpertEstimate::new("E2", 200.0, 200.0, 200.0).with_confidence(0.0),
        ];
        let result = delphi_estimate(&estimates);
        assert!((result.pert - 150.0).abs() < 1e-10);
        // E2 carries no weight
        assert!((result.final_estimate - 100.0).abs() < 1e-10);
        // std 50, mean 150 → 1 - 1/3
        assert!((result.consensus - 2.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_total_confidence_falls_back() {
        let estimates = vec![
            ExpertEstimate::new("E1", 10.0, 10.0, 10.0).with_confidence(0.0),
            ExpertEstimate::new("E2", 30.0, 30.0, 30.0).with_confidence(0.0),
        ];
        let result = delphi_estimate(&estimates);
        assert!((result.final_estimate - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_consensus_clamped() {
        // mean 200, std ≈ 282.8 → 1 − 1.41 clamps to 0
        let estimates = vec![
            ExpertEstimate::new("E1", 0.0, 0.0, 0.0),
            ExpertEstimate::new("E2", 0.0, 0.0, 0.0),
            ExpertEstimate::new("E3", 600.0, 600.0, 600.0),
        ];
        let result = delphi_estimate(&estimates);
        assert!(result.consensus >= 0.0);
        assert!(result.consensus <= 1.0);
        assert_eq!(result.consensus, 0.0);
    }

    #[test]
    fn test_wire_names() {
        let json =
            serde_json::to_value(delphi_estimate(&[ExpertEstimate::new("E1", 1.0, 2.0, 3.0)]))
                .unwrap();
        assert!(json.get("finalEstimate").is_some());
        assert!(json.get("pert").is_some());
        assert!(json.get("consensus").is_some());
    }
}
