//! Optional advisory collaborator for decision analyses.
//!
//! The engine condenses a [`DecisionAnalysis`] into an [`AdvisorySummary`]
//! and hands it to an injected [`AdvisoryClient`], typically a language
//! model behind an HTTP call. The collaborator only adds prose; the
//! engine's own recommendation stands whether or not it answers.

use serde::{Deserialize, Serialize};

use crate::decision::{DecisionAnalysis, OutcomeSummary, RiskLevel};
use crate::error::AdvisoryError;

/// One option as presented to the advisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryOption {
    /// Option name (the child node's name).
    pub name: String,
    /// Expected value of the option's subtree.
    pub expected_value: f64,
    /// Success probability in percent.
    pub success_rate: f64,
    /// ROI in percent.
    pub roi: f64,
    /// Risk level derived from the failure probability.
    pub risk_level: RiskLevel,
    /// Reachable outcomes with their probabilities.
    pub outcomes: Vec<OutcomeSummary>,
}

/// Payload sent to the advisor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvisorySummary {
    /// Options in the tree's child order.
    pub options: Vec<AdvisoryOption>,
}

impl AdvisorySummary {
    /// Builds the payload from the options profiled in an analysis.
    pub fn from_analysis(analysis: &DecisionAnalysis) -> Self {
        let options = analysis
            .risk_analysis
            .iter()
            .map(|p| AdvisoryOption {
                name: p.name.clone(),
                expected_value: p.expected_value,
                success_rate: p.success_probability * 100.0,
                roi: p.roi,
                risk_level: p.risk_level,
                outcomes: p.outcomes.clone(),
            })
            .collect();
        Self { options }
    }

    /// True when there is nothing to advise on.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Serializes the payload.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// The advisor's recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryResponse {
    /// Name of the recommended option.
    pub best_solution: String,
    /// Short bullet reasons.
    #[serde(default)]
    pub justification_key_points: Vec<String>,
    /// Free-form explanation.
    #[serde(default)]
    pub justification_long: String,
}

impl AdvisoryResponse {
    /// Parses a raw advisor reply.
    pub fn from_json(raw: &str) -> Result<Self, AdvisoryError> {
        serde_json::from_str(raw).map_err(|e| AdvisoryError::MalformedResponse(e.to_string()))
    }
}

/// Trait for advisory providers.
///
/// Implementations own their transport and credentials. Returning an error
/// never fails the surrounding analysis.
pub trait AdvisoryClient: Send + Sync {
    /// Recommends one of the summarized options.
    fn recommend(&self, summary: &AdvisorySummary) -> Result<AdvisoryResponse, AdvisoryError>;
}

/// Client used when no advisor is configured.
pub struct NoAdvisor;

impl AdvisoryClient for NoAdvisor {
    fn recommend(&self, _summary: &AdvisorySummary) -> Result<AdvisoryResponse, AdvisoryError> {
        Err(AdvisoryError::Unavailable("no advisor configured".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::analyze_tree;
    use crate::models::DecisionNode;

    fn analysis() -> DecisionAnalysis {
        let tree = DecisionNode::decision("root", "Platform")
            .with_child(
                DecisionNode::chance("cloud", "Cloud")
                    .with_child(
                        DecisionNode::outcome("cloud-ok", "Success", 300.0)
                            .with_probability(0.9)
                            .with_cost(100.0),
                    )
                    .with_child(
                        DecisionNode::outcome("cloud-fail", "Failure", 0.0)
                            .with_probability(0.1)
                            .with_cost(100.0),
                    ),
            )
            .with_child(DecisionNode::outcome("stay", "Stay", 50.0));
        analyze_tree(&tree, 0.05)
    }

    #[test]
    fn test_summary_from_analysis() {
        let summary = AdvisorySummary::from_analysis(&analysis());
        assert!(!summary.is_empty());
        assert!(AdvisorySummary::default().is_empty());
        assert_eq!(summary.options.len(), 2);
        let cloud = &summary.options[0];
        assert_eq!(cloud.name, "Cloud");
        assert!((cloud.success_rate - 90.0).abs() < 1e-10);
        assert_eq!(cloud.outcomes.len(), 2);
    }

    #[test]
    fn test_payload_wire_names() {
        let json = AdvisorySummary::from_analysis(&analysis()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value["options"][0];
        assert!(first.get("expectedValue").is_some());
        assert!(first.get("successRate").is_some());
        assert!(first.get("riskLevel").is_some());
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"best_solution":"Cloud","justification_key_points":["cheaper"],"justification_long":"..."}"#;
        let response = AdvisoryResponse::from_json(raw).unwrap();
        assert_eq!(response.best_solution, "Cloud");
        assert_eq!(response.justification_key_points, vec!["cheaper"]);

        let minimal = AdvisoryResponse::from_json(r#"{"best_solution":"Stay"}"#).unwrap();
        assert!(minimal.justification_key_points.is_empty());

        assert!(matches!(
            AdvisoryResponse::from_json("not json"),
            Err(AdvisoryError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_no_advisor() {
        let summary = AdvisorySummary::from_analysis(&analysis());
        assert!(matches!(
            NoAdvisor.recommend(&summary),
            Err(AdvisoryError::Unavailable(_))
        ));
    }
}
