//! Risk profiles of decision options.
//!
//! An option's profile summarizes the outcomes it can lead to. Outcomes are
//! weighted by the product of chance probabilities along the way; nested
//! decisions are assumed to take their best expected-value branch.

use serde::{Deserialize, Serialize};

use super::evaluator::{best_child_index, expected_value};
use crate::finance::roi;
use crate::models::{DecisionNode, NodeType};

/// Coarse risk classification from failure probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// `≤ 0.2` Low, `≤ 0.4` Medium, otherwise High.
    pub fn from_failure_probability(failure: f64) -> Self {
        if failure <= 0.2 {
            RiskLevel::Low
        } else if failure <= 0.4 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    /// Bonus used by the tie-break score.
    pub fn score_bonus(self) -> f64 {
        match self {
            RiskLevel::Low => 25.0,
            RiskLevel::Medium => 15.0,
            RiskLevel::High => 5.0,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(s)
    }
}

/// A reachable outcome with its path probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeSummary {
    /// Outcome node ID.
    pub id: String,
    /// Outcome name.
    pub name: String,
    /// Probability of reaching the outcome from the option.
    pub probability: f64,
    /// `value − cost`.
    pub net_value: f64,
}

/// Risk profile of one option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    /// Option node ID.
    pub id: String,
    /// Option name.
    pub name: String,
    /// Expected value of the option subtree.
    pub expected_value: f64,
    /// Probability mass of outcomes with positive net value.
    pub success_probability: f64,
    /// `1 − success_probability`.
    pub failure_probability: f64,
    /// Probability-weighted cost.
    pub average_cost: f64,
    /// Probability-weighted gross value.
    pub average_value: f64,
    /// ROI of average value over average cost, in percent.
    pub roi: f64,
    /// Smallest net value among reachable outcomes.
    pub worst_case: f64,
    /// Classification from failure probability.
    pub risk_level: RiskLevel,
    /// Reachable outcomes.
    pub outcomes: Vec<OutcomeSummary>,
}

impl RiskProfile {
    /// Builds the profile of an option subtree.
    pub fn of(option: &DecisionNode) -> Self {
        let mut outcomes = Vec::new();
        collect_outcomes(option, 1.0, &mut outcomes);

        let mass: f64 = outcomes.iter().map(|(_, p)| p).sum();
        let weighted = |f: fn(&DecisionNode) -> f64| -> f64 {
            if mass > 0.0 {
                outcomes.iter().map(|(n, p)| p * f(n)).sum::<f64>() / mass
            } else {
                0.0
            }
        };

        let success_probability = if mass > 0.0 {
            outcomes
                .iter()
                .filter(|(n, _)| n.net_value() > 0.0)
                .map(|(_, p)| p)
                .sum::<f64>()
                / mass
        } else {
            0.0
        };
        let failure_probability = 1.0 - success_probability;
        let average_cost = weighted(|n| n.cost);
        let average_value = weighted(|n| n.value);
        let worst_case = outcomes
            .iter()
            .map(|(n, _)| n.net_value())
            .reduce(f64::min)
            .unwrap_or(0.0);

        Self {
            id: option.id.clone(),
            name: option.name.clone(),
            expected_value: expected_value(option),
            success_probability,
            failure_probability,
            average_cost,
            average_value,
            roi: roi(average_value, average_cost),
            worst_case,
            risk_level: RiskLevel::from_failure_probability(failure_probability),
            outcomes: outcomes
                .iter()
                .map(|(n, p)| OutcomeSummary {
                    id: n.id.clone(),
                    name: n.name.clone(),
                    probability: *p,
                    net_value: n.net_value(),
                })
                .collect(),
        }
    }

    /// Tie-break score (higher is better).
    ///
    /// `30 × success + level bonus + min(ROI / 10, 20) + max(0, worst / 10000)`
    pub fn risk_score(&self) -> f64 {
        30.0 * self.success_probability
            + self.risk_level.score_bonus()
            + (self.roi / 10.0).min(20.0)
            + (self.worst_case / 10_000.0).max(0.0)
    }
}

fn collect_outcomes<'a>(
    node: &'a DecisionNode,
    probability: f64,
    out: &mut Vec<(&'a DecisionNode, f64)>,
) {
    match node.node_type {
        NodeType::Outcome => out.push((node, probability)),
        NodeType::Chance => {
            for child in &node.children {
                collect_outcomes(child, probability * child.probability_or_zero(), out);
            }
        }
        NodeType::Decision => {
            if let Some(i) = best_child_index(node) {
                collect_outcomes(&node.children[i], probability, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_house() -> DecisionNode {
        DecisionNode::chance("inhouse", "In-house")
            .with_child(
                DecisionNode::outcome("ih-ok", "Success", 500_000.0)
                    .with_probability(0.7)
                    .with_cost(200_000.0),
            )
            .with_child(
                DecisionNode::outcome("ih-fail", "Failure", 100_000.0)
                    .with_probability(0.3)
                    .with_cost(200_000.0),
            )
    }

    #[test]
    fn test_profile_of_chance_option() {
        let p = RiskProfile::of(&in_house());
        assert!((p.expected_value - 180_000.0).abs() < 1e-6);
        assert!((p.success_probability - 0.7).abs() < 1e-10);
        assert!((p.failure_probability - 0.3).abs() < 1e-10);
        assert!((p.average_cost - 200_000.0).abs() < 1e-6);
        assert!((p.average_value - 380_000.0).abs() < 1e-6);
        assert!((p.roi - 90.0).abs() < 1e-6);
        assert!((p.worst_case + 100_000.0).abs() < 1e-6);
        assert_eq!(p.risk_level, RiskLevel::Medium);
        assert_eq!(p.outcomes.len(), 2);
    }

    #[test]
    fn test_risk_score() {
        let p = RiskProfile::of(&in_house());
        // 21 + 15 + 9 + 0
        assert!((p.risk_score() - 45.0).abs() < 1e-6);
    }

    #[test]
    fn test_roi_component_capped() {
        let leaf = DecisionNode::outcome("x", "x", 1_000_000.0).with_cost(1_000.0);
        let p = RiskProfile::of(&leaf);
        assert_eq!(p.risk_level, RiskLevel::Low);
        // 30 + 25 + 20 (capped) + 99.9
        assert!((p.risk_score() - (75.0 + 99.9)).abs() < 1e-6);
    }

    #[test]
    fn test_nested_probabilities_multiply() {
        let option = DecisionNode::chance("c", "c")
            .with_child(
                DecisionNode::chance("c2", "c2")
                    .with_probability(0.5)
                    .with_child(DecisionNode::outcome("a", "a", 10.0).with_probability(0.4))
                    .with_child(DecisionNode::outcome("b", "b", 0.0).with_probability(0.6)),
            )
            .with_child(DecisionNode::outcome("d", "d", 5.0).with_probability(0.5));
        let p = RiskProfile::of(&option);
        let a = p.outcomes.iter().find(|o| o.id == "a").unwrap();
        assert!((a.probability - 0.2).abs() < 1e-10);
        // a (0.2) and d (0.5) succeed
        assert!((p.success_probability - 0.7).abs() < 1e-10);
    }

    #[test]
    fn test_nested_decision_follows_best_branch() {
        let option = DecisionNode::decision("d", "d")
            .with_child(DecisionNode::outcome("lo", "lo", 10.0))
            .with_child(DecisionNode::outcome("hi", "hi", 20.0));
        let p = RiskProfile::of(&option);
        assert_eq!(p.outcomes.len(), 1);
        assert_eq!(p.outcomes[0].id, "hi");
    }

    #[test]
    fn test_risk_levels() {
        assert_eq!(RiskLevel::from_failure_probability(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_failure_probability(0.2), RiskLevel::Low);
        assert_eq!(RiskLevel::from_failure_probability(0.35), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_failure_probability(0.9), RiskLevel::High);
        assert_eq!(RiskLevel::High.to_string(), "High");
    }
}
