//! Best-path selection with a risk-adjusted tie-break.
//!
//! # Algorithm
//! Walk the tree from the root:
//! 1. **Decision**: rank children by expected value. If the top two are
//!    within the tie threshold (relative to their mean magnitude), pick the
//!    one with the higher [`RiskProfile::risk_score`]; otherwise pick the
//!    higher expected value.
//! 2. **Chance**: follow the most probable child. This narrates the most
//!    likely realization, not the expectation-optimal path.
//! 3. **Outcome**: stop.
//!
//! Every step appends a sentence to the reasoning trail.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::evaluator::{expected_value, most_likely_child_index};
use super::risk::RiskProfile;
use crate::models::{DecisionNode, NodeType};

/// A node on the selected path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStep {
    /// Node ID.
    pub id: String,
    /// Node name.
    pub name: String,
    /// Node kind.
    pub node_type: NodeType,
    /// Expected value of the subtree rooted here.
    pub expected_value: f64,
}

/// Result of a decision tree analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionAnalysis {
    /// Expected value of the whole tree.
    pub expected_value: f64,
    /// Root-to-leaf path chosen by the walk.
    pub best_path: Vec<PathStep>,
    /// Explanation of every step.
    pub reasoning: Vec<String>,
    /// Profiles of the root's options (or of the root itself when it is
    /// not a decision node).
    pub risk_analysis: Vec<RiskProfile>,
    /// Name of the option chosen at the first decision node.
    pub recommended_option: Option<String>,
    /// Whether any decision on the path was settled by the tie-break.
    pub tie_break_applied: bool,
}

struct Walk {
    threshold: f64,
    path: Vec<PathStep>,
    reasoning: Vec<String>,
    recommended: Option<String>,
    tie_break_applied: bool,
}

/// Analyzes a decision tree.
///
/// `tie_threshold` is the relative expected-value gap below which the top
/// two options count as tied (0.05 by default configuration).
pub fn analyze_tree(root: &DecisionNode, tie_threshold: f64) -> DecisionAnalysis {
    let risk_analysis: Vec<RiskProfile> = match root.node_type {
        NodeType::Decision => root.children.iter().map(RiskProfile::of).collect(),
        _ => vec![RiskProfile::of(root)],
    };

    let mut walk = Walk {
        threshold: tie_threshold,
        path: Vec::new(),
        reasoning: Vec::new(),
        recommended: None,
        tie_break_applied: false,
    };
    walk.visit(root);

    DecisionAnalysis {
        expected_value: expected_value(root),
        best_path: walk.path,
        reasoning: walk.reasoning,
        risk_analysis,
        recommended_option: walk.recommended,
        tie_break_applied: walk.tie_break_applied,
    }
}

/// Whether two expected values are within `threshold` of their mean magnitude.
fn is_tie(a: f64, b: f64, threshold: f64) -> bool {
    let scale = (a.abs() + b.abs()) / 2.0;
    if scale == 0.0 {
        return true;
    }
    (a - b).abs() / scale < threshold
}

impl Walk {
    fn visit(&mut self, node: &DecisionNode) {
        let ev = expected_value(node);
        self.path.push(PathStep {
            id: node.id.clone(),
            name: node.name.clone(),
            node_type: node.node_type,
            expected_value: ev,
        });

        match node.node_type {
            NodeType::Outcome => {
                self.reasoning.push(format!(
                    "Reached outcome '{}' with net value {:.2} (value {:.2} − cost {:.2}).",
                    node.name,
                    node.net_value(),
                    node.value,
                    node.cost
                ));
            }
            NodeType::Chance => match most_likely_child_index(node) {
                Some(i) => {
                    let child = &node.children[i];
                    self.reasoning.push(format!(
                        "At chance node '{}' (expected value {:.2}), following the most likely branch '{}' (p = {:.2}).",
                        node.name,
                        ev,
                        child.name,
                        child.probability_or_zero()
                    ));
                    self.visit(child);
                }
                None => self
                    .reasoning
                    .push(format!("Chance node '{}' has no branches.", node.name)),
            },
            NodeType::Decision => match self.choose(node) {
                Some(i) => self.visit(&node.children[i]),
                None => self
                    .reasoning
                    .push(format!("Decision node '{}' has no options.", node.name)),
            },
        }
    }

    fn choose(&mut self, node: &DecisionNode) -> Option<usize> {
        let mut ranked: Vec<(usize, RiskProfile)> = node
            .children
            .iter()
            .map(RiskProfile::of)
            .enumerate()
            .collect();
        ranked.sort_by(|a, b| b.1.expected_value.total_cmp(&a.1.expected_value));

        for (_, p) in &ranked {
            self.reasoning.push(format!(
                "Option '{}': expected value {:.2}, success {:.0}%, ROI {:.1}%, worst case {:.2}, risk {}.",
                p.name,
                p.expected_value,
                p.success_probability * 100.0,
                p.roi,
                p.worst_case,
                p.risk_level
            ));
        }

        let (first, rest) = ranked.split_first()?;
        let chosen = match rest.first() {
            Some(second) if is_tie(first.1.expected_value, second.1.expected_value, self.threshold) => {
                self.tie_break_applied = true;
                let (s1, s2) = (first.1.risk_score(), second.1.risk_score());
                debug!(
                    decision = %node.id,
                    first = %first.1.id,
                    second = %second.1.id,
                    s1,
                    s2,
                    "expected values tied; applying risk score"
                );
                let winner = if s2 > s1 { second } else { first };
                self.reasoning.push(format!(
                    "At decision '{}', '{}' and '{}' are within {:.0}% expected value; risk-adjusted scores {:.2} vs {:.2} favour '{}'.",
                    node.name,
                    first.1.name,
                    second.1.name,
                    self.threshold * 100.0,
                    s1,
                    s2,
                    winner.1.name
                ));
                winner
            }
            _ => {
                self.reasoning.push(format!(
                    "At decision '{}', choosing '{}' with the highest expected value {:.2}.",
                    node.name, first.1.name, first.1.expected_value
                ));
                first
            }
        };

        if self.recommended.is_none() {
            self.recommended = Some(chosen.1.name.clone());
        }
        Some(chosen.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: &str, name: &str, p_ok: f64, ok: f64, fail: f64, cost: f64) -> DecisionNode {
        DecisionNode::chance(id, name)
            .with_child(
                DecisionNode::outcome(format!("{id}-ok"), "Success", ok)
                    .with_probability(p_ok)
                    .with_cost(cost),
            )
            .with_child(
                DecisionNode::outcome(format!("{id}-fail"), "Failure", fail)
                    .with_probability(1.0 - p_ok)
                    .with_cost(cost),
            )
    }

    fn build_or_buy() -> DecisionNode {
        DecisionNode::decision("root", "Delivery strategy")
            .with_child(option("inhouse", "InHouse", 0.7, 500_000.0, 100_000.0, 200_000.0))
            .with_child(option("outsource", "Outsource", 0.8, 400_000.0, 50_000.0, 150_000.0))
    }

    #[test]
    fn test_tie_break_fires() {
        let analysis = analyze_tree(&build_or_buy(), 0.05);

        assert!((analysis.expected_value - 180_000.0).abs() < 1e-6);
        assert!(analysis.tie_break_applied);
        // InHouse scores 45, Outsource 61
        assert_eq!(analysis.recommended_option.as_deref(), Some("Outsource"));
        assert_eq!(analysis.best_path[0].id, "root");
        assert_eq!(analysis.best_path[1].id, "outsource");
        assert_eq!(analysis.best_path[2].id, "outsource-ok");
        assert_eq!(analysis.best_path.len(), 3);
        assert!(!analysis.reasoning.is_empty());
        assert!(analysis.reasoning.iter().any(|r| r.contains("risk-adjusted")));
        assert_eq!(analysis.risk_analysis.len(), 2);
    }

    #[test]
    fn test_tie_break_deterministic() {
        let a = analyze_tree(&build_or_buy(), 0.05);
        let b = analyze_tree(&build_or_buy(), 0.05);
        assert_eq!(a, b);
    }

    #[test]
    fn test_clear_winner_by_expected_value() {
        let tree = DecisionNode::decision("root", "root")
            .with_child(option("safe", "Safe", 0.95, 200_000.0, 0.0, 100_000.0))
            .with_child(option("bold", "Bold", 0.6, 1_000_000.0, 0.0, 100_000.0));
        let analysis = analyze_tree(&tree, 0.05);
        // Safe: 0.95·100k + 0.05·(−100k) = 90k; Bold: 0.6·900k + 0.4·(−100k) = 500k
        assert!(!analysis.tie_break_applied);
        assert_eq!(analysis.recommended_option.as_deref(), Some("Bold"));
        assert!((analysis.expected_value - 500_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_chance_follows_most_likely_not_best() {
        let tree = DecisionNode::chance("root", "Market")
            .with_child(DecisionNode::outcome("boom", "Boom", 1_000_000.0).with_probability(0.4))
            .with_child(DecisionNode::outcome("flat", "Flat", 10_000.0).with_probability(0.6));
        let analysis = analyze_tree(&tree, 0.05);
        assert_eq!(analysis.best_path.last().unwrap().id, "flat");
        assert!(analysis.recommended_option.is_none());
        assert_eq!(analysis.risk_analysis.len(), 1);
    }

    #[test]
    fn test_nested_decision() {
        let tree = DecisionNode::decision("root", "Phase 1")
            .with_child(
                DecisionNode::decision("expand", "Expand")
                    .with_child(DecisionNode::outcome("big", "Big", 300.0))
                    .with_child(DecisionNode::outcome("small", "Small", 100.0)),
            )
            .with_child(DecisionNode::outcome("stop", "Stop", 50.0));
        let analysis = analyze_tree(&tree, 0.05);
        let ids: Vec<&str> = analysis.best_path.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "expand", "big"]);
        assert_eq!(analysis.recommended_option.as_deref(), Some("Expand"));
    }

    #[test]
    fn test_empty_decision() {
        let analysis = analyze_tree(&DecisionNode::decision("root", "Empty"), 0.05);
        assert_eq!(analysis.expected_value, 0.0);
        assert_eq!(analysis.best_path.len(), 1);
        assert!(analysis.risk_analysis.is_empty());
        assert!(analysis.reasoning[0].contains("no options"));
    }

    #[test]
    fn test_is_tie() {
        assert!(is_tie(100.0, 96.0, 0.05));
        assert!(!is_tie(100.0, 90.0, 0.05));
        assert!(is_tie(0.0, 0.0, 0.05));
        assert!(is_tie(-100.0, -97.0, 0.05));
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(analyze_tree(&build_or_buy(), 0.05)).unwrap();
        assert!(json.get("expectedValue").is_some());
        assert!(json.get("bestPath").is_some());
        assert!(json.get("riskAnalysis").is_some());
        assert_eq!(json["bestPath"][0]["nodeType"], "decision");
    }
}
