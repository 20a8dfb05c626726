//! Decision tree model.
//!
//! A tree of decision, chance, and outcome nodes. Decision nodes branch on
//! choices the project controls, chance nodes branch on events it does not,
//! and outcome nodes are terminal with a realized value.
//!
//! Trees are values: every edit returns a new tree rebuilt along the path
//! to the edited node and leaves the receiver untouched.

use serde::{Deserialize, Serialize};

/// Kind of a decision tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A choice; evaluates to its best child.
    Decision,
    /// An uncertain event; evaluates to the probability-weighted children.
    Chance,
    /// A terminal result.
    Outcome,
}

/// A node of a decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionNode {
    /// Unique node identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Node kind.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Probability of reaching this node from its chance parent.
    #[serde(default)]
    pub probability: Option<f64>,
    /// Cost incurred on this branch.
    #[serde(default)]
    pub cost: f64,
    /// Gross value realized (outcome nodes only).
    #[serde(default)]
    pub value: f64,
    /// Ordered children; empty for leaves.
    #[serde(default)]
    pub children: Vec<DecisionNode>,
}

impl DecisionNode {
    fn new(id: impl Into<String>, name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type,
            probability: None,
            cost: 0.0,
            value: 0.0,
            children: Vec::new(),
        }
    }

    /// Creates a decision node.
    pub fn decision(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeType::Decision)
    }

    /// Creates a chance node.
    pub fn chance(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeType::Chance)
    }

    /// Creates an outcome node.
    pub fn outcome(id: impl Into<String>, name: impl Into<String>, value: f64) -> Self {
        Self {
            value,
            ..Self::new(id, name, NodeType::Outcome)
        }
    }

    /// Sets the branch probability.
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = Some(probability);
        self
    }

    /// Sets the branch cost.
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    /// Appends a child.
    pub fn with_child(mut self, child: DecisionNode) -> Self {
        self.children.push(child);
        self
    }

    /// Branch probability, 0.0 when unset.
    #[inline]
    pub fn probability_or_zero(&self) -> f64 {
        self.probability.unwrap_or(0.0)
    }

    /// Net value of an outcome: `value − cost`.
    #[inline]
    pub fn net_value(&self) -> f64 {
        self.value - self.cost
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Finds a node by ID (depth-first).
    pub fn find(&self, id: &str) -> Option<&DecisionNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Returns a new tree with the node `id` replaced by `f(node)`.
    ///
    /// Returns `None` if no node has that ID.
    pub fn with_updated<F>(&self, id: &str, f: F) -> Option<DecisionNode>
    where
        F: Fn(&DecisionNode) -> DecisionNode,
    {
        self.rebuild(id, &f)
    }

    fn rebuild<F>(&self, id: &str, f: &F) -> Option<DecisionNode>
    where
        F: Fn(&DecisionNode) -> DecisionNode,
    {
        if self.id == id {
            return Some(f(self));
        }
        self.children.iter().enumerate().find_map(|(i, child)| {
            child.rebuild(id, f).map(|replaced| {
                let mut node = self.clone();
                node.children[i] = replaced;
                node
            })
        })
    }

    /// Returns a new tree with `child` appended under `parent_id`.
    pub fn with_child_under(&self, parent_id: &str, child: &DecisionNode) -> Option<DecisionNode> {
        self.with_updated(parent_id, |parent| {
            let mut parent = parent.clone();
            parent.children.push(child.clone());
            parent
        })
    }

    /// Returns a new tree without the subtree rooted at `id`.
    ///
    /// The root itself cannot be removed; returns `None` in that case or
    /// when no node has that ID.
    pub fn without_node(&self, id: &str) -> Option<DecisionNode> {
        if let Some(pos) = self.children.iter().position(|c| c.id == id) {
            let mut node = self.clone();
            node.children.remove(pos);
            return Some(node);
        }
        self.children.iter().enumerate().find_map(|(i, child)| {
            child.without_node(id).map(|pruned| {
                let mut node = self.clone();
                node.children[i] = pruned;
                node
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> DecisionNode {
        DecisionNode::decision("root", "Build strategy")
            .with_child(
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
                    ),
            )
            .with_child(DecisionNode::outcome("skip", "Do nothing", 0.0))
    }

    #[test]
    fn test_find_and_count() {
        let tree = sample_tree();
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.find("ih-fail").unwrap().name, "Failure");
        assert!(tree.find("missing").is_none());
    }

    #[test]
    fn test_net_value() {
        let tree = sample_tree();
        let ok = tree.find("ih-ok").unwrap();
        assert!((ok.net_value() - 300_000.0).abs() < 1e-10);
    }

    #[test]
    fn test_with_updated_leaves_original() {
        let tree = sample_tree();
        let updated = tree
            .with_updated("ih-ok", |n| n.clone().with_probability(0.9))
            .unwrap();

        assert_eq!(updated.find("ih-ok").unwrap().probability, Some(0.9));
        assert_eq!(tree.find("ih-ok").unwrap().probability, Some(0.7));
        assert!(tree.with_updated("missing", |n| n.clone()).is_none());
    }

    #[test]
    fn test_with_child_under() {
        let tree = sample_tree();
        let extra = DecisionNode::outcome("ih-late", "Late", 300_000.0).with_probability(0.1);
        let grown = tree.with_child_under("inhouse", &extra).unwrap();
        assert_eq!(grown.node_count(), 6);
        assert_eq!(grown.find("inhouse").unwrap().children.len(), 3);
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn test_without_node() {
        let tree = sample_tree();
        let pruned = tree.without_node("inhouse").unwrap();
        assert_eq!(pruned.node_count(), 2);
        assert!(pruned.find("ih-ok").is_none());

        let deep = tree.without_node("ih-fail").unwrap();
        assert_eq!(deep.node_count(), 4);

        assert!(tree.without_node("root").is_none());
        assert!(tree.without_node("missing").is_none());
    }

    #[test]
    fn test_node_type_wire_names() {
        let node: DecisionNode = serde_json::from_str(
            r#"{"id":"o","type":"outcome","probability":0.5,"cost":10,"value":20}"#,
        )
        .unwrap();
        assert_eq!(node.node_type, NodeType::Outcome);
        assert!(node.is_leaf());
        assert!((node.net_value() - 10.0).abs() < 1e-10);
    }
}
