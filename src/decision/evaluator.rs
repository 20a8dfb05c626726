//! Bottom-up expected value.

use crate::models::{DecisionNode, NodeType};

/// Expected value of a subtree.
///
/// - outcome: `value − cost`
/// - chance: `Σ pᵢ · EV(childᵢ)`
/// - decision: `max EV(child)`, 0.0 without children
pub fn expected_value(node: &DecisionNode) -> f64 {
    match node.node_type {
        NodeType::Outcome => node.net_value(),
        NodeType::Chance => node
            .children
            .iter()
            .map(|c| c.probability_or_zero() * expected_value(c))
            .sum(),
        NodeType::Decision => node
            .children
            .iter()
            .map(expected_value)
            .reduce(f64::max)
            .unwrap_or(0.0),
    }
}

/// Index of the child with the highest expected value (first on ties).
pub(crate) fn best_child_index(node: &DecisionNode) -> Option<usize> {
    node.children
        .iter()
        .map(expected_value)
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, ev)| match best {
            Some((_, b)) if b >= ev => best,
            _ => Some((i, ev)),
        })
        .map(|(i, _)| i)
}

/// Index of the most probable child (first on ties).
pub(crate) fn most_likely_child_index(node: &DecisionNode) -> Option<usize> {
    node.children
        .iter()
        .map(DecisionNode::probability_or_zero)
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, p)| match best {
            Some((_, b)) if b >= p => best,
            _ => Some((i, p)),
        })
        .map(|(i, _)| i)
}
