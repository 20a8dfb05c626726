//! Input validation.
//!
//! The computation modules assume well-formed input. These checks run
//! before them (the engine's `*_checked` entry points call them) and
//! report every issue found rather than stopping at the first.
//!
//! Detects:
//! - Duplicate IDs (tasks, resources, decision nodes)
//! - Missing resource and prerequisite references
//! - Circular prerequisite dependencies (DAG validation)
//! - Out-of-range numbers (negative amounts, availability outside [0, 1])
//! - Inverted three-point estimates
//! - Chance nodes whose branch probabilities do not sum to 1
//! - Scenarios with a non-finite or negative multiplier, or a zero horizon
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use crate::models::{DecisionNode, ExpertEstimate, HistoricalProject, NodeType, Resource, Task};
use crate::scheduler::Scenario;
use std::collections::{HashMap, HashSet};

/// Tolerance on the branch probability sum of a chance node.
const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A task requires a resource that doesn't exist.
    InvalidResourceReference,
    /// Prerequisite graph contains a cycle.
    CyclicDependency,
    /// A task references a prerequisite that doesn't exist.
    InvalidPrerequisite,
    /// A number is outside its allowed range.
    InvalidRange,
    /// An estimate violates optimistic ≤ most likely ≤ pessimistic.
    InvertedEstimate,
    /// Chance node probabilities do not sum to 1.
    ProbabilitySum,
    /// A decision or chance node has no children.
    EmptyBranch,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn range_error(message: String) -> ValidationError {
    ValidationError::new(ValidationErrorKind::InvalidRange, message)
}

/// Validates the input data for a scheduling run.
///
/// Checks:
/// 1. No duplicate task IDs
/// 2. No duplicate resource IDs
/// 3. Non-negative capacity, rate and requirement amounts
/// 4. Availability factors within [0, 1]
/// 5. All resource references point to existing resources
/// 6. All prerequisite references point to existing tasks
/// 7. No circular prerequisite dependencies
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_schedule_input(tasks: &[Task], resources: &[Resource]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut resource_ids = HashSet::new();
    for r in resources {
        if !resource_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }
        if r.max_capacity < 0.0 {
            errors.push(range_error(format!(
                "Resource '{}' has negative capacity {}",
                r.id, r.max_capacity
            )));
        }
        if r.hourly_rate < 0.0 {
            errors.push(range_error(format!(
                "Resource '{}' has negative hourly rate {}",
                r.id, r.hourly_rate
            )));
        }
        if let Some(a) = r.availability.iter().find(|a| !(0.0..=1.0).contains(*a)) {
            errors.push(range_error(format!(
                "Resource '{}' has availability factor {} outside [0, 1]",
                r.id, a
            )));
        }
    }

    let mut task_ids = HashSet::new();
    for task in tasks {
        if !task_ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }
    }

    for task in tasks {
        for req in &task.required_resources {
            if !resource_ids.contains(req.resource_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidResourceReference,
                    format!(
                        "Task '{}' references unknown resource '{}'",
                        task.id, req.resource_id
                    ),
                ));
            }
            if req.amount < 0.0 {
                errors.push(range_error(format!(
                    "Task '{}' requires negative amount {} of '{}'",
                    task.id, req.amount, req.resource_id
                )));
            }
        }
        for pre in &task.prerequisites {
            if !task_ids.contains(pre.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPrerequisite,
                    format!(
                        "Task '{}' references unknown prerequisite '{}'",
                        task.id, pre
                    ),
                ));
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(tasks) {
        errors.push(cycle_err);
    }

    finish(errors)
}

/// Detects cycles in the prerequisite graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently on the DFS stack), a cycle exists.
///
/// # Reference
/// Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4
fn detect_cycles(tasks: &[Task]) -> Option<ValidationError> {
    // Edges point from prerequisite to dependent task
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    for task in tasks {
        for pre in &task.prerequisites {
            adj.entry(pre.as_str()).or_default().push(task.id.as_str());
        }
    }

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    // Input order keeps the reported task deterministic
    for task in tasks {
        let node = task.id.as_str();
        if !visited.contains(node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular dependency detected involving task '{node}'"),
            ));
        }
    }

    None
}

/// Iterative DFS from `start` over (node, next neighbor index) frames.
fn has_cycle_dfs<'a>(
    start: &'a str,
    adj: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    in_stack: &mut HashSet<&'a str>,
) -> bool {
    visited.insert(start);
    in_stack.insert(start);
    let mut stack: Vec<(&'a str, usize)> = vec![(start, 0)];

    while let Some(top) = stack.last_mut() {
        let (node, cursor) = *top;
        let neighbors = adj.get(node).map(Vec::as_slice).unwrap_or(&[]);
        let Some(&next) = neighbors.get(cursor) else {
            in_stack.remove(node);
            stack.pop();
            continue;
        };
        top.1 += 1;

        if in_stack.contains(next) {
            return true; // Back edge → cycle
        }
        if visited.insert(next) {
            in_stack.insert(next);
            stack.push((next, 0));
        }
    }

    false
}

/// Validates what-if scenarios.
///
/// Each multiplier must be finite and non-negative; a horizon override must
/// be at least one period.
pub fn validate_scenarios(scenarios: &[Scenario]) -> ValidationResult {
    let mut errors = Vec::new();

    for s in scenarios {
        if !s.resource_multiplier.is_finite() || s.resource_multiplier < 0.0 {
            errors.push(range_error(format!(
                "Scenario '{}' has resource multiplier {} (must be finite and >= 0)",
                s.name, s.resource_multiplier
            )));
        }
        if s.horizon == Some(0) {
            errors.push(range_error(format!("Scenario '{}' has a zero horizon", s.name)));
        }
    }

    finish(errors)
}

/// Validates expert three-point estimates.
///
/// Each estimate needs non-negative values, optimistic ≤ most likely ≤
/// pessimistic, and a confidence within [0, 1].
pub fn validate_estimates(estimates: &[ExpertEstimate]) -> ValidationResult {
    let mut errors = Vec::new();

    for e in estimates {
        if e.optimistic < 0.0 || e.most_likely < 0.0 || e.pessimistic < 0.0 {
            errors.push(range_error(format!(
                "Estimate from '{}' has a negative value",
                e.expert_id
            )));
        }
        if e.optimistic > e.most_likely || e.most_likely > e.pessimistic {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedEstimate,
                format!(
                    "Estimate from '{}' is not ordered: {} / {} / {}",
                    e.expert_id, e.optimistic, e.most_likely, e.pessimistic
                ),
            ));
        }
        if !(0.0..=1.0).contains(&e.confidence) {
            errors.push(range_error(format!(
                "Estimate from '{}' has confidence {} outside [0, 1]",
                e.expert_id, e.confidence
            )));
        }
    }

    finish(errors)
}

/// Validates historical project records.
///
/// Team size, cost and duration must be positive; complexity within [1, 5].
pub fn validate_history(history: &[HistoricalProject]) -> ValidationResult {
    let mut errors = Vec::new();

    for (i, h) in history.iter().enumerate() {
        if h.lines_of_code < 0.0 {
            errors.push(range_error(format!(
                "Historical project #{i} has negative lines of code"
            )));
        }
        if h.team_size <= 0.0 {
            errors.push(range_error(format!(
                "Historical project #{i} has non-positive team size {}",
                h.team_size
            )));
        }
        if !(1.0..=5.0).contains(&h.complexity) {
            errors.push(range_error(format!(
                "Historical project #{i} has complexity {} outside [1, 5]",
                h.complexity
            )));
        }
        if h.actual_cost <= 0.0 {
            errors.push(range_error(format!(
                "Historical project #{i} has non-positive cost {}",
                h.actual_cost
            )));
        }
        if h.actual_duration <= 0.0 {
            errors.push(range_error(format!(
                "Historical project #{i} has non-positive duration {}",
                h.actual_duration
            )));
        }
    }

    finish(errors)
}

/// Validates a decision tree.
///
/// Checks:
/// 1. No duplicate node IDs
/// 2. Probabilities within [0, 1]
/// 3. Every chance node's branch probabilities sum to 1
/// 4. Decision and chance nodes have at least one child
pub fn validate_decision_tree(root: &DecisionNode) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();
    check_node(root, &mut ids, &mut errors);
    finish(errors)
}

fn check_node<'a>(
    node: &'a DecisionNode,
    ids: &mut HashSet<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    if !ids.insert(node.id.as_str()) {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateId,
            format!("Duplicate node ID: {}", node.id),
        ));
    }

    if let Some(p) = node.probability {
        if !(0.0..=1.0).contains(&p) {
            errors.push(range_error(format!(
                "Node '{}' has probability {} outside [0, 1]",
                node.id, p
            )));
        }
    }

    match node.node_type {
        NodeType::Outcome => {}
        NodeType::Decision | NodeType::Chance if node.children.is_empty() => {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyBranch,
                format!("Node '{}' has no children", node.id),
            ));
        }
        NodeType::Chance => {
            let sum: f64 = node.children.iter().map(DecisionNode::probability_or_zero).sum();
            if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ProbabilitySum,
                    format!(
                        "Chance node '{}' branch probabilities sum to {:.4}, expected 1",
                        node.id, sum
                    ),
                ));
            }
        }
        NodeType::Decision => {}
    }

    for child in &node.children {
        check_node(child, ids, errors);
    }
}
