//! Task model.
//!
//! A task is a unit of project work occupying a contiguous block of
//! discrete periods. It consumes fixed amounts of one or more resources
//! for its whole duration and may depend on other tasks.

use serde::{Deserialize, Serialize};

/// A task to be scheduled.
///
/// Tasks are supplied per call and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Number of periods the task occupies.
    pub duration: u32,
    /// Resource amounts held for the whole duration.
    #[serde(default)]
    pub required_resources: Vec<ResourceRequirement>,
    /// IDs of tasks that must finish before this one starts.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Ordering hint (higher = considered earlier). Not enforced.
    #[serde(default)]
    pub priority: i32,
}

/// An amount of a single resource required by a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirement {
    /// Referenced resource ID.
    pub resource_id: String,
    /// Amount committed in every period the task occupies.
    pub amount: f64,
}

impl Task {
    /// Creates a new task with the given ID and duration.
    pub fn new(id: impl Into<String>, duration: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            duration,
            required_resources: Vec::new(),
            prerequisites: Vec::new(),
            priority: 0,
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a resource requirement.
    pub fn with_resource(mut self, resource_id: impl Into<String>, amount: f64) -> Self {
        self.required_resources
            .push(ResourceRequirement::new(resource_id, amount));
        self
    }

    /// Adds a prerequisite task ID.
    pub fn with_prerequisite(mut self, task_id: impl Into<String>) -> Self {
        self.prerequisites.push(task_id.into());
        self
    }

    /// Sets the ordering hint.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether this task has no prerequisites.
    pub fn is_root(&self) -> bool {
        self.prerequisites.is_empty()
    }

    /// Amount of `resource_id` this task requires (0.0 if none).
    pub fn amount_of(&self, resource_id: &str) -> f64 {
        self.required_resources
            .iter()
            .filter(|r| r.resource_id == resource_id)
            .map(|r| r.amount)
            .sum()
    }
}

impl ResourceRequirement {
    /// Creates a new requirement.
    pub fn new(resource_id: impl Into<String>, amount: f64) -> Self {
        Self {
            resource_id: resource_id.into(),
            amount,
        }
    }
}
