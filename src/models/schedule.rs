//! Schedule (solution) model.
//!
//! A schedule result is the placement of tasks into periods together with
//! the resource load it implies and any diagnostics produced on the way.
//! Diagnostics are plain strings: infeasibility never aborts a run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A task placed into `[start_period, end_period)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// Scheduled task ID.
    pub task_id: String,
    /// First occupied period.
    pub start_period: u32,
    /// One past the last occupied period (`start + duration`).
    pub end_period: u32,
    /// Resource ID → amount held for the whole interval.
    pub assigned_resources: BTreeMap<String, f64>,
}

/// Outcome of a scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResult {
    /// Placed tasks, in placement order.
    pub schedule: Vec<ScheduleEntry>,
    /// Resource ID → committed amount per period (length = horizon).
    pub resource_utilization: BTreeMap<String, Vec<f64>>,
    /// Σ amount × hourly rate × duration over all entries.
    pub total_cost: f64,
    /// Latest end period.
    pub project_duration: u32,
    /// Human-readable diagnostics.
    pub conflicts: Vec<String>,
}

impl ScheduleEntry {
    /// Creates an entry covering `duration` periods from `start_period`.
    pub fn new(task_id: impl Into<String>, start_period: u32, duration: u32) -> Self {
        Self {
            task_id: task_id.into(),
            start_period,
            end_period: start_period + duration,
            assigned_resources: BTreeMap::new(),
        }
    }

    /// Records an assigned amount.
    pub fn with_assignment(mut self, resource_id: impl Into<String>, amount: f64) -> Self {
        *self.assigned_resources.entry(resource_id.into()).or_insert(0.0) += amount;
        self
    }

    /// Number of occupied periods.
    #[inline]
    pub fn duration(&self) -> u32 {
        self.end_period - self.start_period
    }

    /// Whether the entry occupies `period`.
    #[inline]
    pub fn occupies(&self, period: u32) -> bool {
        period >= self.start_period && period < self.end_period
    }
}

impl ScheduleResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the run produced no diagnostics.
    pub fn is_conflict_free(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Finds the entry for a task.
    pub fn entry_for_task(&self, task_id: &str) -> Option<&ScheduleEntry> {
        self.schedule.iter().find(|e| e.task_id == task_id)
    }

    /// Whether a task was placed.
    pub fn is_scheduled(&self, task_id: &str) -> bool {
        self.entry_for_task(task_id).is_some()
    }

    /// Number of placed tasks.
    pub fn scheduled_count(&self) -> usize {
        self.schedule.len()
    }

    /// Horizon the utilization arrays were built for.
    pub fn horizon(&self) -> usize {
        self.resource_utilization
            .values()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }

    /// Committed amount of a resource at a period (0.0 if unknown).
    pub fn utilization_at(&self, resource_id: &str, period: usize) -> f64 {
        self.resource_utilization
            .get(resource_id)
            .and_then(|u| u.get(period))
            .copied()
            .unwrap_or(0.0)
    }
}
