//! Schedule quality metrics (KPIs).
//!
//! Computes utilization indicators from a completed schedule and its
//! input tasks and resources.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Project Duration | Latest end period |
//! | Utilization | Committed / available capacity over the project duration |
//! | Peak Load | Largest committed amount in any period |
//! | Avg Utilization | Mean of per-resource utilization |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Resource, ScheduleResult, Task};

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleKpi {
    /// Latest end period.
    pub project_duration: u32,
    /// Total cost of scheduled work.
    pub total_cost: f64,
    /// Tasks placed on the timeline.
    pub scheduled_count: usize,
    /// Input tasks left unscheduled.
    pub unscheduled_count: usize,
    /// Per-resource utilization rate (0.0..1.0).
    pub utilization_by_resource: BTreeMap<String, f64>,
    /// Per-resource peak committed amount.
    pub peak_load_by_resource: BTreeMap<String, f64>,
    /// Average resource utilization (0.0..1.0).
    pub avg_utilization: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule and its inputs.
    ///
    /// # Arguments
    /// * `result` - The completed schedule.
    /// * `tasks` - The input tasks (for the unscheduled count).
    /// * `resources` - The resources the schedule was built against.
    pub fn calculate(result: &ScheduleResult, tasks: &[Task], resources: &[Resource]) -> Self {
        let duration = result.project_duration as usize;
        let mut utilization_by_resource = BTreeMap::new();
        let mut peak_load_by_resource = BTreeMap::new();

        for resource in resources {
            let used = result
                .resource_utilization
                .get(&resource.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let committed: f64 = used.iter().take(duration).sum();
            let available: f64 = (0..duration).map(|p| resource.capacity_at(p)).sum();
            let rate = if available > 0.0 {
                committed / available
            } else {
                0.0
            };
            let peak = used.iter().copied().fold(0.0, f64::max);

            utilization_by_resource.insert(resource.id.clone(), rate);
            peak_load_by_resource.insert(resource.id.clone(), peak);
        }

        let avg_utilization = if utilization_by_resource.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_resource.values().sum();
            sum / utilization_by_resource.len() as f64
        };

        let scheduled_count = tasks.iter().filter(|t| result.is_scheduled(&t.id)).count();

        Self {
            project_duration: result.project_duration,
            total_cost: result.total_cost,
            scheduled_count,
            unscheduled_count: tasks.len() - scheduled_count,
            utilization_by_resource,
            peak_load_by_resource,
            avg_utilization,
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_duration: u32, min_utilization: f64) -> bool {
        self.project_duration <= max_duration && self.avg_utilization >= min_utilization
    }
}
