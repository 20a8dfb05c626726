//! Resource leveling check.
//!
//! Re-scans committed utilization against `max_capacity × availability`
//! and reports every over-allocated period. Detection only: nothing is
//! rescheduled. A result produced by [`ResourceScheduler`] against the same
//! resources is always clean; over-allocation shows up when a schedule is
//! checked against changed resources (reduced headcount, new availability
//! calendar) or has been edited by hand.
//!
//! [`ResourceScheduler`]: super::ResourceScheduler

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::models::{Resource, ScheduleResult};

const CAPACITY_EPSILON: f64 = 1e-9;

/// One over-allocated resource period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overallocation {
    /// Resource ID.
    pub resource_id: String,
    /// Period index.
    pub period: u32,
    /// Committed amount.
    pub used: f64,
    /// Available capacity in that period.
    pub capacity: f64,
}

impl Overallocation {
    /// Amount over capacity.
    pub fn excess(&self) -> f64 {
        self.used - self.capacity
    }
}

/// Leveling report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelingReport {
    /// Over-allocated periods, by resource then period.
    pub overallocations: Vec<Overallocation>,
    /// Human-readable diagnostics, one per over-allocation.
    pub conflicts: Vec<String>,
}

impl LevelingReport {
    /// Whether every period is within capacity.
    pub fn is_level(&self) -> bool {
        self.overallocations.is_empty()
    }
}

/// Checks a schedule's utilization against resource capacity.
///
/// Utilization rows for resources not in `resources` are skipped.
pub fn level_resources(result: &ScheduleResult, resources: &[Resource]) -> LevelingReport {
    let by_id: HashMap<&str, &Resource> = resources.iter().map(|r| (r.id.as_str(), r)).collect();
    let mut report = LevelingReport::default();

    for (id, used) in &result.resource_utilization {
        let Some(resource) = by_id.get(id.as_str()) else {
            continue;
        };
        for (period, &amount) in used.iter().enumerate() {
            let capacity = resource.capacity_at(period);
            if amount > capacity + CAPACITY_EPSILON {
                report.conflicts.push(format!(
                    "Resource '{}' over-allocated in period {}: {:.2} used of {:.2} available",
                    id, period, amount, capacity
                ));
                report.overallocations.push(Overallocation {
                    resource_id: id.clone(),
                    period: period as u32,
                    used: amount,
                    capacity,
                });
            }
        }
    }

    debug!(
        overallocated = report.overallocations.len(),
        "resource leveling check"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use crate::scheduler::ResourceScheduler;

    #[test]
    fn test_scheduler_output_is_level() {
        let resources = vec![Resource::new("DEV", 2.0).with_availability(vec![1.0, 0.5])];
        let tasks = vec![
            Task::new("A", 3).with_resource("DEV", 1.0),
            Task::new("B", 2).with_resource("DEV", 1.0),
            Task::new("C", 2).with_resource("DEV", 2.0),
        ];
        let result = ResourceScheduler::new().schedule(&tasks, &resources, None);
        assert!(level_resources(&result, &resources).is_level());
    }

    #[test]
    fn test_detects_reduced_capacity() {
        let original = vec![Resource::new("DEV", 2.0)];
        let tasks = vec![
            Task::new("A", 2).with_resource("DEV", 1.0),
            Task::new("B", 2).with_resource("DEV", 1.0),
        ];
        let result = ResourceScheduler::new().schedule(&tasks, &original, Some(4));

        let reduced = vec![Resource::new("DEV", 1.0)];
        let report = level_resources(&result, &reduced);
        assert_eq!(report.overallocations.len(), 2);
        assert_eq!(report.overallocations[0].period, 0);
        assert!((report.overallocations[0].excess() - 1.0).abs() < 1e-10);
        assert_eq!(report.conflicts.len(), 2);
        assert!(report.conflicts[0].contains("'DEV'"));
    }

    #[test]
    fn test_hand_edited_utilization() {
        let mut result = ScheduleResult::new();
        result
            .resource_utilization
            .insert("QA".into(), vec![0.5, 1.5, 1.0]);
        result.resource_utilization.insert("GHOST".into(), vec![9.0]);

        let resources = vec![Resource::new("QA", 1.0)];
        let report = level_resources(&result, &resources);
        assert_eq!(report.overallocations.len(), 1);
        assert_eq!(report.overallocations[0].period, 1);
    }
}
