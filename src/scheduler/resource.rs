//! Greedy resource-constrained scheduler.
//!
//! # Algorithm
//!
//! 1. Order tasks topologically (prerequisites first, priority as a hint).
//! 2. For each task, the earliest start is the latest end among its
//!    already scheduled prerequisites (0 if none).
//! 3. Scan start periods forward from the earliest start. A start fits when,
//!    for every resource the task uses and every period it would occupy,
//!    `committed + amount ≤ max_capacity × availability[period mod len]`.
//! 4. Commit the first fitting start into the utilization arrays. If no
//!    start fits before the horizon, record a conflict and move on.
//!    A dependent of an unplaced task is still placed, with a conflict
//!    naming the missing prerequisite.
//!
//! Not optimal: a task never moves once placed, and later tasks only fill
//! the capacity left over.
//!
//! # Complexity
//! O(n · h · d · r) where n=tasks, h=horizon, d=task duration, r=resources per task.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info, warn};

use super::ordering::topological_order;
use crate::config::defaults;
use crate::models::{Resource, ScheduleEntry, ScheduleResult, Task};

/// Slack for floating-point capacity comparisons.
const CAPACITY_EPSILON: f64 = 1e-9;

/// Input container for scheduling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// Tasks to schedule.
    pub tasks: Vec<Task>,
    /// Available resources.
    pub resources: Vec<Resource>,
    /// Number of periods to search. `None` uses the scheduler default.
    #[serde(default)]
    pub horizon: Option<u32>,
}

impl ScheduleRequest {
    /// Creates a new schedule request.
    pub fn new(tasks: Vec<Task>, resources: Vec<Resource>) -> Self {
        Self {
            tasks,
            resources,
            horizon: None,
        }
    }

    /// Sets the horizon.
    pub fn with_horizon(mut self, horizon: u32) -> Self {
        self.horizon = Some(horizon);
        self
    }
}

/// Greedy resource-constrained scheduler.
///
/// # Example
///
/// ```
/// use u_project::models::{Resource, Task};
/// use u_project::scheduler::ResourceScheduler;
///
/// let tasks = vec![
///     Task::new("A", 2).with_resource("DEV", 1.0),
///     Task::new("B", 2).with_resource("DEV", 1.0).with_prerequisite("A"),
/// ];
/// let resources = vec![Resource::new("DEV", 1.0).with_rate(50.0)];
///
/// let result = ResourceScheduler::new().schedule(&tasks, &resources, None);
/// assert_eq!(result.entry_for_task("B").unwrap().start_period, 2);
/// assert_eq!(result.project_duration, 4);
/// assert_eq!(result.total_cost, 200.0);
/// ```
#[derive(Debug, Clone)]
pub struct ResourceScheduler {
    default_horizon: u32,
}

impl ResourceScheduler {
    /// Creates a scheduler with the default minimum horizon.
    pub fn new() -> Self {
        Self {
            default_horizon: defaults::DEFAULT_HORIZON,
        }
    }

    /// Sets the minimum horizon used when a request gives none.
    pub fn with_default_horizon(mut self, horizon: u32) -> Self {
        self.default_horizon = horizon;
        self
    }

    /// Horizon for a run: the explicit one, or the larger of the default
    /// and the serial length of all tasks (saturating at `u32::MAX`).
    pub fn resolve_horizon(&self, tasks: &[Task], horizon: Option<u32>) -> u32 {
        horizon.unwrap_or_else(|| {
            let serial = tasks
                .iter()
                .fold(0u32, |acc, t| acc.saturating_add(t.duration));
            self.default_horizon.max(serial)
        })
    }

    /// Schedules tasks on resources.
    pub fn schedule(
        &self,
        tasks: &[Task],
        resources: &[Resource],
        horizon: Option<u32>,
    ) -> ScheduleResult {
        let horizon = self.resolve_horizon(tasks, horizon);
        let by_id: HashMap<&str, &Resource> =
            resources.iter().map(|r| (r.id.as_str(), r)).collect();

        let mut result = ScheduleResult::new();
        result.resource_utilization = resources
            .iter()
            .map(|r| (r.id.clone(), vec![0.0; horizon as usize]))
            .collect();

        let order = topological_order(tasks);
        for edge in &order.cycles {
            let msg = format!(
                "Prerequisite cycle: task '{}' depends on '{}', which depends back on it; dependency ignored",
                edge.task_id, edge.prerequisite_id
            );
            warn!(task = %edge.task_id, prerequisite = %edge.prerequisite_id, "prerequisite cycle");
            result.conflicts.push(msg);
        }

        let mut end_of: HashMap<&str, u32> = HashMap::new();
        let mut unplaced: HashSet<&str> = HashSet::new();

        for &idx in &order.order {
            let task = &tasks[idx];
            let demand = demand_of(task);

            if let Some(unknown) = demand.keys().find(|id| !by_id.contains_key(id.as_str())) {
                warn!(task = %task.id, resource = %unknown, "unknown resource");
                result.conflicts.push(format!(
                    "Task '{}' requires unknown resource '{}'; not scheduled",
                    task.id, unknown
                ));
                unplaced.insert(task.id.as_str());
                continue;
            }

            let earliest = task
                .prerequisites
                .iter()
                .filter_map(|p| end_of.get(p.as_str()).copied())
                .max()
                .unwrap_or(0);

            match find_start(
                task.duration,
                &demand,
                earliest,
                horizon,
                &result.resource_utilization,
                &by_id,
            ) {
                Some(start) => {
                    commit(
                        start,
                        task.duration,
                        &demand,
                        &mut result.resource_utilization,
                    );
                    let entry = ScheduleEntry {
                        task_id: task.id.clone(),
                        start_period: start,
                        end_period: start + task.duration,
                        assigned_resources: demand,
                    };
                    debug!(task = %task.id, start, end = entry.end_period, "placed task");
                    end_of.insert(task.id.as_str(), entry.end_period);
                    result.schedule.push(entry);

                    for pre in task
                        .prerequisites
                        .iter()
                        .filter(|p| unplaced.contains(p.as_str()))
                    {
                        warn!(
                            task = %task.id,
                            prerequisite = %pre,
                            "placed after unplaced prerequisite"
                        );
                        result.conflicts.push(format!(
                            "Task '{}' scheduled without unplaced prerequisite '{}'",
                            task.id, pre
                        ));
                    }
                }
                None => {
                    warn!(task = %task.id, earliest, horizon, "task does not fit");
                    result.conflicts.push(format!(
                        "Task '{}' could not be scheduled within horizon {} (earliest start {}): insufficient resource capacity",
                        task.id, horizon, earliest
                    ));
                    unplaced.insert(task.id.as_str());
                }
            }
        }

        result.total_cost = result
            .schedule
            .iter()
            .map(|e| {
                e.assigned_resources
                    .iter()
                    .map(|(id, amount)| {
                        let rate = by_id.get(id.as_str()).map_or(0.0, |r| r.hourly_rate);
                        amount * rate * e.duration() as f64
                    })
                    .sum::<f64>()
            })
            .sum();
        result.project_duration = result
            .schedule
            .iter()
            .map(|e| e.end_period)
            .max()
            .unwrap_or(0);

        info!(
            tasks = tasks.len(),
            scheduled = result.schedule.len(),
            conflicts = result.conflicts.len(),
            duration = result.project_duration,
            cost = result.total_cost,
            "schedule complete"
        );
        result
    }

    /// Schedules from a request.
    pub fn schedule_request(&self, request: &ScheduleRequest) -> ScheduleResult {
        self.schedule(&request.tasks, &request.resources, request.horizon)
    }
}

impl Default for ResourceScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-resource demand of a task (duplicate requirements summed).
fn demand_of(task: &Task) -> BTreeMap<String, f64> {
    let mut demand = BTreeMap::new();
    for req in &task.required_resources {
        *demand.entry(req.resource_id.clone()).or_insert(0.0) += req.amount;
    }
    demand
}

fn fits(
    start: u32,
    duration: u32,
    demand: &BTreeMap<String, f64>,
    utilization: &BTreeMap<String, Vec<f64>>,
    by_id: &HashMap<&str, &Resource>,
) -> bool {
    demand.iter().all(|(id, &amount)| {
        let (Some(resource), Some(used)) = (by_id.get(id.as_str()), utilization.get(id)) else {
            return false;
        };
        (start..start + duration).all(|p| {
            let p = p as usize;
            used[p] + amount <= resource.capacity_at(p) + CAPACITY_EPSILON
        })
    })
}

fn find_start(
    duration: u32,
    demand: &BTreeMap<String, f64>,
    earliest: u32,
    horizon: u32,
    utilization: &BTreeMap<String, Vec<f64>>,
    by_id: &HashMap<&str, &Resource>,
) -> Option<u32> {
    let latest = horizon.checked_sub(duration)?;
    (earliest..=latest).find(|&start| fits(start, duration, demand, utilization, by_id))
}

fn commit(
    start: u32,
    duration: u32,
    demand: &BTreeMap<String, f64>,
    utilization: &mut BTreeMap<String, Vec<f64>>,
) {
    for (id, amount) in demand {
        if let Some(used) = utilization.get_mut(id) {
            for p in start..start + duration {
                used[p as usize] += amount;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev(capacity: f64) -> Resource {
        Resource::new("DEV", capacity).with_rate(50.0)
    }

    #[test]
    fn test_dependent_tasks_do_not_overlap() {
        let tasks = vec![
            Task::new("A", 2).with_resource("DEV", 1.0),
            Task::new("B", 2).with_resource("DEV", 1.0).with_prerequisite("A"),
        ];
        let result = ResourceScheduler::new().schedule(&tasks, &[dev(1.0)], None);

        let a = result.entry_for_task("A").unwrap();
        let b = result.entry_for_task("B").unwrap();
        assert_eq!(a.start_period, 0);
        assert_eq!(b.start_period, a.end_period);
        // 1 × 50 × 2 for each task
        assert!((result.total_cost - 200.0).abs() < 1e-10);
        assert_eq!(result.project_duration, 4);
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn test_capacity_serializes_independent_tasks() {
        let tasks = vec![
            Task::new("A", 3).with_resource("DEV", 1.0),
            Task::new("B", 2).with_resource("DEV", 1.0),
        ];
        let result = ResourceScheduler::new().schedule(&tasks, &[dev(1.0)], None);
        assert_eq!(result.entry_for_task("A").unwrap().start_period, 0);
        assert_eq!(result.entry_for_task("B").unwrap().start_period, 3);
    }

    #[test]
    fn test_parallel_when_capacity_allows() {
        let tasks = vec![
            Task::new("A", 3).with_resource("DEV", 1.0),
            Task::new("B", 2).with_resource("DEV", 1.0),
        ];
        let result = ResourceScheduler::new().schedule(&tasks, &[dev(2.0)], None);
        assert_eq!(result.entry_for_task("B").unwrap().start_period, 0);
        assert_eq!(result.project_duration, 3);
        assert!((result.utilization_at("DEV", 1) - 2.0).abs() < 1e-10);
        assert!((result.utilization_at("DEV", 2) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_capacity_is_a_conflict() {
        let tasks = vec![
            Task::new("A", 2).with_resource("DEV", 1.0),
            Task::new("B", 1),
        ];
        let result = ResourceScheduler::new().schedule(&tasks, &[dev(0.0)], None);
        assert!(!result.is_scheduled("A"));
        assert!(result.is_scheduled("B"));
        assert_eq!(result.conflicts.len(), 1);
        assert!(result.conflicts[0].contains("'A'"));
    }

    #[test]
    fn test_dependent_of_unplaced_task_is_flagged() {
        let tasks = vec![
            Task::new("A", 2).with_resource("DEV", 1.0),
            Task::new("B", 1).with_prerequisite("A"),
        ];
        let result = ResourceScheduler::new().schedule(&tasks, &[dev(0.0)], None);
        assert!(!result.is_scheduled("A"));
        assert_eq!(result.entry_for_task("B").unwrap().start_period, 0);
        assert_eq!(result.conflicts.len(), 2);
        assert!(result
            .conflicts
            .contains(&"Task 'B' scheduled without unplaced prerequisite 'A'".to_string()));
    }

    #[test]
    fn test_cycle_edge_is_not_an_unplaced_prerequisite() {
        let tasks = vec![
            Task::new("A", 1).with_prerequisite("B"),
            Task::new("B", 1).with_prerequisite("A"),
        ];
        let result = ResourceScheduler::new().schedule(&tasks, &[], None);
        assert_eq!(result.conflicts.len(), 1);
        assert!(!result.conflicts[0].contains("unplaced"));
    }

    #[test]
    fn test_availability_delays_start() {
        // Unavailable in even periods
        let r = Resource::new("DEV", 1.0).with_availability(vec![0.0, 1.0]);
        let tasks = vec![Task::new("A", 1).with_resource("DEV", 1.0)];
        let result = ResourceScheduler::new().schedule(&tasks, &[r], None);
        assert_eq!(result.entry_for_task("A").unwrap().start_period, 1);
    }

    #[test]
    fn test_partial_availability_blocks_full_demand() {
        let r = Resource::new("DEV", 2.0).with_availability(vec![0.5, 0.5, 1.0]);
        let tasks = vec![Task::new("A", 1).with_resource("DEV", 2.0)];
        let result = ResourceScheduler::new().schedule(&tasks, &[r], None);
        assert_eq!(result.entry_for_task("A").unwrap().start_period, 2);
    }

    #[test]
    fn test_horizon_limits_placement() {
        let tasks = vec![
            Task::new("A", 3).with_resource("DEV", 1.0),
            Task::new("B", 3).with_resource("DEV", 1.0),
        ];
        let result = ResourceScheduler::new().schedule(&tasks, &[dev(1.0)], Some(5));
        assert!(result.is_scheduled("A"));
        assert!(!result.is_scheduled("B"));
        assert_eq!(result.resource_utilization["DEV"].len(), 5);
        assert_eq!(result.conflicts.len(), 1);
    }

    #[test]
    fn test_unknown_resource() {
        let tasks = vec![Task::new("A", 1).with_resource("GPU", 1.0)];
        let result = ResourceScheduler::new().schedule(&tasks, &[dev(1.0)], None);
        assert!(!result.is_scheduled("A"));
        assert!(result.conflicts[0].contains("unknown resource 'GPU'"));
    }

    #[test]
    fn test_cycle_reported_and_run_completes() {
        let tasks = vec![
            Task::new("A", 1).with_prerequisite("B"),
            Task::new("B", 1).with_prerequisite("A"),
        ];
        let result = ResourceScheduler::new().schedule(&tasks, &[], None);
        assert_eq!(result.scheduled_count(), 2);
        assert!(result.conflicts.iter().any(|c| c.contains("cycle")));
    }

    #[test]
    fn test_duplicate_requirements_are_summed() {
        let tasks = vec![Task::new("A", 1)
            .with_resource("DEV", 1.0)
            .with_resource("DEV", 1.0)];
        let result = ResourceScheduler::new().schedule(&tasks, &[dev(1.0)], None);
        assert!(!result.is_scheduled("A"));
    }

    #[test]
    fn test_zero_duration_task() {
        let tasks = vec![
            Task::new("A", 2).with_resource("DEV", 1.0),
            Task::new("M", 0).with_prerequisite("A"),
        ];
        let result = ResourceScheduler::new().schedule(&tasks, &[dev(1.0)], None);
        let m = result.entry_for_task("M").unwrap();
        assert_eq!(m.start_period, 2);
        assert_eq!(m.end_period, 2);
    }

    #[test]
    fn test_default_horizon() {
        let s = ResourceScheduler::new().with_default_horizon(10);
        let short = vec![Task::new("A", 3)];
        let long = vec![Task::new("A", 8), Task::new("B", 8)];
        assert_eq!(s.resolve_horizon(&short, None), 10);
        assert_eq!(s.resolve_horizon(&long, None), 16);
        assert_eq!(s.resolve_horizon(&long, Some(4)), 4);
    }

    #[test]
    fn test_default_horizon_saturates() {
        let s = ResourceScheduler::new().with_default_horizon(10);
        let tasks = vec![Task::new("A", u32::MAX), Task::new("B", 1)];
        assert_eq!(s.resolve_horizon(&tasks, None), u32::MAX);
        assert_eq!(s.resolve_horizon(&tasks, Some(10)), 10);
    }

    #[test]
    fn test_long_prerequisite_chain() {
        let n = 50_000;
        let tasks: Vec<Task> = (0..n)
            .map(|i| {
                let task = Task::new(format!("T{i}"), 0);
                if i > 0 {
                    task.with_prerequisite(format!("T{}", i - 1))
                } else {
                    task
                }
            })
            .collect();
        let result = ResourceScheduler::new().schedule(&tasks, &[], None);
        assert_eq!(result.scheduled_count(), n);
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let result = ResourceScheduler::new().schedule(&[], &[], None);
        assert_eq!(result.scheduled_count(), 0);
        assert_eq!(result.project_duration, 0);
        assert_eq!(result.total_cost, 0.0);
    }

    #[test]
    fn test_request_round_trip() {
        let request = ScheduleRequest::new(
            vec![Task::new("A", 2).with_resource("DEV", 1.0)],
            vec![dev(1.0)],
        )
        .with_horizon(4);
        let result = ResourceScheduler::new().schedule_request(&request);
        assert_eq!(result.resource_utilization["DEV"], vec![1.0, 1.0, 0.0, 0.0]);
    }
}
