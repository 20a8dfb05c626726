//! What-if scenario comparison.
//!
//! Each scenario re-runs the scheduler on its own copy of the resources
//! with every `max_capacity` scaled by a multiplier, optionally under a
//! tighter horizon. Runs are independent and execute in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::resource::{ResourceScheduler, ScheduleRequest};
use crate::models::{Resource, ScheduleResult};

/// A what-if variation of a scheduling request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Scenario label.
    pub name: String,
    /// Factor applied to every resource's `max_capacity`.
    #[serde(default = "unit_multiplier")]
    pub resource_multiplier: f64,
    /// Horizon override for this scenario.
    #[serde(default)]
    pub horizon: Option<u32>,
}

fn unit_multiplier() -> f64 {
    1.0
}

impl Scenario {
    /// Creates a scenario with the given capacity multiplier.
    pub fn new(name: impl Into<String>, resource_multiplier: f64) -> Self {
        Self {
            name: name.into(),
            resource_multiplier,
            horizon: None,
        }
    }

    /// Sets the horizon override.
    pub fn with_horizon(mut self, horizon: u32) -> Self {
        self.horizon = Some(horizon);
        self
    }
}

/// Result of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    /// Scenario label.
    pub name: String,
    /// Multiplier that was applied.
    pub resource_multiplier: f64,
    /// Full scheduling result.
    pub result: ScheduleResult,
    /// `project_duration / total_cost × 1000` (0 when cost is 0).
    pub efficiency: f64,
    /// `conflicts / task count` (0 without tasks).
    pub risk_level: f64,
}

/// Comparison across scenarios.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    /// Outcomes in input order.
    pub scenarios: Vec<ScenarioOutcome>,
    /// Lowest risk, then shortest duration, then lowest cost.
    pub best_scenario: Option<String>,
}

/// Runs every scenario against the request.
pub fn analyze_scenarios(
    scheduler: &ResourceScheduler,
    request: &ScheduleRequest,
    scenarios: &[Scenario],
) -> ScenarioComparison {
    let outcomes: Vec<ScenarioOutcome> = scenarios
        .par_iter()
        .map(|scenario| run_scenario(scheduler, request, scenario))
        .collect();

    let best_scenario = outcomes
        .iter()
        .min_by(|a, b| {
            a.risk_level
                .total_cmp(&b.risk_level)
                .then(a.result.project_duration.cmp(&b.result.project_duration))
                .then(a.result.total_cost.total_cmp(&b.result.total_cost))
        })
        .map(|o| o.name.clone());

    info!(
        scenarios = outcomes.len(),
        best = best_scenario.as_deref().unwrap_or("-"),
        "scenario analysis complete"
    );

    ScenarioComparison {
        scenarios: outcomes,
        best_scenario,
    }
}

fn run_scenario(
    scheduler: &ResourceScheduler,
    request: &ScheduleRequest,
    scenario: &Scenario,
) -> ScenarioOutcome {
    let resources: Vec<Resource> = request
        .resources
        .iter()
        .map(|r| r.scaled(scenario.resource_multiplier))
        .collect();
    let horizon = scenario.horizon.or(request.horizon);
    let result = scheduler.schedule(&request.tasks, &resources, horizon);

    let efficiency = if result.total_cost > 0.0 {
        result.project_duration as f64 / result.total_cost * 1000.0
    } else {
        0.0
    };
    let risk_level = if request.tasks.is_empty() {
        0.0
    } else {
        result.conflicts.len() as f64 / request.tasks.len() as f64
    };

    ScenarioOutcome {
        name: scenario.name.clone(),
        resource_multiplier: scenario.resource_multiplier,
        result,
        efficiency,
        risk_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;

    fn request() -> ScheduleRequest {
        ScheduleRequest::new(
            vec![
                Task::new("A", 2).with_resource("DEV", 1.0),
                Task::new("B", 2).with_resource("DEV", 1.0),
                Task::new("C", 1).with_resource("DEV", 1.0).with_prerequisite("A"),
            ],
            vec![Resource::new("DEV", 1.0).with_rate(100.0)],
        )
    }

    #[test]
    fn test_identity_scenario_matches_plain_run() {
        let scheduler = ResourceScheduler::new();
        let req = request();
        let plain = scheduler.schedule_request(&req);
        let comparison = analyze_scenarios(&scheduler, &req, &[Scenario::new("baseline", 1.0)]);
        assert_eq!(comparison.scenarios[0].result, plain);
    }

    #[test]
    fn test_more_capacity_shortens_schedule() {
        let scheduler = ResourceScheduler::new();
        let comparison = analyze_scenarios(
            &scheduler,
            &request(),
            &[Scenario::new("baseline", 1.0), Scenario::new("double", 2.0)],
        );
        let base = &comparison.scenarios[0];
        let double = &comparison.scenarios[1];
        assert_eq!(base.result.project_duration, 5);
        assert_eq!(double.result.project_duration, 3);
        // Cost depends on amounts, not capacity
        assert!((base.result.total_cost - double.result.total_cost).abs() < 1e-10);
        assert_eq!(comparison.best_scenario.as_deref(), Some("double"));
    }

    #[test]
    fn test_metrics() {
        let scheduler = ResourceScheduler::new();
        let comparison = analyze_scenarios(
            &scheduler,
            &request(),
            &[Scenario::new("tight", 1.0).with_horizon(3)],
        );
        let tight = &comparison.scenarios[0];
        // A fits (0..2), B cannot fit, C fits (2..3)
        assert_eq!(tight.result.conflicts.len(), 1);
        assert!((tight.risk_level - 1.0 / 3.0).abs() < 1e-10);
        // duration 3, cost (2 + 1) × 100 = 300
        assert!((tight.efficiency - 3.0 / 300.0 * 1000.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_cost_and_empty_tasks() {
        let scheduler = ResourceScheduler::new();
        let req = ScheduleRequest::new(vec![], vec![Resource::new("DEV", 1.0)]);
        let comparison = analyze_scenarios(&scheduler, &req, &[Scenario::new("empty", 1.0)]);
        assert_eq!(comparison.scenarios[0].efficiency, 0.0);
        assert_eq!(comparison.scenarios[0].risk_level, 0.0);
    }

    #[test]
    fn test_input_not_mutated() {
        let scheduler = ResourceScheduler::new();
        let req = request();
        let before = req.clone();
        let _ = analyze_scenarios(&scheduler, &req, &[Scenario::new("half", 0.5)]);
        assert_eq!(req, before);
    }

    #[test]
    fn test_no_scenarios() {
        let comparison = analyze_scenarios(&ResourceScheduler::new(), &request(), &[]);
        assert!(comparison.scenarios.is_empty());
        assert!(comparison.best_scenario.is_none());
    }
}
