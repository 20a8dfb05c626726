//! Resource-constrained scheduling.
//!
//! Orders tasks by prerequisite, places each at the earliest start where
//! every resource it needs has spare capacity, and reports whatever does
//! not fit as a conflict. Built on top of the placement run:
//!
//! - leveling checks a schedule against (possibly changed) capacity,
//! - scenario analysis re-runs the placement with scaled capacity,
//! - `ScheduleKpi` summarizes utilization.
//!
//! # Algorithm
//!
//! `ResourceScheduler` is a greedy, prerequisite-first, earliest-fit
//! heuristic. It is not optimal, but provides fast baseline solutions.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Kolisch (1996), "Serial and parallel resource-constrained project
//!   scheduling methods revisited"

mod kpi;
mod leveling;
mod ordering;
mod resource;
mod scenario;

pub use kpi::ScheduleKpi;
pub use leveling::{level_resources, LevelingReport, Overallocation};
pub use ordering::{topological_order, CycleEdge, TaskOrder};
pub use resource::{ResourceScheduler, ScheduleRequest};
pub use scenario::{analyze_scenarios, Scenario, ScenarioComparison, ScenarioOutcome};
