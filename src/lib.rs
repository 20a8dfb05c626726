//! Project economics and scheduling engine.
//!
//! Pure, stateless computations behind a project-planning service: cost
//! models, investment metrics, effort estimation, decision-tree analysis,
//! and resource-constrained scheduling. Plain structures in, result
//! structures out; nothing here touches storage or the network.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Resource`, `ScheduleResult`,
//!   `ExpertEstimate`, `HistoricalProject`, `Project`, `DecisionNode`
//! - **`finance`**: COCOMO, function points, ROI, NPV, IRR, payback period
//! - **`estimation`**: Delphi/PERT, Monte Carlo risk simulation, similarity
//!   regression, sensitivity analysis
//! - **`decision`**: Expected value, risk profiles, best-path selection
//! - **`scheduler`**: Greedy resource-constrained scheduling, leveling,
//!   scenario comparison, utilization KPIs
//! - **`validation`**: Input integrity checks run before the engine
//! - **`advisory`**: Injected second-opinion collaborator for decisions
//! - **`engine`**: `ProjectEngine`, the orchestration surface
//!
//! # Logging
//!
//! The crate emits `tracing` events and never installs a subscriber.
//!
//! # References
//!
//! - Boehm (1981), "Software Engineering Economics"
//! - Clemen & Reilly (2013), "Making Hard Decisions"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod advisory;
pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod estimation;
pub mod finance;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::EngineConfig;
pub use engine::{AdvisedDecision, ProjectEngine};
pub use error::{EngineError, EngineResult};
