//! Estimation methods.
//!
//! - **`delphi`**: PERT three-point estimates combined across experts
//! - **`regression`**: nearest-neighbour scaling over historical projects
//! - **`monte_carlo`**: multiplicative risk simulation with percentiles
//! - **`sensitivity`**: one-at-a-time sweep of the simulation risk factors
//!
//! All estimators are pure; the simulators take the random source as an
//! argument or a seed.

mod delphi;
mod monte_carlo;
mod regression;
mod sensitivity;

pub use delphi::{delphi_estimate, DelphiResult, ExpertPert};
pub use monte_carlo::{simulate, simulate_seeded, RiskFactors, SimulationResult};
pub use regression::{regression_estimate, similarity, RegressionEstimate};
pub use sensitivity::{sensitivity_analysis, FactorSensitivity, RiskFactorKind, SensitivityReport};
