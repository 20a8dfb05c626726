//! Engine configuration.
//!
//! Every field has a default, so a partial JSON document (or `{}`) is a
//! valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default values.
pub mod defaults {
    /// Working hours in a person-month.
    pub const HOURS_PER_MONTH: f64 = 152.0;
    /// Blended labor rate per hour.
    pub const HOURLY_RATE: f64 = 75.0;
    /// Effort hours per function point.
    pub const HOURS_PER_FUNCTION_POINT: f64 = 7.0;
    /// Monte Carlo sample count.
    pub const MONTE_CARLO_ITERATIONS: usize = 10_000;
    /// Relative EV gap below which two options count as tied.
    pub const TIE_BREAK_THRESHOLD: f64 = 0.05;
    /// Minimum scheduling horizon in periods.
    pub const DEFAULT_HORIZON: u32 = 100;
    /// Newton-Raphson iteration cap for IRR.
    pub const IRR_MAX_ITERATIONS: usize = 100;
}

/// Labor rates used by the parametric cost models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LaborRates {
    /// Working hours in a person-month.
    pub hours_per_month: f64,
    /// Cost per hour.
    pub hourly_rate: f64,
    /// Effort hours per function point.
    pub hours_per_function_point: f64,
}

impl Default for LaborRates {
    fn default() -> Self {
        Self {
            hours_per_month: defaults::HOURS_PER_MONTH,
            hourly_rate: defaults::HOURLY_RATE,
            hours_per_function_point: defaults::HOURS_PER_FUNCTION_POINT,
        }
    }
}

/// Engine-wide configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Labor rates for COCOMO and function points.
    pub labor: LaborRates,
    /// Monte Carlo sample count when a request does not specify one.
    pub monte_carlo_iterations: usize,
    /// Relative EV gap for the decision tie-break.
    pub tie_break_threshold: f64,
    /// Minimum horizon when a scheduling request does not give one.
    pub default_horizon: u32,
    /// Newton-Raphson iteration cap for IRR.
    pub irr_max_iterations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            labor: LaborRates::default(),
            monte_carlo_iterations: defaults::MONTE_CARLO_ITERATIONS,
            tie_break_threshold: defaults::TIE_BREAK_THRESHOLD,
            default_horizon: defaults::DEFAULT_HORIZON,
            irr_max_iterations: defaults::IRR_MAX_ITERATIONS,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("labor.hoursPerMonth", self.labor.hours_per_month),
            (
                "labor.hoursPerFunctionPoint",
                self.labor.hours_per_function_point,
            ),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    reason: format!("must be positive, got {value}"),
                });
            }
        }
        if !(self.labor.hourly_rate.is_finite() && self.labor.hourly_rate >= 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "labor.hourlyRate",
                reason: format!("must be non-negative, got {}", self.labor.hourly_rate),
            });
        }
        if !(0.0..1.0).contains(&self.tie_break_threshold) {
            return Err(ConfigError::OutOfRange {
                field: "tieBreakThreshold",
                reason: format!("must be in [0, 1), got {}", self.tie_break_threshold),
            });
        }
        if self.irr_max_iterations == 0 {
            return Err(ConfigError::OutOfRange {
                field: "irrMaxIterations",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
