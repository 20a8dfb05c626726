//! Parametric cost models: Basic COCOMO and Function Point Analysis.
//!
//! # Reference
//! Boehm (1981), "Software Engineering Economics", Ch. 5-6
//! Albrecht (1979), "Measuring Application Development Productivity"

use serde::{Deserialize, Serialize};

use crate::config::LaborRates;

/// COCOMO project class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CocomoMode {
    /// Small teams, familiar problem, flexible requirements.
    #[default]
    Organic,
    /// Mixed experience, medium rigidity.
    Semidetached,
    /// Tight hardware/software/operational constraints.
    Embedded,
}

impl CocomoMode {
    /// Coefficients `(a, b, c, d)` of the basic model.
    pub fn coefficients(self) -> (f64, f64, f64, f64) {
        match self {
            CocomoMode::Organic => (2.4, 1.05, 2.5, 0.38),
            CocomoMode::Semidetached => (3.0, 1.12, 2.5, 0.35),
            CocomoMode::Embedded => (3.6, 1.20, 2.5, 0.32),
        }
    }
}

/// COCOMO estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CocomoEstimate {
    /// Effort in person-months.
    pub effort: f64,
    /// Schedule in months.
    pub duration: f64,
    /// Labor cost.
    pub cost: f64,
    /// Average staffing (`effort / duration`, 0 when duration is 0).
    pub team_size: f64,
}

/// Basic COCOMO.
///
/// `effort = a · KLOC^b`, `duration = c · effort^d`,
/// `cost = effort × hours_per_month × hourly_rate`.
///
/// # Example
/// ```
/// use u_project::config::LaborRates;
/// use u_project::finance::{cocomo, CocomoMode};
///
/// let est = cocomo(0.0, CocomoMode::Organic, &LaborRates::default());
/// assert_eq!(est.effort, 0.0);
/// assert_eq!(est.cost, 0.0);
/// ```
pub fn cocomo(lines_of_code: f64, mode: CocomoMode, labor: &LaborRates) -> CocomoEstimate {
    let (a, b, c, d) = mode.coefficients();
    let kloc = (lines_of_code / 1000.0).max(0.0);

    let effort = a * kloc.powf(b);
    let duration = c * effort.powf(d);
    let cost = effort * labor.hours_per_month * labor.hourly_rate;
    let team_size = if duration > 0.0 { effort / duration } else { 0.0 };

    CocomoEstimate {
        effort,
        duration,
        cost,
        team_size,
    }
}

/// Counted function types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FunctionCounts {
    /// External inputs.
    pub inputs: u32,
    /// External outputs.
    pub outputs: u32,
    /// External inquiries.
    pub inquiries: u32,
    /// Internal logical files.
    pub files: u32,
    /// External interface files.
    pub interfaces: u32,
}

/// Function point estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionPointEstimate {
    /// Adjusted function points.
    pub function_points: f64,
    /// Effort in hours.
    pub effort: f64,
    /// Labor cost.
    pub cost: f64,
}

impl FunctionCounts {
    /// Unadjusted weighted sum.
    pub fn weighted_sum(&self) -> f64 {
        4.0 * self.inputs as f64
            + 5.0 * self.outputs as f64
            + 4.0 * self.inquiries as f64
            + 10.0 * self.files as f64
            + 7.0 * self.interfaces as f64
    }
}

/// Function point analysis.
///
/// `function_points = weighted_sum × complexity_factor`,
/// `effort = function_points × hours_per_function_point`,
/// `cost = effort × hourly_rate`.
pub fn function_points(
    counts: &FunctionCounts,
    complexity_factor: f64,
    labor: &LaborRates,
) -> FunctionPointEstimate {
    let function_points = counts.weighted_sum() * complexity_factor;
    let effort = function_points * labor.hours_per_function_point;
    FunctionPointEstimate {
        function_points,
        effort,
        cost: effort * labor.hourly_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labor() -> LaborRates {
        LaborRates {
            hours_per_month: 152.0,
            hourly_rate: 100.0,
            hours_per_function_point: 7.0,
        }
    }

    #[test]
    fn test_cocomo_zero() {
        for mode in [
            CocomoMode::Organic,
            CocomoMode::Semidetached,
            CocomoMode::Embedded,
        ] {
            let est = cocomo(0.0, mode, &labor());
            assert_eq!(est.effort, 0.0);
            assert_eq!(est.duration, 0.0);
            assert_eq!(est.cost, 0.0);
            assert_eq!(est.team_size, 0.0);
        }
    }

    #[test]
    fn test_cocomo_organic_10kloc() {
        let est = cocomo(10_000.0, CocomoMode::Organic, &labor());
        let effort = 2.4 * 10f64.powf(1.05);
        assert!((est.effort - effort).abs() < 1e-9);
        assert!((est.duration - 2.5 * effort.powf(0.38)).abs() < 1e-9);
        assert!((est.cost - effort * 152.0 * 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_cocomo_monotonic() {
        let mut prev = cocomo(0.0, CocomoMode::Embedded, &labor());
        for loc in [1_000.0, 5_000.0, 20_000.0, 100_000.0, 500_000.0] {
            let est = cocomo(loc, CocomoMode::Embedded, &labor());
            assert!(est.effort > prev.effort);
            assert!(est.duration > prev.duration);
            assert!(est.cost > prev.cost);
            prev = est;
        }
    }

    #[test]
    fn test_cocomo_mode_ordering() {
        let organic = cocomo(50_000.0, CocomoMode::Organic, &labor());
        let embedded = cocomo(50_000.0, CocomoMode::Embedded, &labor());
        assert!(embedded.effort > organic.effort);
    }

    #[test]
    fn test_function_points() {
        let counts = FunctionCounts {
            inputs: 10,
            outputs: 5,
            inquiries: 3,
            files: 2,
            interfaces: 1,
        };
        // 40 + 25 + 12 + 20 + 7 = 104
        assert!((counts.weighted_sum() - 104.0).abs() < 1e-10);

        let est = function_points(&counts, 1.0, &labor());
        assert!((est.function_points - 104.0).abs() < 1e-10);
        assert!((est.effort - 728.0).abs() < 1e-10);
        assert!((est.cost - 72_800.0).abs() < 1e-10);

        let adjusted = function_points(&counts, 1.25, &labor());
        assert!((adjusted.function_points - 130.0).abs() < 1e-10);
    }

    #[test]
    fn test_mode_wire_name() {
        let mode: CocomoMode = serde_json::from_str(r#""semidetached""#).unwrap();
        assert_eq!(mode, CocomoMode::Semidetached);
    }
}
