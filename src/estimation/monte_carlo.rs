//! Monte Carlo risk simulation.
//!
//! Each sample perturbs a base value by three independent multiplicative
//! risk factors:
//!
//! ```text
//! factor_k  = 1 + (U_k(0,1) − 0.5) · 2 · risk_k
//! simulated = base · factor_technical · factor_market · factor_organizational
//! ```
//!
//! A risk of 0 leaves the base untouched; a risk of 1 allows the factor to
//! swing anywhere in (0, 2).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::finance::{mean, percentile_sorted, std_dev};

/// Independent risk intensities, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskFactors {
    /// Technology and delivery risk.
    pub technical: f64,
    /// Demand and market risk.
    pub market: f64,
    /// Staffing and organizational risk.
    pub organizational: f64,
}

impl RiskFactors {
    /// Creates a risk profile.
    pub fn new(technical: f64, market: f64, organizational: f64) -> Self {
        Self {
            technical,
            market,
            organizational,
        }
    }

    /// Factors as an array in (technical, market, organizational) order.
    pub fn as_array(&self) -> [f64; 3] {
        [self.technical, self.market, self.organizational]
    }
}

/// Aggregate statistics of a simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Number of samples drawn.
    pub iterations: usize,
    /// Sample mean.
    pub mean: f64,
    /// Population standard deviation.
    pub standard_deviation: f64,
    /// 10th percentile.
    pub p10: f64,
    /// Median.
    pub p50: f64,
    /// 90th percentile.
    pub p90: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
}

/// Draws one simulated value.
#[inline]
fn sample<R: Rng + ?Sized>(base: f64, risks: &[f64; 3], rng: &mut R) -> f64 {
    risks.iter().fold(base, |acc, &risk| {
        let u: f64 = rng.random();
        acc * (1.0 + (u - 0.5) * 2.0 * risk)
    })
}

/// Runs the simulation with a caller-supplied random source.
///
/// Zero iterations yield all zeros.
pub fn simulate<R: Rng + ?Sized>(
    base_value: f64,
    risks: &RiskFactors,
    iterations: usize,
    rng: &mut R,
) -> SimulationResult {
    if iterations == 0 {
        return SimulationResult::default();
    }

    let factors = risks.as_array();
    let mut samples: Vec<f64> = (0..iterations)
        .map(|_| sample(base_value, &factors, rng))
        .collect();
    samples.sort_by(|a, b| a.total_cmp(b));

    SimulationResult {
        iterations,
        mean: mean(&samples),
        standard_deviation: std_dev(&samples),
        p10: percentile_sorted(&samples, 0.1),
        p50: percentile_sorted(&samples, 0.5),
        p90: percentile_sorted(&samples, 0.9),
        min: samples[0],
        max: samples[iterations - 1],
    }
}

/// Runs the simulation with a deterministic seed.
///
/// # Example
/// ```
/// use u_project::estimation::{simulate_seeded, RiskFactors};
///
/// let a = simulate_seeded(1000.0, &RiskFactors::new(0.2, 0.1, 0.3), 500, 42);
/// let b = simulate_seeded(1000.0, &RiskFactors::new(0.2, 0.1, 0.3), 500, 42);
/// assert_eq!(a, b);
/// assert!(a.p10 <= a.p50 && a.p50 <= a.p90);
/// ```
pub fn simulate_seeded(
    base_value: f64,
    risks: &RiskFactors,
    iterations: usize,
    seed: u64,
) -> SimulationResult {
    let mut rng = StdRng::seed_from_u64(seed);
    simulate(base_value, risks, iterations, &mut rng)
}
