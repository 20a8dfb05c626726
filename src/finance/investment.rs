//! Investment metrics: ROI, NPV, IRR, payback period.
//!
//! Cash flows are per period; flow `t` (0-indexed) is received at the end
//! of period `t + 1` and discounted accordingly.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// NPV magnitude under which the IRR iteration counts as converged.
const IRR_TOLERANCE: f64 = 0.01;
/// IRR starting guess.
const IRR_INITIAL_RATE: f64 = 0.1;

/// Return on investment in percent: `(gain − cost) / cost × 100`.
///
/// Returns 0.0 when `cost` is zero.
pub fn roi(gain: f64, cost: f64) -> f64 {
    if cost == 0.0 {
        return 0.0;
    }
    (gain - cost) / cost * 100.0
}

/// Net present value: `−initial + Σ cf_t / (1 + rate)^(t+1)`.
pub fn npv(cash_flows: &[f64], discount_rate: f64, initial_investment: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .fold(-initial_investment, |acc, (t, cf)| {
            acc + cf / (1.0 + discount_rate).powi(t as i32 + 1)
        })
}

/// Derivative of [`npv`] with respect to the rate.
fn npv_derivative(cash_flows: &[f64], rate: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, cf)| {
            let n = t as i32 + 1;
            -(n as f64) * cf / (1.0 + rate).powi(n + 1)
        })
        .sum()
}

/// Result of an IRR search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrResult {
    /// Rate in percent (last iterate when not converged).
    pub rate: f64,
    /// Whether `|NPV(rate)| < 0.01` was reached.
    pub converged: bool,
    /// Newton-Raphson steps taken.
    pub iterations: usize,
}

/// Internal rate of return via Newton-Raphson.
///
/// Starts at 10% and stops as soon as `|NPV| < 0.01` or the derivative
/// vanishes. When the iteration cap is hit or the derivative is zero first,
/// the last iterate is returned with `converged = false`.
///
/// # Example
/// ```
/// use u_project::finance::{irr, npv};
///
/// let flows = [300.0, 400.0, 500.0];
/// let result = irr(&flows, 1000.0, 100);
/// assert!(result.converged);
/// assert!(npv(&flows, result.rate / 100.0, 1000.0).abs() < 1.0);
/// ```
pub fn irr(cash_flows: &[f64], initial_investment: f64, max_iterations: usize) -> IrrResult {
    let mut rate = IRR_INITIAL_RATE;

    for iteration in 0..max_iterations {
        let value = npv(cash_flows, rate, initial_investment);
        if value.abs() < IRR_TOLERANCE {
            return IrrResult {
                rate: rate * 100.0,
                converged: true,
                iterations: iteration,
            };
        }

        let slope = npv_derivative(cash_flows, rate);
        if slope == 0.0 || !slope.is_finite() {
            warn!(iteration, rate, "IRR derivative vanished; returning last iterate");
            return IrrResult {
                rate: rate * 100.0,
                converged: false,
                iterations: iteration,
            };
        }

        rate -= value / slope;
    }

    let converged = npv(cash_flows, rate, initial_investment).abs() < IRR_TOLERANCE;
    if !converged {
        warn!(max_iterations, rate, "IRR did not converge");
    }
    IrrResult {
        rate: rate * 100.0,
        converged,
        iterations: max_iterations,
    }
}

/// Periods until cumulative cash flow recovers the investment.
///
/// The crossing period is linearly interpolated. Returns
/// `cash_flows.len()` if the investment is never recovered.
pub fn payback_period(cash_flows: &[f64], initial_investment: f64) -> f64 {
    let mut cumulative = -initial_investment;
    if cumulative >= 0.0 {
        return 0.0;
    }

    for (t, &cf) in cash_flows.iter().enumerate() {
        let before = cumulative;
        cumulative += cf;
        if cumulative >= 0.0 {
            let fraction = if cf != 0.0 { -before / cf } else { 0.0 };
            return t as f64 + fraction;
        }
    }

    cash_flows.len() as f64
}

/// Investment metrics bundle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentMetrics {
    /// ROI in percent (total inflow vs. investment).
    pub roi: f64,
    /// NPV at the requested discount rate.
    pub npv: f64,
    /// IRR in percent.
    pub irr: f64,
    /// Whether the IRR search converged.
    pub irr_converged: bool,
    /// Payback period in periods.
    pub payback_period: f64,
}

/// Computes all investment metrics for one cash-flow stream.
pub fn analyze_investment(
    cash_flows: &[f64],
    discount_rate: f64,
    initial_investment: f64,
    irr_max_iterations: usize,
) -> InvestmentMetrics {
    let total_inflow: f64 = cash_flows.iter().sum();
    let irr_result = irr(cash_flows, initial_investment, irr_max_iterations);
    InvestmentMetrics {
        roi: roi(total_inflow, initial_investment),
        npv: npv(cash_flows, discount_rate, initial_investment),
        irr: irr_result.rate,
        irr_converged: irr_result.converged,
        payback_period: payback_period(cash_flows, initial_investment),
    }
}
