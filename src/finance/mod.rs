//! Financial math.
//!
//! Pure functions with no dependencies on the rest of the engine except
//! the labor-rate configuration.
//!
//! - **Cost models**: Basic COCOMO, Function Point Analysis
//! - **Investment metrics**: ROI, NPV, IRR (Newton-Raphson), payback period
//! - **Statistics**: mean, standard deviation, percentiles, Pearson correlation
//!
//! # References
//!
//! - Boehm (1981), "Software Engineering Economics"
//! - Brealey, Myers & Allen (2020), "Principles of Corporate Finance", Ch. 2, 5

mod cost_model;
mod investment;
mod stats;

pub use cost_model::{
    cocomo, function_points, CocomoEstimate, CocomoMode, FunctionCounts, FunctionPointEstimate,
};
pub use investment::{
    analyze_investment, irr, npv, payback_period, roi, InvestmentMetrics, IrrResult,
};
pub use stats::{correlation, mean, percentile_sorted, std_dev};
