//! Decision tree evaluation.
//!
//! - **Expected value**: bottom-up over outcome, chance, and decision nodes
//! - **Risk profiles**: success/failure probability, average cost and value,
//!   ROI, worst case, and a Low/Medium/High classification per option
//! - **Best path**: top-down walk with a risk-adjusted tie-break between
//!   near-equal options
//!
//! # Usage
//!
//! ```
//! use u_project::decision::analyze_tree;
//! use u_project::models::DecisionNode;
//!
//! let tree = DecisionNode::decision("root", "Launch?")
//!     .with_child(DecisionNode::outcome("go", "Launch", 120.0).with_cost(20.0))
//!     .with_child(DecisionNode::outcome("wait", "Wait", 0.0));
//!
//! let analysis = analyze_tree(&tree, 0.05);
//! assert_eq!(analysis.expected_value, 100.0);
//! assert_eq!(analysis.recommended_option.as_deref(), Some("Launch"));
//! ```
//!
//! # Reference
//! Clemen & Reilly (2013), "Making Hard Decisions", Ch. 4

mod best_path;
mod evaluator;
mod risk;

pub use best_path::{analyze_tree, DecisionAnalysis, PathStep};
pub use evaluator::expected_value;
pub use risk::{OutcomeSummary, RiskLevel, RiskProfile};
