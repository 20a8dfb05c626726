//! Project record as supplied by the persistence layer.

use serde::{Deserialize, Serialize};

use super::{HistoricalProject, ProjectProfile};

/// A stored project.
///
/// Open projects carry only their size profile; completed projects also
/// carry actuals and can serve as history for new estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Record identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Expected or delivered size.
    pub lines_of_code: f64,
    /// Team headcount.
    pub team_size: f64,
    /// Complexity rating in [1, 5].
    pub complexity: f64,
    /// Realized cost, once completed.
    #[serde(default)]
    pub actual_cost: Option<f64>,
    /// Realized duration, once completed.
    #[serde(default)]
    pub actual_duration: Option<f64>,
}

impl Project {
    /// Creates an open project.
    pub fn new(id: impl Into<String>, lines_of_code: f64, team_size: f64, complexity: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            lines_of_code,
            team_size,
            complexity,
            actual_cost: None,
            actual_duration: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Marks the project completed with the given actuals.
    pub fn completed(mut self, actual_cost: f64, actual_duration: f64) -> Self {
        self.actual_cost = Some(actual_cost);
        self.actual_duration = Some(actual_duration);
        self
    }

    /// Size profile used by the estimators.
    pub fn profile(&self) -> ProjectProfile {
        ProjectProfile::new(self.lines_of_code, self.team_size, self.complexity)
    }

    /// Historical record, if the project has actuals.
    pub fn to_historical(&self) -> Option<HistoricalProject> {
        match (self.actual_cost, self.actual_duration) {
            (Some(cost), Some(duration)) => Some(HistoricalProject::new(
                self.lines_of_code,
                self.team_size,
                self.complexity,
                cost,
                duration,
            )),
            _ => None,
        }
    }
}
