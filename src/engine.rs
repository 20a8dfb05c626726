//! ProjectEngine: the orchestration surface the host layer calls.
//!
//! Every method takes plain structures and returns a result structure.
//! The engine holds only its configuration, so one instance can serve any
//! number of concurrent callers. `*_checked` variants run the
//! [`validation`](crate::validation) checks first and return
//! [`EngineError::Validation`] instead of computing on malformed input.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::advisory::{AdvisoryClient, AdvisoryResponse, AdvisorySummary};
use crate::config::EngineConfig;
use crate::decision::{analyze_tree, DecisionAnalysis};
use crate::error::{AdvisoryError, EngineError, EngineResult};
use crate::estimation::{
    delphi_estimate, regression_estimate, sensitivity_analysis, simulate, simulate_seeded,
    DelphiResult, RegressionEstimate, RiskFactors, SensitivityReport, SimulationResult,
};
use crate::finance::{
    analyze_investment, cocomo, function_points, CocomoEstimate, CocomoMode, FunctionCounts,
    FunctionPointEstimate, InvestmentMetrics,
};
use crate::models::{
    DecisionNode, ExpertEstimate, HistoricalProject, Project, ProjectProfile, Resource,
    ScheduleResult, Task,
};
use crate::scheduler::{
    analyze_scenarios, level_resources, LevelingReport, ResourceScheduler, Scenario,
    ScenarioComparison, ScheduleKpi, ScheduleRequest,
};
use crate::validation::{
    validate_decision_tree, validate_estimates, validate_history, validate_scenarios,
    validate_schedule_input,
};

/// A decision analysis with the advisor's opinion attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisedDecision {
    /// The engine's own analysis.
    pub analysis: DecisionAnalysis,
    /// The advisor's recommendation, when it answered.
    pub advisory: Option<AdvisoryResponse>,
    /// Why the advisor did not answer.
    pub advisory_error: Option<String>,
}

/// The project economics and scheduling engine.
///
/// # Example
///
/// ```
/// use u_project::ProjectEngine;
/// use u_project::finance::CocomoMode;
///
/// let engine = ProjectEngine::new();
/// let estimate = engine.cocomo_estimate(10_000.0, CocomoMode::Organic);
/// assert!((estimate.effort - 26.93).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProjectEngine {
    config: EngineConfig,
}

impl ProjectEngine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine from a validated configuration.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Creates an engine from a JSON configuration document.
    pub fn from_json_config(json: &str) -> EngineResult<Self> {
        let config = EngineConfig::from_json_str(json)?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ---- Financial math ----

    /// Basic COCOMO estimate at the configured labor rates.
    pub fn cocomo_estimate(&self, lines_of_code: f64, mode: CocomoMode) -> CocomoEstimate {
        let estimate = cocomo(lines_of_code, mode, &self.config.labor);
        debug!(lines_of_code, ?mode, effort = estimate.effort, "cocomo estimate");
        estimate
    }

    /// Function point estimate at the configured labor rates.
    pub fn function_point_estimate(
        &self,
        counts: &FunctionCounts,
        complexity_factor: f64,
    ) -> FunctionPointEstimate {
        function_points(counts, complexity_factor, &self.config.labor)
    }

    /// ROI, NPV, IRR and payback for one cash-flow stream.
    pub fn investment_analysis(
        &self,
        cash_flows: &[f64],
        discount_rate: f64,
        initial_investment: f64,
    ) -> InvestmentMetrics {
        let metrics = analyze_investment(
            cash_flows,
            discount_rate,
            initial_investment,
            self.config.irr_max_iterations,
        );
        debug!(
            periods = cash_flows.len(),
            npv = metrics.npv,
            irr = metrics.irr,
            converged = metrics.irr_converged,
            "investment analysis"
        );
        metrics
    }

    // ---- Estimation ----

    /// Combines expert three-point estimates.
    pub fn delphi_estimate(&self, estimates: &[ExpertEstimate]) -> DelphiResult {
        let result = delphi_estimate(estimates);
        info!(
            experts = estimates.len(),
            estimate = result.final_estimate,
            consensus = result.consensus,
            "delphi estimate"
        );
        result
    }

    /// Validates then combines expert estimates.
    pub fn delphi_estimate_checked(
        &self,
        estimates: &[ExpertEstimate],
    ) -> EngineResult<DelphiResult> {
        validate_estimates(estimates)?;
        Ok(self.delphi_estimate(estimates))
    }

    /// Estimates from the most similar historical project.
    pub fn regression_estimate(
        &self,
        profile: &ProjectProfile,
        history: &[HistoricalProject],
    ) -> RegressionEstimate {
        let estimate = regression_estimate(profile, history);
        info!(
            history = history.len(),
            cost = estimate.estimated_cost,
            confidence = estimate.confidence,
            "regression estimate"
        );
        estimate
    }

    /// Validates the history then estimates.
    pub fn regression_estimate_checked(
        &self,
        profile: &ProjectProfile,
        history: &[HistoricalProject],
    ) -> EngineResult<RegressionEstimate> {
        validate_history(history)?;
        Ok(self.regression_estimate(profile, history))
    }

    /// Estimates a stored project against stored records.
    ///
    /// Records without actuals are not history and are skipped, as is the
    /// project itself.
    pub fn estimate_project(&self, project: &Project, records: &[Project]) -> RegressionEstimate {
        let history: Vec<HistoricalProject> = records
            .iter()
            .filter(|r| r.id != project.id)
            .filter_map(Project::to_historical)
            .collect();
        debug!(
            project = %project.id,
            records = records.len(),
            usable = history.len(),
            "collected history"
        );
        self.regression_estimate(&project.profile(), &history)
    }

    /// Monte Carlo risk simulation with the thread-local RNG.
    ///
    /// `iterations` falls back to the configured sample count.
    pub fn risk_simulation(
        &self,
        base_value: f64,
        risks: &RiskFactors,
        iterations: Option<usize>,
    ) -> SimulationResult {
        let iterations = iterations.unwrap_or(self.config.monte_carlo_iterations);
        simulate(base_value, risks, iterations, &mut rand::rng())
    }

    /// Reproducible Monte Carlo risk simulation.
    pub fn risk_simulation_seeded(
        &self,
        base_value: f64,
        risks: &RiskFactors,
        iterations: Option<usize>,
        seed: u64,
    ) -> SimulationResult {
        let iterations = iterations.unwrap_or(self.config.monte_carlo_iterations);
        simulate_seeded(base_value, risks, iterations, seed)
    }

    /// One-at-a-time sensitivity of the simulated cost to each risk factor.
    pub fn sensitivity(
        &self,
        base_value: f64,
        risks: &RiskFactors,
        seed: u64,
    ) -> SensitivityReport {
        sensitivity_analysis(base_value, risks, self.config.monte_carlo_iterations, seed)
    }

    // ---- Decision analysis ----

    /// Evaluates a decision tree with the configured tie threshold.
    pub fn analyze_decision_tree(&self, root: &DecisionNode) -> DecisionAnalysis {
        let analysis = analyze_tree(root, self.config.tie_break_threshold);
        info!(
            nodes = root.node_count(),
            expected_value = analysis.expected_value,
            recommended = analysis.recommended_option.as_deref().unwrap_or("-"),
            tie_break = analysis.tie_break_applied,
            "decision analysis"
        );
        analysis
    }

    /// Validates then evaluates a decision tree.
    pub fn analyze_decision_tree_checked(
        &self,
        root: &DecisionNode,
    ) -> EngineResult<DecisionAnalysis> {
        validate_decision_tree(root)?;
        Ok(self.analyze_decision_tree(root))
    }

    /// Evaluates a decision tree and asks an advisor for a second opinion.
    ///
    /// Advisor failures are logged and reported in `advisory_error`; the
    /// analysis itself is always returned.
    pub fn advise_decision(
        &self,
        root: &DecisionNode,
        client: &dyn AdvisoryClient,
    ) -> AdvisedDecision {
        let analysis = self.analyze_decision_tree(root);
        let summary = AdvisorySummary::from_analysis(&analysis);

        let reply = if summary.is_empty() {
            Err(AdvisoryError::EmptyPayload)
        } else {
            client.recommend(&summary)
        };

        let (advisory, advisory_error) = match reply {
            Ok(response) => {
                debug!(best = %response.best_solution, "advisor responded");
                (Some(response), None)
            }
            Err(e) => {
                warn!(error = %e, "advisory unavailable; using engine analysis only");
                (None, Some(e.to_string()))
            }
        };

        AdvisedDecision {
            analysis,
            advisory,
            advisory_error,
        }
    }

    // ---- Scheduling ----

    fn scheduler(&self) -> ResourceScheduler {
        ResourceScheduler::new().with_default_horizon(self.config.default_horizon)
    }

    /// Schedules a request.
    pub fn schedule(&self, request: &ScheduleRequest) -> ScheduleResult {
        self.scheduler().schedule_request(request)
    }

    /// Validates then schedules a request.
    pub fn schedule_checked(&self, request: &ScheduleRequest) -> EngineResult<ScheduleResult> {
        validate_schedule_input(&request.tasks, &request.resources)?;
        Ok(self.schedule(request))
    }

    /// Checks a schedule against resource capacity.
    pub fn level_resources(
        &self,
        result: &ScheduleResult,
        resources: &[Resource],
    ) -> LevelingReport {
        level_resources(result, resources)
    }

    /// Runs what-if scenarios against a request.
    pub fn analyze_scenarios(
        &self,
        request: &ScheduleRequest,
        scenarios: &[Scenario],
    ) -> ScenarioComparison {
        analyze_scenarios(&self.scheduler(), request, scenarios)
    }

    /// Validates the request and the scenarios, then runs them.
    pub fn analyze_scenarios_checked(
        &self,
        request: &ScheduleRequest,
        scenarios: &[Scenario],
    ) -> EngineResult<ScenarioComparison> {
        validate_schedule_input(&request.tasks, &request.resources)?;
        validate_scenarios(scenarios)?;
        Ok(self.analyze_scenarios(request, scenarios))
    }

    /// Utilization metrics of a schedule.
    pub fn schedule_kpi(
        &self,
        result: &ScheduleResult,
        tasks: &[Task],
        resources: &[Resource],
    ) -> ScheduleKpi {
        ScheduleKpi::calculate(result, tasks, resources)
    }

    /// Serializes any engine result for the host layer.
    pub fn to_json<T: Serialize>(&self, value: &T) -> EngineResult<String> {
        serde_json::to_string(value).map_err(EngineError::from)
    }
}
