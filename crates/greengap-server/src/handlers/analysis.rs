//! Analysis handlers for simulated and caller-supplied series

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::{AppError, AppState, MAX_SIMULATION_DAYS};
use greengap_core::{
    augment_report, detect_rebound as run_detector, format_dashboard,
    impact::validate_fraction, rebound::detect_rebound_summary, simulate_scenario,
    AnalysisReport, Dashboard, ReboundResult, ScenarioResult, SeriesSet,
};

/// Query parameters for simulated-data endpoints
#[derive(Debug, Default, Deserialize)]
pub struct SimulationQuery {
    /// Number of periods (defaults to the configured simulation length)
    pub days: Option<usize>,
    /// Seed for reproducible data
    pub seed: Option<u64>,
    /// What-if reduction (defaults to the configured factor)
    pub reduction_factor: Option<f64>,
}

/// Series supplied in a request body
///
/// When `expected` is omitted it is derived from `baseline` with
/// `efficiency_gain` (or the configured default).
#[derive(Debug, Deserialize)]
pub struct SeriesInput {
    pub baseline: Vec<f64>,
    pub actual: Vec<f64>,
    #[serde(default)]
    pub expected: Option<Vec<f64>>,
    #[serde(default)]
    pub efficiency_gain: Option<f64>,
}

/// Request body for POST /api/analyze
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(flatten)]
    pub series: SeriesInput,
    #[serde(default)]
    pub reduction_factor: Option<f64>,
}

/// Request body for POST /api/scenario
#[derive(Debug, Deserialize)]
pub struct ScenarioRequest {
    #[serde(flatten)]
    pub series: SeriesInput,
    pub reduction_factor: f64,
}

/// GET /api/simulate - Generate a demo dataset
pub async fn simulate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SimulationQuery>,
) -> Result<Json<SeriesSet>, AppError> {
    Ok(Json(simulated_series(&state, &params)?))
}

/// GET /api/detect-rebound - Rebound detection over simulated data
pub async fn detect_rebound(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SimulationQuery>,
) -> Result<Json<ReboundResult>, AppError> {
    let series = simulated_series(&state, &params)?;
    Ok(Json(run_detector(&series)))
}

/// GET /api/analyze - Full analysis report over simulated data
pub async fn analyze_simulated(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SimulationQuery>,
) -> Result<Json<AnalysisReport>, AppError> {
    let report = simulated_report(&state, &params).await?;
    Ok(Json(report))
}

/// GET /api/dashboard - Dashboard for simulated data
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SimulationQuery>,
) -> Result<Json<Dashboard>, AppError> {
    let report = simulated_report(&state, &params).await?;
    Ok(Json(format_dashboard(&report)))
}

/// POST /api/analyze - Dashboard for caller-supplied series
pub async fn analyze_series(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<Dashboard>, AppError> {
    let series = series_from_input(&state, request.series)?;
    let reduction_factor = resolve_reduction_factor(&state, request.reduction_factor)?;

    let mut report = state.pipeline.run_with_scenario(&series, reduction_factor);
    advise(&state, &mut report).await;

    Ok(Json(format_dashboard(&report)))
}

/// POST /api/scenario - What-if projection for caller-supplied series
pub async fn scenario(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScenarioRequest>,
) -> Result<Json<ScenarioResult>, AppError> {
    let reduction_factor = validate_fraction("reduction_factor", request.reduction_factor)?;
    let series = series_from_input(&state, request.series)?;

    let rebound = detect_rebound_summary(&series);
    Ok(Json(simulate_scenario(&rebound, reduction_factor)))
}

/// Run the configured advisor over a report, if one is configured
pub(crate) async fn advise(state: &AppState, report: &mut AnalysisReport) {
    if let Some(advisor) = &state.advisor {
        augment_report(advisor.as_ref(), report).await;
    }
}

async fn simulated_report(
    state: &AppState,
    params: &SimulationQuery,
) -> Result<AnalysisReport, AppError> {
    let series = simulated_series(state, params)?;
    let reduction_factor = resolve_reduction_factor(state, params.reduction_factor)?;

    let mut report = state.pipeline.run_with_scenario(&series, reduction_factor);
    advise(state, &mut report).await;
    Ok(report)
}

fn simulated_series(state: &AppState, params: &SimulationQuery) -> Result<SeriesSet, AppError> {
    let days = params.days.unwrap_or(state.analysis().simulation.days);

    if days == 0 || days > MAX_SIMULATION_DAYS {
        return Err(AppError::bad_request(&format!(
            "days must be between 1 and {}",
            MAX_SIMULATION_DAYS
        )));
    }

    debug!(days, seed = ?params.seed, "Generating simulated series");

    let series = match params.seed {
        Some(seed) => state.simulator.generate_seeded(days, seed)?,
        None => state.simulator.generate(days)?,
    };
    Ok(series)
}

fn series_from_input(state: &AppState, input: SeriesInput) -> Result<SeriesSet, AppError> {
    let series = match input.expected {
        Some(expected) => SeriesSet::new(input.baseline, expected, input.actual)?,
        None => {
            let gain = input
                .efficiency_gain
                .unwrap_or(state.analysis().efficiency_gain);
            let gain = validate_fraction("efficiency_gain", gain)?;
            state
                .pipeline
                .series_from_baseline(input.baseline.into(), input.actual.into(), gain)?
        }
    };
    Ok(series)
}

fn resolve_reduction_factor(
    state: &AppState,
    requested: Option<f64>,
) -> Result<Option<f64>, AppError> {
    match requested {
        Some(factor) => Ok(Some(validate_fraction("reduction_factor", factor)?)),
        None => Ok(state.analysis().reduction_factor),
    }
}
