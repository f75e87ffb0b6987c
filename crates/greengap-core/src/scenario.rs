//! What-if scenario: project a further reduction of the actual average

use crate::models::{ReboundResult, ScenarioResult};
use crate::stats;

/// Default what-if reduction (10%)
pub const DEFAULT_REDUCTION_FACTOR: f64 = 0.1;

/// Project `actual_avg * (1 - reduction_factor)` and estimate the gain
/// relative to baseline. The sustainability estimate is capped at 100 but
/// not floored, so a negative factor yields a negative estimate.
pub fn simulate_scenario(rebound: &ReboundResult, reduction_factor: f64) -> ScenarioResult {
    let projected_emission = rebound.actual_avg * (1.0 - reduction_factor);
    let improvement = rebound.actual_avg - projected_emission;
    let improvement_ratio = stats::guarded_div(improvement, rebound.baseline_avg);

    ScenarioResult {
        projected_emission,
        improvement,
        simulated_sustainability: (improvement_ratio * 100.0).min(100.0),
    }
}
