//! Sustainability metrics derived from rebound and behavior results

use crate::models::{BehaviorReason, BehaviorResult, MetricsResult, ReboundResult};

/// Weight of the efficiency score in the sustainability index
pub const EFFICIENCY_WEIGHT: f64 = 0.6;
/// Weight of the behavior score in the sustainability index
pub const BEHAVIOR_WEIGHT: f64 = 0.4;

/// Categorical behavior score
pub fn behavior_score(reason: BehaviorReason) -> u8 {
    match reason {
        BehaviorReason::ReducedConsumption => 80,
        BehaviorReason::IncreasedUsage => 40,
        BehaviorReason::Stable => 60,
    }
}

/// `100 * (1 - rebound_index)`, floored at 0. There is deliberately no
/// upper cap: a negative rebound index scores above 100.
pub fn efficiency_score(rebound_index: f64) -> f64 {
    (100.0 * (1.0 - rebound_index)).max(0.0)
}

pub fn calculate_metrics(rebound: &ReboundResult, behavior: &BehaviorResult) -> MetricsResult {
    // Realized savings, so negative when consumption rose above baseline
    let co2_saved = rebound.baseline_avg - rebound.actual_avg;
    let efficiency_score = efficiency_score(rebound.rebound_index);
    let behavior_score = behavior_score(behavior.behavior_reason);
    let sustainability_index =
        efficiency_score * EFFICIENCY_WEIGHT + f64::from(behavior_score) * BEHAVIOR_WEIGHT;

    MetricsResult {
        co2_saved,
        efficiency_score,
        behavior_score,
        sustainability_index,
    }
}
