//! Behavior analysis: did usage go up or down after adoption?

use crate::models::{BehaviorReason, BehaviorResult, ConsumptionSeries};

pub fn analyze_behavior(
    baseline: &ConsumptionSeries,
    actual: &ConsumptionSeries,
) -> BehaviorResult {
    let usage_change = actual.mean() - baseline.mean();

    BehaviorResult {
        usage_change,
        behavior_reason: BehaviorReason::from_usage_change(usage_change),
    }
}
