//! Rule-based recommendations and corrected projection
//!
//! The message tiers here are a separate policy from the detector's
//! LOW/MEDIUM/HIGH levels. They share cut points today but are tested at
//! different boundaries (`> 0.5` / `> 0.2` here, `>= 0.5` / `>= 0.2` there).

use crate::models::{BehaviorReason, BehaviorResult, ReboundResult, RecommendationResult};

pub const HIGH_REBOUND_DURATION: &str =
    "High rebound detected: reduce usage duration after efficiency adoption.";
pub const HIGH_REBOUND_SCHEDULE: &str = "Set smart usage schedules to prevent overconsumption.";
pub const MODERATE_REBOUND: &str =
    "Moderate rebound: monitor usage patterns and avoid extended runtime.";
pub const GOOD_RETENTION: &str = "Good efficiency retention: maintain current usage behavior.";
pub const BEHAVIORAL_REBOUND: &str =
    "Behavioral rebound detected: efficiency gains may be encouraging overuse.";

/// Blend between expected and actual averages used for the corrected projection
pub const CORRECTION_BLEND: f64 = 0.5;

/// Message tier selected from the rebound index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationTier {
    /// index > 0.5
    High,
    /// 0.2 < index <= 0.5
    Moderate,
    /// index <= 0.2
    Retained,
}

impl RecommendationTier {
    pub fn classify(rebound_index: f64) -> Self {
        if rebound_index > 0.5 {
            RecommendationTier::High
        } else if rebound_index > 0.2 {
            RecommendationTier::Moderate
        } else {
            RecommendationTier::Retained
        }
    }

    fn messages(&self) -> &'static [&'static str] {
        match self {
            RecommendationTier::High => &[HIGH_REBOUND_DURATION, HIGH_REBOUND_SCHEDULE],
            RecommendationTier::Moderate => &[MODERATE_REBOUND],
            RecommendationTier::Retained => &[GOOD_RETENTION],
        }
    }
}

/// `expected_avg + (actual_avg - expected_avg) * 0.5`
pub fn corrected_projection(expected_avg: f64, actual_avg: f64) -> f64 {
    expected_avg + (actual_avg - expected_avg) * CORRECTION_BLEND
}

pub fn generate_recommendations(
    rebound: &ReboundResult,
    behavior: &BehaviorResult,
) -> RecommendationResult {
    let tier = RecommendationTier::classify(rebound.rebound_index);
    let mut recommendations: Vec<String> = tier.messages().iter().map(|m| m.to_string()).collect();

    if behavior.behavior_reason == BehaviorReason::IncreasedUsage {
        recommendations.push(BEHAVIORAL_REBOUND.to_string());
    }

    RecommendationResult {
        recommendations,
        corrected_emission_projection: corrected_projection(
            rebound.expected_avg,
            rebound.actual_avg,
        ),
    }
}
