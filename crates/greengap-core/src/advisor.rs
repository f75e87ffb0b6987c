//! Recommendation advisors
//!
//! An advisor augments the rule-based recommendations of the core pipeline
//! with context-aware guidance. Advisors are collaborators: when one fails,
//! the numeric report is still returned and a static fallback list is used.
//!
//! # Architecture
//!
//! - `Advisor` trait: async interface so remote advisors can be plugged in
//! - `KnowledgeBaseAdvisor`: built-in rules over the categorized knowledge base
//! - `augment_report`: merges advisor output into a report, never failing

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AdvisorKind;
use crate::error::Result;
use crate::knowledge::relevant_entries;
use crate::models::{AnalysisReport, ReboundLevel};

/// Upper bound on recommendations in an augmented report
pub const MAX_RECOMMENDATIONS: usize = 4;

/// Used when an advisor is configured but fails
pub const FALLBACK_RECOMMENDATIONS: [&str; 2] = [
    "Monitor consumption patterns weekly and adjust automation settings accordingly",
    "Review energy usage dashboard daily to identify optimization opportunities",
];

/// Metrics an advisor sees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdvisorInput {
    pub rebound_level: ReboundLevel,
    pub efficiency_score: f64,
    pub behavior_score: f64,
    pub sustainability_index: f64,
}

impl AdvisorInput {
    pub fn from_report(report: &AnalysisReport) -> Self {
        Self {
            rebound_level: report.rebound.rebound_level,
            efficiency_score: report.metrics.efficiency_score,
            behavior_score: f64::from(report.metrics.behavior_score),
            sustainability_index: report.metrics.sustainability_index,
        }
    }
}

/// Trait for recommendation advisors
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Produce recommendations for the given metrics
    async fn advise(&self, input: &AdvisorInput) -> Result<Vec<String>>;
}

/// Rule-based advisor backed by the built-in knowledge base
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBaseAdvisor;

impl KnowledgeBaseAdvisor {
    pub fn new() -> Self {
        Self
    }

    /// Level-specific guidance, then up to two knowledge-base actions,
    /// padded to at least two entries and capped at four distinct ones
    pub fn recommend(&self, input: &AdvisorInput) -> Vec<String> {
        let efficiency = input.efficiency_score;
        let behavior = input.behavior_score;
        let sustainability = input.sustainability_index;

        let mut recs = Vec::new();

        match input.rebound_level {
            ReboundLevel::High => {
                recs.push(format!(
                    "Critical: Implement automated usage controls immediately - your {:.1}% efficiency is being offset by increased consumption",
                    efficiency
                ));
                recs.push(
                    "Set strict usage schedules with 25% reduction targets for high-consumption devices to prevent further rebound".to_string(),
                );
                if efficiency < 60.0 {
                    recs.push(
                        "Review all appliance settings for optimization opportunities and enable eco-modes across all devices".to_string(),
                    );
                }
            }
            ReboundLevel::Medium => {
                recs.push(format!(
                    "Monitor weekly consumption patterns closely - current {:.1}% efficiency shows potential for improvement",
                    efficiency
                ));
                recs.push(
                    "Enable smart timers to prevent extended usage of energy-efficient appliances during peak hours".to_string(),
                );
                if behavior < 75.0 {
                    recs.push(format!(
                        "Improve behavior score from {:.0}% by tracking daily energy habits and setting device-off reminders",
                        behavior
                    ));
                }
            }
            ReboundLevel::Low => {
                recs.push(format!(
                    "Excellent progress! Maintain current efficient practices - your {:.1} sustainability index is strong",
                    sustainability
                ));
                recs.push(
                    "Explore renewable energy options like solar panels or green energy providers to further reduce carbon footprint".to_string(),
                );
                if sustainability < 70.0 {
                    recs.push(
                        "Share your successful sustainability strategies with team members to maximize collective environmental impact".to_string(),
                    );
                }
            }
        }

        let knowledge = relevant_entries(input.rebound_level, behavior);
        recs.extend(knowledge.iter().take(2).filter_map(|entry| entry.action()));

        if recs.len() < 2 {
            recs.extend(FALLBACK_RECOMMENDATIONS.iter().map(|s| s.to_string()));
        }

        dedup_in_order(&mut recs);
        recs.truncate(MAX_RECOMMENDATIONS);
        recs
    }
}

#[async_trait]
impl Advisor for KnowledgeBaseAdvisor {
    fn name(&self) -> &'static str {
        "knowledge_base"
    }

    async fn advise(&self, input: &AdvisorInput) -> Result<Vec<String>> {
        Ok(self.recommend(input))
    }
}

/// Build the advisor for a configured kind
pub fn advisor_for(kind: AdvisorKind) -> Option<Box<dyn Advisor>> {
    match kind {
        AdvisorKind::KnowledgeBase => Some(Box::new(KnowledgeBaseAdvisor::new())),
        AdvisorKind::None => None,
    }
}

/// Merge advisor recommendations after the core ones.
///
/// On advisor failure the fallback list is merged instead. The report's
/// numeric content is never touched.
pub async fn augment_report(advisor: &dyn Advisor, report: &mut AnalysisReport) {
    let input = AdvisorInput::from_report(report);

    let extra = match advisor.advise(&input).await {
        Ok(recs) => {
            debug!(
                advisor = advisor.name(),
                count = recs.len(),
                "Advisor recommendations received"
            );
            recs
        }
        Err(e) => {
            warn!(
                advisor = advisor.name(),
                error = %e,
                "Advisor failed, using fallback recommendations"
            );
            FALLBACK_RECOMMENDATIONS
                .iter()
                .map(|s| s.to_string())
                .collect()
        }
    };

    let recs = &mut report.recommendations.recommendations;
    recs.extend(extra);
    dedup_in_order(recs);
    recs.truncate(MAX_RECOMMENDATIONS);
}

fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|s| seen.insert(s.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::{
        BehaviorReason, BehaviorResult, MetricsResult, ReboundResult, RecommendationResult,
    };

    struct FailingAdvisor;

    #[async_trait]
    impl Advisor for FailingAdvisor {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn advise(&self, _input: &AdvisorInput) -> Result<Vec<String>> {
            Err(Error::Advisor("upstream unavailable".into()))
        }
    }

    fn input(level: ReboundLevel, efficiency: f64, behavior: f64, index: f64) -> AdvisorInput {
        AdvisorInput {
            rebound_level: level,
            efficiency_score: efficiency,
            behavior_score: behavior,
            sustainability_index: index,
        }
    }

    fn report(core: Vec<&str>) -> AnalysisReport {
        AnalysisReport {
            rebound: ReboundResult {
                baseline_avg: 100.0,
                expected_avg: 70.0,
                actual_avg: 85.0,
                rebound_index: 0.5,
                rebound_level: ReboundLevel::High,
                lost_climate_benefit: 15.0,
                graph_data: None,
            },
            behavior: BehaviorResult {
                usage_change: -15.0,
                behavior_reason: BehaviorReason::ReducedConsumption,
            },
            metrics: MetricsResult {
                co2_saved: 15.0,
                efficiency_score: 50.0,
                behavior_score: 80,
                sustainability_index: 62.0,
            },
            recommendations: RecommendationResult {
                recommendations: core.into_iter().map(String::from).collect(),
                corrected_emission_projection: 77.5,
            },
            scenario: None,
        }
    }

    #[test]
    fn test_high_level_recommendations() {
        let recs =
            KnowledgeBaseAdvisor::new().recommend(&input(ReboundLevel::High, 50.0, 80.0, 62.0));
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
        assert!(recs[0].starts_with("Critical: Implement automated usage controls"));
        assert!(recs[0].contains("50.0% efficiency"));
        assert!(recs[2].starts_with("Review all appliance settings"));
        // First knowledge entry has no extractable action, second does
        assert!(recs[3].starts_with("Implement automated usage schedules"));
    }

    #[test]
    fn test_medium_level_low_behavior() {
        let recs =
            KnowledgeBaseAdvisor::new().recommend(&input(ReboundLevel::Medium, 70.0, 40.0, 58.0));
        assert!(recs[0].contains("70.0% efficiency"));
        assert!(recs[2].contains("from 40%"));
        assert!(recs.len() <= MAX_RECOMMENDATIONS);
    }

    #[test]
    fn test_low_level_is_distinct() {
        let recs =
            KnowledgeBaseAdvisor::new().recommend(&input(ReboundLevel::Low, 95.0, 80.0, 89.0));
        assert!(recs[0].contains("89.0 sustainability index"));
        let unique: std::collections::HashSet<_> = recs.iter().collect();
        assert_eq!(unique.len(), recs.len());
        assert!(recs.len() >= 2);
    }

    #[test]
    fn test_advisor_for_kind() {
        assert!(advisor_for(AdvisorKind::None).is_none());
        assert_eq!(
            advisor_for(AdvisorKind::KnowledgeBase).unwrap().name(),
            "knowledge_base"
        );
    }

    #[tokio::test]
    async fn test_augment_keeps_core_first() {
        let mut r = report(vec!["core recommendation"]);
        augment_report(&KnowledgeBaseAdvisor::new(), &mut r).await;

        let recs = &r.recommendations.recommendations;
        assert_eq!(recs[0], "core recommendation");
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
        assert_eq!(r.metrics.sustainability_index, 62.0);
    }

    #[tokio::test]
    async fn test_augment_falls_back_on_failure() {
        let mut r = report(vec!["core recommendation"]);
        augment_report(&FailingAdvisor, &mut r).await;

        assert_eq!(
            r.recommendations.recommendations,
            vec![
                "core recommendation",
                FALLBACK_RECOMMENDATIONS[0],
                FALLBACK_RECOMMENDATIONS[1]
            ]
        );
        assert_eq!(r.recommendations.corrected_emission_projection, 77.5);
    }

    #[tokio::test]
    async fn test_augment_deduplicates() {
        let mut r = report(vec![FALLBACK_RECOMMENDATIONS[0]]);
        augment_report(&FailingAdvisor, &mut r).await;
        assert_eq!(r.recommendations.recommendations.len(), 2);
    }
}
