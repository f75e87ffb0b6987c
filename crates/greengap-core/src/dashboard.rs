//! Frontend-ready dashboard shape

use serde::{Deserialize, Serialize};

use crate::models::{AnalysisReport, BehaviorResult, GraphData, ReboundLevel, ScenarioResult};

/// Headline metrics shown as cards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryCards {
    pub sustainability_index: f64,
    pub co2_saved: f64,
    pub efficiency_score: f64,
    pub behavior_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub summary_cards: SummaryCards,
    /// Present when the report was produced with graph data
    pub emissions_chart: Option<GraphData>,
    pub behavior_insights: BehaviorResult,
    pub recommendations: Vec<String>,
    pub corrected_projection: f64,
    pub rebound_level: ReboundLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<ScenarioResult>,
}

/// Repackage a report; no values are recomputed
pub fn format_dashboard(report: &AnalysisReport) -> Dashboard {
    Dashboard {
        summary_cards: SummaryCards {
            sustainability_index: report.metrics.sustainability_index,
            co2_saved: report.metrics.co2_saved,
            efficiency_score: report.metrics.efficiency_score,
            behavior_score: report.metrics.behavior_score,
        },
        emissions_chart: report.rebound.graph_data.clone(),
        behavior_insights: report.behavior,
        recommendations: report.recommendations.recommendations.clone(),
        corrected_projection: report.recommendations.corrected_emission_projection,
        rebound_level: report.rebound.rebound_level,
        scenario: report.scenario.clone(),
    }
}

impl From<&AnalysisReport> for Dashboard {
    fn from(report: &AnalysisReport) -> Self {
        format_dashboard(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeriesSet;
    use crate::pipeline::Pipeline;

    fn report() -> AnalysisReport {
        let series = SeriesSet::new(vec![100.0, 100.0], vec![70.0, 70.0], vec![85.0, 85.0])
            .unwrap()
            .with_labels(vec!["2024-01-01".into(), "2024-01-02".into()])
            .unwrap();
        Pipeline::default().run(&series)
    }

    #[test]
    fn test_dashboard_mirrors_report() {
        let report = report();
        let dashboard = format_dashboard(&report);

        assert_eq!(dashboard.summary_cards.behavior_score, 80);
        assert_eq!(dashboard.summary_cards.co2_saved, report.metrics.co2_saved);
        assert_eq!(dashboard.rebound_level, ReboundLevel::High);
        assert_eq!(
            dashboard.corrected_projection,
            report.recommendations.corrected_emission_projection
        );
        assert_eq!(
            dashboard.recommendations,
            report.recommendations.recommendations
        );
        assert_eq!(dashboard.scenario, report.scenario);

        let chart = dashboard.emissions_chart.unwrap();
        assert_eq!(chart.periods, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(chart.actual, vec![85.0, 85.0]);
    }

    #[test]
    fn test_dashboard_json_shape() {
        let json = serde_json::to_value(Dashboard::from(&report())).unwrap();

        assert_eq!(json["rebound_level"], "HIGH");
        assert_eq!(
            json["behavior_insights"]["behavior_reason"],
            "Reduced consumption behavior"
        );
        assert!(json["summary_cards"]["sustainability_index"].is_number());
        assert!(json["emissions_chart"]["baseline"].is_array());
    }
}
