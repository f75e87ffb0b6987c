//! End-to-end rebound analysis
//!
//! Runs detector, behavior analysis, metrics, recommendations and the
//! optional scenario over one validated series set. Every stage is a pure
//! function of its input, so a `Pipeline` can be shared freely.

use tracing::info;

use crate::behavior::analyze_behavior;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::impact::compute_expected;
use crate::metrics::calculate_metrics;
use crate::models::{AnalysisReport, ConsumptionSeries, SeriesSet};
use crate::rebound::detect_rebound;
use crate::recommend::generate_recommendations;
use crate::scenario::simulate_scenario;

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: AnalysisConfig,
}

impl Pipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a series set using the configured scenario factor
    pub fn run(&self, series: &SeriesSet) -> AnalysisReport {
        self.run_with_scenario(series, self.config.reduction_factor)
    }

    /// Analyze a series set with an explicit scenario factor (None skips it)
    pub fn run_with_scenario(
        &self,
        series: &SeriesSet,
        reduction_factor: Option<f64>,
    ) -> AnalysisReport {
        let rebound = detect_rebound(series);
        let behavior = analyze_behavior(series.baseline(), series.actual());
        let metrics = calculate_metrics(&rebound, &behavior);
        let recommendations = generate_recommendations(&rebound, &behavior);
        let scenario = reduction_factor.map(|f| simulate_scenario(&rebound, f));

        info!(
            periods = series.len(),
            rebound_index = rebound.rebound_index,
            level = %rebound.rebound_level,
            sustainability_index = metrics.sustainability_index,
            "Analysis complete"
        );

        AnalysisReport {
            rebound,
            behavior,
            metrics,
            recommendations,
            scenario,
        }
    }

    /// Derive `expected` from the baseline with the configured efficiency
    /// gain, then analyze
    pub fn analyze_baseline(
        &self,
        baseline: ConsumptionSeries,
        actual: ConsumptionSeries,
    ) -> Result<AnalysisReport> {
        let series = self.series_from_baseline(baseline, actual, self.config.efficiency_gain)?;
        Ok(self.run(&series))
    }

    /// Build a validated series set, deriving `expected` via the impact model
    pub fn series_from_baseline(
        &self,
        baseline: ConsumptionSeries,
        actual: ConsumptionSeries,
        efficiency_gain: f64,
    ) -> Result<SeriesSet> {
        let expected = compute_expected(&baseline, efficiency_gain)?;
        SeriesSet::new(baseline, expected, actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::{BehaviorReason, ReboundLevel};

    #[test]
    fn test_reference_scenario_end_to_end() {
        let pipeline = Pipeline::default();
        let report = pipeline
            .analyze_baseline(vec![100.0; 3].into(), vec![85.0; 3].into())
            .unwrap();

        assert!((report.rebound.expected_avg - 70.0).abs() < 1e-9);
        assert!((report.rebound.rebound_index - 0.5).abs() < 1e-9);
        assert_eq!(
            report.behavior.behavior_reason,
            BehaviorReason::ReducedConsumption
        );
        assert_eq!(report.metrics.co2_saved, 15.0);
        assert_eq!(report.metrics.behavior_score, 80);
        assert!((report.metrics.efficiency_score - 50.0).abs() < 1e-6);
        assert!((report.metrics.sustainability_index - 62.0).abs() < 1e-6);
        assert!(report.scenario.is_some());
    }

    #[test]
    fn test_exact_series_reference_level() {
        let series = SeriesSet::new(vec![100.0; 3], vec![70.0; 3], vec![85.0; 3]).unwrap();
        let report = Pipeline::default().run(&series);
        assert_eq!(report.rebound.rebound_level, ReboundLevel::High);
        assert_eq!(report.metrics.sustainability_index, 50.0 * 0.6 + 80.0 * 0.4);
    }

    #[test]
    fn test_scenario_skipped_when_disabled() {
        let series = SeriesSet::new(vec![10.0], vec![7.0], vec![8.0]).unwrap();
        let report = Pipeline::default().run_with_scenario(&series, None);
        assert!(report.scenario.is_none());
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = Pipeline::default()
            .analyze_baseline(vec![100.0; 3].into(), vec![85.0; 2].into())
            .unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { .. }));
    }
}
