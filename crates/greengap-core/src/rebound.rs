//! Rebound detection
//!
//! Quantifies how much of the reduction promised by an efficiency
//! intervention was lost to real-world behavior:
//!
//! - `expected_reduction = baseline_avg - expected_avg`
//! - `actual_reduction = baseline_avg - actual_avg`
//! - `rebound_loss = expected_reduction - actual_reduction`
//! - `rebound_index = rebound_loss / expected_reduction` (0 when nothing was promised)

use tracing::debug;

use crate::models::{GraphData, ReboundLevel, ReboundResult, SeriesSet};
use crate::stats;

/// Intermediate reductions, exposed for diagnostics and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reductions {
    pub expected_reduction: f64,
    pub actual_reduction: f64,
    pub rebound_loss: f64,
}

impl Reductions {
    pub fn from_averages(baseline_avg: f64, expected_avg: f64, actual_avg: f64) -> Self {
        let expected_reduction = baseline_avg - expected_avg;
        let actual_reduction = baseline_avg - actual_avg;
        Self {
            expected_reduction,
            actual_reduction,
            rebound_loss: expected_reduction - actual_reduction,
        }
    }

    /// Fraction of the expected reduction lost to rebound. May be negative
    /// or exceed 1.
    pub fn rebound_index(&self) -> f64 {
        stats::guarded_div(self.rebound_loss, self.expected_reduction)
    }
}

/// Detect rebound over a validated series set, including chart data
pub fn detect_rebound(series: &SeriesSet) -> ReboundResult {
    let mut result = detect_rebound_summary(series);
    result.graph_data = Some(GraphData {
        periods: series.period_labels(),
        baseline: series.baseline().values().to_vec(),
        expected: series.expected().values().to_vec(),
        actual: series.actual().values().to_vec(),
    });
    result
}

/// Detect rebound without attaching the raw series
pub fn detect_rebound_summary(series: &SeriesSet) -> ReboundResult {
    let baseline_avg = series.baseline().mean();
    let expected_avg = series.expected().mean();
    let actual_avg = series.actual().mean();

    let reductions = Reductions::from_averages(baseline_avg, expected_avg, actual_avg);
    let rebound_index = reductions.rebound_index();
    let rebound_level = ReboundLevel::classify(rebound_index);

    debug!(
        periods = series.len(),
        baseline_avg,
        expected_avg,
        actual_avg,
        rebound_index,
        level = %rebound_level,
        "Rebound detected"
    );

    ReboundResult {
        baseline_avg,
        expected_avg,
        actual_avg,
        rebound_index,
        rebound_level,
        lost_climate_benefit: reductions.rebound_loss,
        graph_data: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(baseline: Vec<f64>, expected: Vec<f64>, actual: Vec<f64>) -> SeriesSet {
        SeriesSet::new(baseline, expected, actual).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let result = detect_rebound(&set(
            vec![100.0, 100.0, 100.0],
            vec![70.0, 70.0, 70.0],
            vec![85.0, 85.0, 85.0],
        ));

        assert_eq!(result.baseline_avg, 100.0);
        assert_eq!(result.expected_avg, 70.0);
        assert_eq!(result.actual_avg, 85.0);
        assert_eq!(result.rebound_index, 0.5);
        assert_eq!(result.rebound_level, ReboundLevel::High);
        assert_eq!(result.lost_climate_benefit, 15.0);
    }

    #[test]
    fn test_identical_series_no_rebound() {
        let values = vec![42.0, 37.5, 51.25];
        let result = detect_rebound(&set(values.clone(), values.clone(), values));

        assert_eq!(result.rebound_index, 0.0);
        assert_eq!(result.rebound_level, ReboundLevel::Low);
        assert_eq!(result.lost_climate_benefit, 0.0);
    }

    #[test]
    fn test_zero_expected_reduction_guarded() {
        // Nothing promised, but consumption went up anyway
        let result = detect_rebound(&set(vec![100.0], vec![100.0], vec![120.0]));
        assert_eq!(result.rebound_index, 0.0);
        assert_eq!(result.rebound_level, ReboundLevel::Low);
        assert_eq!(result.lost_climate_benefit, 20.0);
    }

    #[test]
    fn test_negative_index_is_low() {
        // Saved 40 where 30 was promised
        let result = detect_rebound(&set(vec![100.0], vec![70.0], vec![60.0]));
        assert!(result.rebound_index < 0.0);
        assert!((result.rebound_index + 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(result.rebound_level, ReboundLevel::Low);
    }

    #[test]
    fn test_medium_level() {
        // expected_reduction 30, actual 21 -> loss 9 -> index 0.3
        let result = detect_rebound(&set(vec![100.0], vec![70.0], vec![79.0]));
        assert!((result.rebound_index - 0.3).abs() < 1e-12);
        assert_eq!(result.rebound_level, ReboundLevel::Medium);
    }

    #[test]
    fn test_reductions_identity() {
        let r = Reductions::from_averages(103.7, 71.2, 88.9);
        assert_eq!(r.rebound_loss, r.expected_reduction - r.actual_reduction);
        assert_eq!(r.rebound_index(), r.rebound_loss / r.expected_reduction);
    }

    #[test]
    fn test_graph_data_labels() {
        let result = detect_rebound(&set(vec![1.0, 2.0], vec![1.0, 2.0], vec![1.0, 2.0]));
        let graph = result.graph_data.unwrap();
        assert_eq!(graph.periods, vec!["1", "2"]);
        assert_eq!(graph.actual, vec![1.0, 2.0]);

        let summary = detect_rebound_summary(&set(vec![1.0], vec![1.0], vec![1.0]));
        assert!(summary.graph_data.is_none());
    }
}
