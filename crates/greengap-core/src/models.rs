//! Data models for GreenGap

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::stats;

/// Consumption (or emissions) values, one per period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsumptionSeries(Vec<f64>);

impl ConsumptionSeries {
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn mean(&self) -> f64 {
        stats::mean(&self.0)
    }

    /// Reject negative and non-finite values, naming the series and period
    fn check_values(&self, name: &str) -> Result<()> {
        match self.0.iter().position(|v| !v.is_finite() || *v < 0.0) {
            Some(i) => Err(Error::InvalidData(format!(
                "{} period {}: value must be a non-negative number, got {}",
                name,
                i + 1,
                self.0[i]
            ))),
            None => Ok(()),
        }
    }
}

impl From<Vec<f64>> for ConsumptionSeries {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl From<&[f64]> for ConsumptionSeries {
    fn from(values: &[f64]) -> Self {
        Self(values.to_vec())
    }
}

/// Baseline, expected and actual series for one analysis
///
/// Construction enforces that all three series are non-empty, share the
/// same length and hold only finite non-negative values, so position `i`
/// refers to the same period in each.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSet {
    baseline: ConsumptionSeries,
    expected: ConsumptionSeries,
    actual: ConsumptionSeries,
    /// Optional period labels (e.g. dataset dates)
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<String>>,
}

impl SeriesSet {
    pub fn new(
        baseline: impl Into<ConsumptionSeries>,
        expected: impl Into<ConsumptionSeries>,
        actual: impl Into<ConsumptionSeries>,
    ) -> Result<Self> {
        let baseline = baseline.into();
        let expected = expected.into();
        let actual = actual.into();

        if baseline.is_empty() {
            return Err(Error::EmptySeries("baseline"));
        }
        if expected.is_empty() {
            return Err(Error::EmptySeries("expected"));
        }
        if actual.is_empty() {
            return Err(Error::EmptySeries("actual"));
        }
        if baseline.len() != expected.len() || baseline.len() != actual.len() {
            return Err(Error::LengthMismatch {
                baseline: baseline.len(),
                expected: expected.len(),
                actual: actual.len(),
            });
        }
        baseline.check_values("baseline")?;
        expected.check_values("expected")?;
        actual.check_values("actual")?;

        Ok(Self {
            baseline,
            expected,
            actual,
            labels: None,
        })
    }

    /// Attach period labels; there must be exactly one per period
    pub fn with_labels(mut self, labels: Vec<String>) -> Result<Self> {
        if labels.len() != self.len() {
            return Err(Error::InvalidData(format!(
                "Expected {} period labels, got {}",
                self.len(),
                labels.len()
            )));
        }
        self.labels = Some(labels);
        Ok(self)
    }

    pub fn baseline(&self) -> &ConsumptionSeries {
        &self.baseline
    }

    pub fn expected(&self) -> &ConsumptionSeries {
        &self.expected
    }

    pub fn actual(&self) -> &ConsumptionSeries {
        &self.actual
    }

    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Number of periods
    pub fn len(&self) -> usize {
        self.baseline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baseline.is_empty()
    }

    /// Period labels for charts: the attached labels, or "1".."N"
    pub fn period_labels(&self) -> Vec<String> {
        match &self.labels {
            Some(labels) => labels.clone(),
            None => (1..=self.len()).map(|i| i.to_string()).collect(),
        }
    }
}

/// Rebound severity assigned by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReboundLevel {
    Low,
    Medium,
    High,
}

impl ReboundLevel {
    /// Classify a rebound index: `< 0.2` LOW, `< 0.5` MEDIUM, otherwise HIGH.
    ///
    /// A negative index (actual savings beat the expected savings) is LOW.
    pub fn classify(rebound_index: f64) -> Self {
        if rebound_index < 0.2 {
            ReboundLevel::Low
        } else if rebound_index < 0.5 {
            ReboundLevel::Medium
        } else {
            ReboundLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReboundLevel::Low => "LOW",
            ReboundLevel::Medium => "MEDIUM",
            ReboundLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for ReboundLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of usage change between baseline and actual consumption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorReason {
    #[serde(rename = "Increased usage after efficiency adoption")]
    IncreasedUsage,
    #[serde(rename = "Reduced consumption behavior")]
    ReducedConsumption,
    #[serde(rename = "Stable usage pattern")]
    Stable,
}

impl BehaviorReason {
    /// Sign test on `actual_avg - baseline_avg`. Zero uses exact equality.
    pub fn from_usage_change(usage_change: f64) -> Self {
        if usage_change > 0.0 {
            BehaviorReason::IncreasedUsage
        } else if usage_change < 0.0 {
            BehaviorReason::ReducedConsumption
        } else {
            BehaviorReason::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorReason::IncreasedUsage => "Increased usage after efficiency adoption",
            BehaviorReason::ReducedConsumption => "Reduced consumption behavior",
            BehaviorReason::Stable => "Stable usage pattern",
        }
    }
}

impl fmt::Display for BehaviorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw series plus labels, for chart rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub periods: Vec<String>,
    pub baseline: Vec<f64>,
    pub expected: Vec<f64>,
    pub actual: Vec<f64>,
}

/// Output of the rebound detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReboundResult {
    pub baseline_avg: f64,
    pub expected_avg: f64,
    pub actual_avg: f64,
    pub rebound_index: f64,
    pub rebound_level: ReboundLevel,
    /// Expected reduction that was not realized, in series units
    pub lost_climate_benefit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_data: Option<GraphData>,
}

/// Output of the behavior analyzer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BehaviorResult {
    pub usage_change: f64,
    pub behavior_reason: BehaviorReason,
}

/// Derived sustainability metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub co2_saved: f64,
    /// Floored at 0, no upper bound
    pub efficiency_score: f64,
    /// One of 40, 60, 80
    pub behavior_score: u8,
    pub sustainability_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommendations: Vec<String>,
    pub corrected_emission_projection: f64,
}

/// What-if projection for an additional reduction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub projected_emission: f64,
    pub improvement: f64,
    /// Capped at 100, not floored
    pub simulated_sustainability: f64,
}

/// Everything one pipeline run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub rebound: ReboundResult,
    pub behavior: BehaviorResult,
    pub metrics: MetricsResult,
    pub recommendations: RecommendationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<ScenarioResult>,
}

/// One row of an uploaded consumption dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRow {
    pub date: chrono::NaiveDate,
    pub baseline_kwh: f64,
    pub actual_kwh: f64,
    /// Fraction in [0, 1]
    pub efficiency_improvement: f64,
}

impl DatasetRow {
    /// Theoretical consumption for this period after the intervention
    pub fn expected_kwh(&self) -> f64 {
        self.baseline_kwh * (1.0 - self.efficiency_improvement)
    }
}
