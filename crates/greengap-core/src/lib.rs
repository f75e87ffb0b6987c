//! GreenGap Core Library
//!
//! Rebound analytics for energy-efficiency interventions:
//! - Impact model deriving expected consumption from an efficiency gain
//! - Rebound detection and LOW/MEDIUM/HIGH classification
//! - Behavior analysis, sustainability metrics and recommendations
//! - What-if reduction scenarios
//! - CSV/JSON dataset import and synthetic data generation
//! - Pluggable recommendation advisors backed by a knowledge base
//! - Dashboard formatting for the frontend

pub mod advisor;
pub mod behavior;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod impact;
pub mod import;
pub mod knowledge;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod rebound;
pub mod recommend;
pub mod scenario;
pub mod simulate;
pub mod stats;

pub use advisor::{advisor_for, augment_report, Advisor, AdvisorInput, KnowledgeBaseAdvisor};
pub use behavior::analyze_behavior;
pub use config::{AdvisorKind, AnalysisConfig, SimulationConfig};
pub use dashboard::{format_dashboard, Dashboard, SummaryCards};
pub use error::{Error, Result};
pub use impact::compute_expected;
pub use import::{dataset_series, import_dataset, read_dataset_file, DatasetFormat};
pub use metrics::calculate_metrics;
pub use models::{
    AnalysisReport, BehaviorReason, BehaviorResult, ConsumptionSeries, DatasetRow, GraphData,
    MetricsResult, ReboundLevel, ReboundResult, RecommendationResult, ScenarioResult, SeriesSet,
};
pub use pipeline::Pipeline;
pub use rebound::detect_rebound;
pub use recommend::generate_recommendations;
pub use scenario::simulate_scenario;
pub use simulate::Simulator;
