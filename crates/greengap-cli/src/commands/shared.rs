//! Shared command utilities

use anyhow::{Context, Result};
use serde::Serialize;

use greengap_core::{
    advisor_for, augment_report, impact::validate_fraction, AnalysisConfig, AnalysisReport,
    SeriesSet, Simulator,
};

/// Generate simulated series with the configured simulator
pub fn simulated_series(
    config: &AnalysisConfig,
    days: Option<usize>,
    seed: Option<u64>,
) -> Result<SeriesSet> {
    let days = days.unwrap_or(config.simulation.days);
    let simulator = Simulator::new(config.simulation.clone(), config.efficiency_gain);

    let series = match seed {
        Some(seed) => simulator.generate_seeded(days, seed),
        None => simulator.generate(days),
    }
    .with_context(|| format!("Failed to simulate {} days", days))?;

    Ok(series)
}

/// Validate a requested reduction factor, falling back to the configured one
pub fn resolve_reduction_factor(
    config: &AnalysisConfig,
    requested: Option<f64>,
) -> Result<Option<f64>> {
    match requested {
        Some(factor) => Ok(Some(validate_fraction("reduction_factor", factor)?)),
        None => Ok(config.reduction_factor),
    }
}

/// Augment a report with the configured advisor, if any
pub async fn advise(config: &AnalysisConfig, report: &mut AnalysisReport) {
    if let Some(advisor) = advisor_for(config.advisor) {
        augment_report(advisor.as_ref(), report).await;
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
