//! Dataset commands (import, scenario)

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use greengap_core::{
    dataset_series, format_dashboard, impact::validate_fraction, read_dataset_file,
    rebound::detect_rebound_summary, simulate_scenario, AnalysisConfig, AnalysisReport, Pipeline,
    ScenarioResult, SeriesSet,
};

use super::{advise, print_json, print_report, resolve_reduction_factor};

fn load_series(file: &Path) -> Result<(usize, SeriesSet)> {
    let rows = read_dataset_file(file)
        .with_context(|| format!("Failed to import {}", file.display()))?;
    let series = dataset_series(&rows)?;
    Ok((rows.len(), series))
}

/// Analyze a dataset file, returning the row count and report
pub async fn analyze_dataset(
    config: &AnalysisConfig,
    file: &Path,
    reduction_factor: Option<f64>,
) -> Result<(usize, AnalysisReport)> {
    let reduction_factor = resolve_reduction_factor(config, reduction_factor)?;
    let (rows, series) = load_series(file)?;

    let mut report = Pipeline::new(config.clone()).run_with_scenario(&series, reduction_factor);
    advise(config, &mut report).await;
    Ok((rows, report))
}

pub async fn cmd_import(
    config: &AnalysisConfig,
    file: &Path,
    reduction_factor: Option<f64>,
    json: bool,
) -> Result<()> {
    let (rows, report) = analyze_dataset(config, file, reduction_factor).await?;

    if json {
        let mut value = serde_json::to_value(format_dashboard(&report))?;
        value["rows"] = serde_json::json!(rows);
        return print_json(&value);
    }

    println!("📥 Imported {} rows from {}", rows, file.display());
    print_report(&file.display().to_string(), &report);
    Ok(())
}

/// What-if projection for a dataset
pub fn scenario_for_dataset(file: &Path, reduction_factor: f64) -> Result<ScenarioResult> {
    let reduction_factor = validate_fraction("reduction_factor", reduction_factor)?;
    let (rows, series) = load_series(file)?;

    let rebound = detect_rebound_summary(&series);
    let scenario = simulate_scenario(&rebound, reduction_factor);

    info!(
        rows,
        reduction_factor,
        projected = scenario.projected_emission,
        "Scenario projected"
    );
    Ok(scenario)
}

pub fn cmd_scenario(file: &Path, reduction_factor: f64) -> Result<()> {
    let scenario = scenario_for_dataset(file, reduction_factor)?;

    println!();
    println!(
        "🔮 Scenario: {:.0}% further reduction",
        reduction_factor * 100.0
    );
    println!(
        "   Projected emission:   {:>10.2}",
        scenario.projected_emission
    );
    println!("   Improvement:          {:>10.2}", scenario.improvement);
    println!(
        "   Simulated sustainability: {:.1}",
        scenario.simulated_sustainability
    );
    println!();

    Ok(())
}
