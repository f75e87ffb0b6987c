//! Analyze command implementation and report printing

use anyhow::Result;

use greengap_core::{AnalysisConfig, AnalysisReport, Pipeline, ReboundLevel};

use super::{advise, print_json, resolve_reduction_factor, simulated_series};

/// Analyze simulated data, including advisor recommendations
pub async fn analyze_simulated(
    config: &AnalysisConfig,
    days: Option<usize>,
    seed: Option<u64>,
    reduction_factor: Option<f64>,
) -> Result<AnalysisReport> {
    let reduction_factor = resolve_reduction_factor(config, reduction_factor)?;
    let series = simulated_series(config, days, seed)?;

    let mut report = Pipeline::new(config.clone()).run_with_scenario(&series, reduction_factor);
    advise(config, &mut report).await;
    Ok(report)
}

pub async fn cmd_analyze(
    config: &AnalysisConfig,
    days: Option<usize>,
    seed: Option<u64>,
    reduction_factor: Option<f64>,
    json: bool,
) -> Result<()> {
    let report = analyze_simulated(config, days, seed, reduction_factor).await?;

    if json {
        return print_json(&report);
    }

    print_report("Simulated Data", &report);
    Ok(())
}

fn level_icon(level: ReboundLevel) -> &'static str {
    match level {
        ReboundLevel::Low => "🟢",
        ReboundLevel::Medium => "🟡",
        ReboundLevel::High => "🔴",
    }
}

/// Print a human-readable report
pub fn print_report(title: &str, report: &AnalysisReport) {
    let rebound = &report.rebound;
    let metrics = &report.metrics;

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│         🌱 GreenGap Rebound Report      │");
    println!("╰─────────────────────────────────────────╯");
    println!("  {}", title);
    println!();
    println!("  Baseline avg:      {:>10.2}", rebound.baseline_avg);
    println!("  Expected avg:      {:>10.2}", rebound.expected_avg);
    println!("  Actual avg:        {:>10.2}", rebound.actual_avg);
    println!();
    println!(
        "  {} Rebound:         {:.1}% ({})",
        level_icon(rebound.rebound_level),
        rebound.rebound_index * 100.0,
        rebound.rebound_level
    );
    println!(
        "  Lost benefit:      {:>10.2}",
        rebound.lost_climate_benefit
    );
    println!("  Behavior:          {}", report.behavior.behavior_reason);
    println!();
    println!(
        "  Sustainability:    {:>10.1}",
        metrics.sustainability_index
    );
    println!("  Efficiency score:  {:>10.1}", metrics.efficiency_score);
    println!("  Behavior score:    {:>10}", metrics.behavior_score);
    println!("  CO₂ saved:         {:>10.2}", metrics.co2_saved);
    println!(
        "  Corrected proj.:   {:>10.2}",
        report.recommendations.corrected_emission_projection
    );

    if let Some(scenario) = &report.scenario {
        println!();
        println!("  🔮 Scenario");
        println!("     Projected:      {:>10.2}", scenario.projected_emission);
        println!("     Improvement:    {:>10.2}", scenario.improvement);
        println!(
            "     Sustainability: {:>10.1}",
            scenario.simulated_sustainability
        );
    }

    println!();
    println!("  💡 Recommendations");
    for rec in &report.recommendations.recommendations {
        println!("     • {}", rec);
    }
    println!();
}
