//! Simulate command implementation

use anyhow::Result;

use greengap_core::AnalysisConfig;

use super::{print_json, simulated_series};

pub fn cmd_simulate(
    config: &AnalysisConfig,
    days: Option<usize>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let series = simulated_series(config, days, seed)?;

    if json {
        return print_json(&series);
    }

    println!();
    println!(
        "📈 Simulated {} days (efficiency gain {:.0}%)",
        series.len(),
        config.efficiency_gain * 100.0
    );
    println!();
    println!(
        "   {:>4}  {:>10}  {:>10}  {:>10}",
        "Day", "Baseline", "Expected", "Actual"
    );
    println!("   ─────────────────────────────────────────");

    let rows = series
        .baseline()
        .values()
        .iter()
        .zip(series.expected().values())
        .zip(series.actual().values())
        .enumerate();

    for (i, ((baseline, expected), actual)) in rows {
        println!(
            "   {:>4}  {:>10.2}  {:>10.2}  {:>10.2}",
            i + 1,
            baseline,
            expected,
            actual
        );
    }

    println!();
    println!(
        "   Averages: baseline {:.2}, expected {:.2}, actual {:.2}",
        series.baseline().mean(),
        series.expected().mean(),
        series.actual().mean()
    );
    println!();

    Ok(())
}
