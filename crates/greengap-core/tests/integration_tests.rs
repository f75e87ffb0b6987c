//! Integration tests for greengap-core
//!
//! These tests exercise the full import → analyze → dashboard workflow.

use greengap_core::{
    augment_report, dataset_series, format_dashboard, import_dataset, read_dataset_file,
    AnalysisConfig, BehaviorReason, Error, KnowledgeBaseAdvisor, Pipeline, ReboundLevel,
    SeriesSet, Simulator,
};

/// Two weeks of facility data after a 30% efficiency upgrade. Consumption
/// fell, but by less than the upgrade promised.
fn sample_csv() -> &'static str {
    r#"date,baseline_kwh,actual_kwh,efficiency_improvement
2026-02-01,450,375,0.30
2026-02-02,445,370,0.30
2026-02-03,440,368,0.30
2026-02-04,435,365,0.30
2026-02-05,440,372,0.30
2026-02-06,445,378,0.30
2026-02-07,450,380,0.30
2026-02-08,448,376,0.30
2026-02-09,446,374,0.30
2026-02-10,444,372,0.30
2026-02-11,442,370,0.30
2026-02-12,440,368,0.30
2026-02-13,438,366,0.30
2026-02-14,436,364,0.30
"#
}

fn sample_json() -> String {
    let rows: Vec<serde_json::Value> = sample_csv()
        .lines()
        .skip(1)
        .map(|line| {
            let f: Vec<&str> = line.split(',').collect();
            serde_json::json!({
                "date": f[0],
                "baseline_kwh": f[1].parse::<f64>().unwrap(),
                "actual_kwh": f[2].parse::<f64>().unwrap(),
                "efficiency_improvement": f[3].parse::<f64>().unwrap(),
            })
        })
        .collect();
    serde_json::to_string_pretty(&rows).unwrap()
}

// =============================================================================
// Dataset Workflow
// =============================================================================

#[test]
fn test_csv_dataset_end_to_end() {
    let rows = import_dataset(sample_csv().as_bytes(), Some("sample_data.csv")).unwrap();
    assert_eq!(rows.len(), 14);

    let series = dataset_series(&rows).unwrap();
    let report = Pipeline::default().run(&series);

    // baseline avg ~442.8, expected ~310.0, actual ~371.3
    assert!((report.rebound.baseline_avg - 6199.0 / 14.0).abs() < 1e-9);
    assert!((report.rebound.actual_avg - 5198.0 / 14.0).abs() < 1e-9);
    assert!(
        report.rebound.rebound_index > 0.45 && report.rebound.rebound_index < 0.47
    );
    assert_eq!(report.rebound.rebound_level, ReboundLevel::Medium);
    assert_eq!(
        report.behavior.behavior_reason,
        BehaviorReason::ReducedConsumption
    );
    assert_eq!(report.metrics.behavior_score, 80);
    assert!((report.metrics.co2_saved - 71.5).abs() < 1e-9);

    let dashboard = format_dashboard(&report);
    let chart = dashboard.emissions_chart.unwrap();
    assert_eq!(
        chart.periods.first().map(String::as_str),
        Some("2026-02-01")
    );
    assert_eq!(chart.periods.len(), 14);
    assert_eq!(
        dashboard.recommendations,
        vec!["Moderate rebound: monitor usage patterns and avoid extended runtime."]
    );
}

#[test]
fn test_json_matches_csv() {
    let csv_rows = import_dataset(sample_csv().as_bytes(), Some("data.csv")).unwrap();
    let json_rows = import_dataset(sample_json().as_bytes(), None).unwrap();
    assert_eq!(csv_rows, json_rows);
}

#[test]
fn test_dataset_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample_energy_data.json");
    std::fs::write(&path, sample_json()).unwrap();

    let rows = read_dataset_file(&path).unwrap();
    assert_eq!(rows.len(), 14);
}

#[test]
fn test_spreadsheet_rejected() {
    let err = import_dataset(b"PK\x03\x04rest", Some("sample_energy_data.xlsx")).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
    assert!(err.is_input_error());
}

// =============================================================================
// Pipeline Properties
// =============================================================================

#[test]
fn test_reference_scenario() {
    let series = SeriesSet::new(vec![100.0; 3], vec![70.0; 3], vec![85.0; 3]).unwrap();
    let report = Pipeline::default().run(&series);

    assert_eq!(report.rebound.rebound_index, 0.5);
    assert_eq!(report.rebound.rebound_level, ReboundLevel::High);
    assert_eq!(report.rebound.lost_climate_benefit, 15.0);
    assert_eq!(report.metrics.efficiency_score, 50.0);
    assert_eq!(report.metrics.sustainability_index, 62.0);
    assert_eq!(report.recommendations.corrected_emission_projection, 77.5);

    // Tier boundary is strict: index exactly 0.5 is Moderate
    assert_eq!(
        report.recommendations.recommendations,
        vec!["Moderate rebound: monitor usage patterns and avoid extended runtime."]
    );

    let scenario = report.scenario.unwrap();
    assert!((scenario.projected_emission - 76.5).abs() < 1e-9);
    assert!((scenario.improvement - 8.5).abs() < 1e-9);
}

#[test]
fn test_identical_series_do_not_divide_by_zero() {
    let series = SeriesSet::new(vec![50.0; 4], vec![50.0; 4], vec![50.0; 4]).unwrap();
    let report = Pipeline::default().run(&series);

    assert_eq!(report.rebound.rebound_index, 0.0);
    assert_eq!(report.rebound.rebound_level, ReboundLevel::Low);
    assert_eq!(report.behavior.behavior_reason, BehaviorReason::Stable);
    assert_eq!(report.metrics.behavior_score, 60);
    assert_eq!(report.metrics.efficiency_score, 100.0);
}

#[test]
fn test_overconsumption_is_flagged() {
    // Actual above baseline: index > 1, behavior increased
    let series = SeriesSet::new(vec![100.0], vec![70.0], vec![110.0]).unwrap();
    let report = Pipeline::default().run(&series);

    assert_eq!(report.rebound.rebound_level, ReboundLevel::High);
    assert_eq!(report.metrics.efficiency_score, 0.0);
    assert_eq!(report.metrics.co2_saved, -10.0);
    assert_eq!(report.recommendations.recommendations.len(), 3);
    assert!(report.recommendations.recommendations[2].starts_with("Behavioral rebound"));
}

#[test]
fn test_simulated_data_through_pipeline() {
    let config = AnalysisConfig::default();
    let simulator = Simulator::new(config.simulation.clone(), config.efficiency_gain);
    let series = simulator.generate_seeded(config.simulation.days, 99).unwrap();

    let report = Pipeline::new(config).run(&series);
    assert!((report.rebound.rebound_index - 0.5).abs() < 1e-9);
    assert!(report.scenario.is_some());
}

#[tokio::test]
async fn test_advisor_augmented_report() {
    let series = SeriesSet::new(vec![100.0; 3], vec![70.0; 3], vec![85.0; 3]).unwrap();
    let mut report = Pipeline::default().run(&series);
    let core = report.recommendations.recommendations.clone();

    augment_report(&KnowledgeBaseAdvisor::new(), &mut report).await;

    let recs = &report.recommendations.recommendations;
    assert!(recs.starts_with(&core));
    assert!(recs.len() <= 4);
    assert!(recs[1].starts_with("Critical:"));
}
