//! Analysis configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path (`--config`), else the override in the data dir
//!    (~/.local/share/greengap/config/analysis.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::impact::validate_fraction;
use crate::scenario::DEFAULT_REDUCTION_FACTOR;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analysis.toml");

/// Which recommendation advisor augments the core recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisorKind {
    /// Built-in categorized knowledge base
    KnowledgeBase,
    /// Core recommendations only
    None,
}

impl AdvisorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisorKind::KnowledgeBase => "knowledge_base",
            AdvisorKind::None => "none",
        }
    }
}

impl std::str::FromStr for AdvisorKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "knowledge_base" => Ok(AdvisorKind::KnowledgeBase),
            "none" => Ok(AdvisorKind::None),
            _ => Err(format!("Unknown advisor backend: {}", s)),
        }
    }
}

/// Parameters of the synthetic data generator
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Number of periods (days) to generate
    pub days: usize,
    /// Mean of the baseline normal distribution
    pub mean: f64,
    /// Standard deviation of the baseline normal distribution
    pub std_dev: f64,
    /// Actual consumption as a fraction of baseline
    pub actual_factor: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: 30,
            mean: 100.0,
            std_dev: 5.0,
            actual_factor: 0.85,
        }
    }
}

/// Top-level analysis configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Expected fractional reduction from the intervention
    pub efficiency_gain: f64,
    /// What-if reduction for the scenario projection (None disables it)
    pub reduction_factor: Option<f64>,
    pub simulation: SimulationConfig,
    pub advisor: AdvisorKind,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            efficiency_gain: 0.3,
            reduction_factor: Some(DEFAULT_REDUCTION_FACTOR),
            simulation: SimulationConfig::default(),
            advisor: AdvisorKind::KnowledgeBase,
        }
    }
}

impl AnalysisConfig {
    /// Load config from `path` if given and present, else the default
    /// override location, else the embedded defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let override_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };

        match override_path {
            Some(p) if p.exists() => {
                debug!(path = %p.display(), "Loading analysis config override");
                let content = fs::read_to_string(&p)
                    .map_err(|e| Error::Config(format!("Failed to read {}: {}", p.display(), e)))?;
                parse_config(&content)
            }
            _ => parse_config(DEFAULT_CONFIG),
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("greengap").join("config").join("analysis.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    impact: Option<RawImpact>,
    scenario: Option<RawScenario>,
    simulation: Option<RawSimulation>,
    advisor: Option<RawAdvisor>,
}

#[derive(Debug, Deserialize)]
struct RawImpact {
    efficiency_gain: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawScenario {
    enabled: Option<bool>,
    reduction_factor: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawSimulation {
    days: Option<usize>,
    mean: Option<f64>,
    std_dev: Option<f64>,
    actual_factor: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawAdvisor {
    backend: Option<String>,
}

/// Parse config from TOML content, merging over defaults
pub fn parse_config(content: &str) -> Result<AnalysisConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalysisConfig::default();

    if let Some(impact) = raw.impact {
        if let Some(gain) = impact.efficiency_gain {
            config.efficiency_gain = validate_fraction("impact.efficiency_gain", gain)?;
        }
    }

    if let Some(scenario) = raw.scenario {
        if let Some(factor) = scenario.reduction_factor {
            config.reduction_factor = Some(validate_fraction("scenario.reduction_factor", factor)?);
        }
        if scenario.enabled == Some(false) {
            config.reduction_factor = None;
        }
    }

    if let Some(sim) = raw.simulation {
        if let Some(days) = sim.days {
            if days == 0 {
                return Err(Error::Config("simulation.days must be at least 1".into()));
            }
            config.simulation.days = days;
        }
        if let Some(mean) = sim.mean {
            config.simulation.mean = mean;
        }
        if let Some(std_dev) = sim.std_dev {
            if !(std_dev >= 0.0 && std_dev.is_finite()) {
                return Err(Error::Config(format!(
                    "simulation.std_dev must be non-negative, got {}",
                    std_dev
                )));
            }
            config.simulation.std_dev = std_dev;
        }
        if let Some(factor) = sim.actual_factor {
            if factor < 0.0 {
                return Err(Error::Config(format!(
                    "simulation.actual_factor must be non-negative, got {}",
                    factor
                )));
            }
            config.simulation.actual_factor = factor;
        }
    }

    if let Some(advisor) = raw.advisor {
        if let Some(backend) = advisor.backend {
            config.advisor = backend.parse().map_err(Error::Config)?;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = parse_config(
            r#"
[impact]
efficiency_gain = 0.25

[advisor]
backend = "none"
"#,
        )
        .unwrap();
        assert_eq!(config.efficiency_gain, 0.25);
        assert_eq!(config.advisor, AdvisorKind::None);
        assert_eq!(config.reduction_factor, Some(0.1));
        assert_eq!(config.simulation.days, 30);
    }

    #[test]
    fn test_scenario_can_be_disabled() {
        let config = parse_config("[scenario]\nenabled = false\n").unwrap();
        assert_eq!(config.reduction_factor, None);
    }

    #[test]
    fn test_rejects_out_of_range_fraction() {
        let err = parse_config("[impact]\nefficiency_gain = 1.4\n").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_rejects_zero_days_and_unknown_backend() {
        assert!(parse_config("[simulation]\ndays = 0\n").is_err());
        assert!(parse_config("[advisor]\nbackend = \"gpt\"\n").is_err());
        assert!(parse_config("not toml [").is_err());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[simulation]\ndays = 7").unwrap();

        let config = AnalysisConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.simulation.days, 7);
    }

    #[test]
    fn test_load_missing_explicit_path_uses_embedded() {
        let config = AnalysisConfig::load(Some(Path::new("/nonexistent/greengap.toml"))).unwrap();
        assert_eq!(config.efficiency_gain, 0.3);
    }
}
