//! Synthetic consumption data for demos and tests
//!
//! Baseline is drawn from a normal distribution (mean 100, std dev 5 by
//! default); expected applies the configured efficiency gain; actual is a
//! fixed fraction of baseline, leaving a built-in rebound.

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::Normal;
use tracing::debug;

use crate::config::SimulationConfig;
use crate::error::{Error, Result};
use crate::impact::compute_expected;
use crate::models::{ConsumptionSeries, SeriesSet};

/// Generator for simulated baseline/expected/actual series
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
    efficiency_gain: f64,
}

impl Simulator {
    pub fn new(config: SimulationConfig, efficiency_gain: f64) -> Self {
        Self {
            config,
            efficiency_gain,
        }
    }

    /// Generate `days` periods with the thread-local RNG
    pub fn generate(&self, days: usize) -> Result<SeriesSet> {
        self.generate_with_rng(days, &mut rand::thread_rng())
    }

    /// Generate reproducible data from a seed
    pub fn generate_seeded(&self, days: usize, seed: u64) -> Result<SeriesSet> {
        self.generate_with_rng(days, &mut StdRng::seed_from_u64(seed))
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        days: usize,
        rng: &mut R,
    ) -> Result<SeriesSet> {
        if days == 0 {
            return Err(Error::EmptySeries("baseline"));
        }

        let mean = self.config.mean;
        let std_dev = self.config.std_dev;
        if !mean.is_finite() || !std_dev.is_finite() || std_dev < 0.0 {
            return Err(Error::InvalidData(format!(
                "Invalid baseline distribution: mean={}, std_dev={}",
                mean, std_dev
            )));
        }

        // Consumption cannot be negative; only reachable with extreme parameters
        let values: Vec<f64> = if std_dev == 0.0 {
            vec![mean.max(0.0); days]
        } else {
            let normal = Normal::new(mean, std_dev).map_err(|e| {
                Error::InvalidData(format!("Invalid baseline distribution: {}", e))
            })?;
            (0..days).map(|_| normal.sample(rng).max(0.0)).collect()
        };
        let baseline = ConsumptionSeries::from(values);

        let expected = compute_expected(&baseline, self.efficiency_gain)?;
        let actual: Vec<f64> = baseline
            .values()
            .iter()
            .map(|b| b * self.config.actual_factor)
            .collect();

        debug!(
            days,
            mean = baseline.mean(),
            efficiency_gain = self.efficiency_gain,
            "Generated simulated series"
        );

        SeriesSet::new(baseline, expected, actual)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimulationConfig::default(), 0.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReboundLevel;
    use crate::rebound::detect_rebound;

    #[test]
    fn test_generate_shape() {
        let set = Simulator::default().generate(30).unwrap();
        assert_eq!(set.len(), 30);
        assert_eq!(set.expected().len(), 30);
        assert_eq!(set.actual().len(), 30);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let sim = Simulator::default();
        assert_eq!(
            sim.generate_seeded(10, 42).unwrap(),
            sim.generate_seeded(10, 42).unwrap()
        );
        assert_ne!(
            sim.generate_seeded(10, 42).unwrap(),
            sim.generate_seeded(10, 43).unwrap()
        );
    }

    #[test]
    fn test_derived_series_relationships() {
        let set = Simulator::default().generate_seeded(5, 7).unwrap();
        for i in 0..set.len() {
            let b = set.baseline().values()[i];
            assert!((set.expected().values()[i] - b * 0.7).abs() < 1e-9);
            assert!((set.actual().values()[i] - b * 0.85).abs() < 1e-9);
        }
    }

    #[test]
    fn test_default_simulation_loses_half_the_benefit() {
        // expected cuts 30%, actual only 15% -> index 0.5 regardless of draws
        let set = Simulator::default().generate_seeded(30, 1).unwrap();
        let result = detect_rebound(&set);
        assert!((result.rebound_index - 0.5).abs() < 1e-9);
        assert_ne!(result.rebound_level, ReboundLevel::Low);
    }

    #[test]
    fn test_zero_days_rejected() {
        assert!(matches!(
            Simulator::default().generate(0),
            Err(Error::EmptySeries(_))
        ));
    }

    #[test]
    fn test_zero_std_dev_is_constant() {
        let sim = Simulator::new(
            SimulationConfig {
                std_dev: 0.0,
                ..Default::default()
            },
            0.3,
        );
        let set = sim.generate(4).unwrap();
        assert_eq!(set.baseline().values(), &[100.0; 4]);
    }

    #[test]
    fn test_invalid_distribution() {
        let sim = Simulator::new(
            SimulationConfig {
                std_dev: -1.0,
                ..Default::default()
            },
            0.3,
        );
        assert!(matches!(sim.generate(3), Err(Error::InvalidData(_))));
    }
}
