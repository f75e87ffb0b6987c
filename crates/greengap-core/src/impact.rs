//! Impact model: theoretical post-intervention consumption

use crate::error::{Error, Result};
use crate::models::ConsumptionSeries;

/// Expected consumption after applying a fractional efficiency gain to
/// every baseline period: `baseline[i] * (1 - efficiency_gain)`.
///
/// The gain is not clamped here; use [`validate_fraction`] at input
/// boundaries when a [0, 1] contract is wanted.
pub fn compute_expected(
    baseline: &ConsumptionSeries,
    efficiency_gain: f64,
) -> Result<ConsumptionSeries> {
    if baseline.is_empty() {
        return Err(Error::EmptySeries("baseline"));
    }

    Ok(baseline
        .values()
        .iter()
        .map(|b| b * (1.0 - efficiency_gain))
        .collect::<Vec<_>>()
        .into())
}

/// Expected consumption when each period carries its own gain
/// (uploaded datasets have an `efficiency_improvement` column per row).
pub fn compute_expected_per_period(
    baseline: &ConsumptionSeries,
    gains: &[f64],
) -> Result<ConsumptionSeries> {
    if baseline.is_empty() {
        return Err(Error::EmptySeries("baseline"));
    }
    if gains.len() != baseline.len() {
        return Err(Error::InvalidData(format!(
            "Expected {} efficiency gains, got {}",
            baseline.len(),
            gains.len()
        )));
    }

    Ok(baseline
        .values()
        .iter()
        .zip(gains)
        .map(|(b, g)| b * (1.0 - g))
        .collect::<Vec<_>>()
        .into())
}

/// Check that a named fraction lies in [0, 1]
pub fn validate_fraction(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidData(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(value)
}
