//! Small numeric helpers shared by the pipeline stages

/// Outcome of a guarded division
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    /// Denominator was non-zero
    Defined(f64),
    /// Denominator was exactly zero; the ratio is defined as 0 by convention
    ZeroDenominator,
}

impl Ratio {
    pub fn value(self) -> f64 {
        match self {
            Ratio::Defined(v) => v,
            Ratio::ZeroDenominator => 0.0,
        }
    }
}

/// Divide `numerator` by `denominator`, tagging the zero-denominator case.
///
/// Used wherever a denominator may legitimately be zero (no promised
/// reduction, zero baseline). The zero case is a defined result, not a fault.
pub fn ratio(numerator: f64, denominator: f64) -> Ratio {
    if denominator != 0.0 {
        Ratio::Defined(numerator / denominator)
    } else {
        Ratio::ZeroDenominator
    }
}

/// `numerator / denominator`, or 0 when the denominator is zero
pub fn guarded_div(numerator: f64, denominator: f64) -> f64 {
    ratio(numerator, denominator).value()
}

/// Arithmetic mean. Returns 0 for an empty slice; callers validate
/// non-emptiness before this point.
///
/// Finite inputs always give a finite mean: when the plain sum overflows,
/// each value is scaled by `1/n` before summing.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        sum / n
    } else {
        values.iter().map(|v| v / n).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guarded_div_defined() {
        assert_eq!(ratio(15.0, 30.0), Ratio::Defined(0.5));
        assert_eq!(guarded_div(15.0, 30.0), 0.5);
    }

    #[test]
    fn test_guarded_div_zero_denominator() {
        assert_eq!(ratio(15.0, 0.0), Ratio::ZeroDenominator);
        assert_eq!(guarded_div(15.0, 0.0), 0.0);
        assert_eq!(guarded_div(-3.0, -0.0), 0.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[100.0, 90.0, 110.0]), 100.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_of_large_values_does_not_overflow() {
        assert_eq!(mean(&[1e308, 1e308]), 1e308);
        let m = mean(&[f64::MAX, f64::MAX, f64::MAX]);
        assert!(m.is_finite());
        assert!((m - f64::MAX).abs() / f64::MAX < 1e-12);
    }
}
