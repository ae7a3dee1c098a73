//! Two-sample Kolmogorov-Smirnov test.

use arraystat_numerics::ks::ks_two_sample;
use serde::Serialize;

use crate::error::{self, InputError};

/// Outcome of the two-sample Kolmogorov-Smirnov test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KsTestResult {
    /// Maximum distance between the two empirical distribution functions.
    pub d_statistic: f64,
    /// `n1 + n2 - 2`, carried for display alongside t and F results. The KS
    /// probability does not use it.
    pub degrees_of_freedom: usize,
    pub p_value: f64,
    pub success: bool,
}

/// Compares two empirical distributions.
///
/// Both samples need at least one value and no NaN entries. A failed or out-of-range probability
/// from the numerics primitive is reported as `p_value = 1`, `success = false`.
///
/// # Examples
///
/// ```
/// # use arraystat_stats::ks::two_sample_ks;
/// let low = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
/// let high = [1.1, 1.2, 1.3, 1.4, 1.5, 1.6];
/// let result = two_sample_ks(&low, &high);
/// assert_eq!(result.d_statistic, 1.0);
/// assert_eq!(result.degrees_of_freedom, 10);
/// assert!(result.p_value < 0.01);
/// ```
#[must_use]
pub fn two_sample_ks(data1: &[f64], data2: &[f64]) -> KsTestResult {
    let degrees_of_freedom = (data1.len() + data2.len()).saturating_sub(2);
    if data1.is_empty() || data2.is_empty() {
        tracing::debug!(
            n1 = data1.len(),
            n2 = data2.len(),
            "KS test needs a sample in each group"
        );
        return KsTestResult {
            d_statistic: 0.0,
            degrees_of_freedom,
            p_value: 1.0,
            success: false,
        };
    }

    if data1.iter().chain(data2).any(|x| x.is_nan()) {
        tracing::debug!("KS test input contains NaN");
        return KsTestResult {
            d_statistic: 0.0,
            degrees_of_freedom,
            p_value: 1.0,
            success: false,
        };
    }

    let outcome = ks_two_sample(data1, data2);
    let probability = outcome.probability;
    let (p_value, success) = if probability.success && (0.0..=1.0).contains(&probability.value) {
        (probability.value, true)
    } else {
        tracing::debug!(d = outcome.d_statistic, "KS probability unavailable");
        (1.0, false)
    };

    KsTestResult {
        d_statistic: outcome.d_statistic,
        degrees_of_freedom,
        p_value,
        success,
    }
}

/// Like [`two_sample_ks`], reading only the first `n1`/`n2` values of each buffer.
///
/// # Errors
///
/// Returns [`InputError::CountExceedsData`] if a count exceeds its buffer.
pub fn two_sample_ks_with_counts(
    data1: &[f64],
    n1: usize,
    data2: &[f64],
    n2: usize,
) -> Result<KsTestResult, InputError> {
    Ok(two_sample_ks(
        error::valid_prefix(data1, n1)?,
        error::valid_prefix(data2, n2)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_distribution_is_not_significant() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let result = two_sample_ks(&a, &a);
        assert!(result.success);
        assert_eq!(result.d_statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
        assert_eq!(result.degrees_of_freedom, 14);
    }

    #[test]
    fn test_shifted_distribution() {
        let a = (0..30_i32).map(f64::from).collect::<Vec<_>>();
        let b = (20..50_i32).map(f64::from).collect::<Vec<_>>();
        let result = two_sample_ks(&a, &b);
        assert!(result.success);
        assert!((result.d_statistic - 20.0 / 30.0).abs() < 1e-12);
        assert!(result.p_value < 1e-4, "got {}", result.p_value);
    }

    #[test]
    fn test_input_order_is_irrelevant() {
        let a = [3.0, 1.0, 4.0, 1.5, 9.0, 2.6];
        let b = [2.7, 1.8, 2.8, 1.9, 0.5];
        let mut a_sorted = a;
        a_sorted.sort_by(f64::total_cmp);
        assert_eq!(two_sample_ks(&a, &b), two_sample_ks(&a_sorted, &b));
    }

    #[test]
    fn test_empty_sample_fails() {
        let result = two_sample_ks(&[], &[1.0, 2.0]);
        assert!(!result.success);
        assert_eq!(result.p_value, 1.0);
        assert_eq!(result.degrees_of_freedom, 0);
    }

    #[test]
    fn test_nan_sample_fails_open() {
        let result = two_sample_ks(&[1.0, f64::NAN, 3.0], &[2.0, 4.0]);
        assert!(!result.success);
        assert_eq!(result.p_value, 1.0);
        assert_eq!(result.d_statistic, 0.0);
        assert_eq!(result.degrees_of_freedom, 3);
    }

    #[test]
    fn test_infinite_values_are_ordered() {
        let result = two_sample_ks(&[f64::NEG_INFINITY, 1.0, 2.0], &[3.0, f64::INFINITY]);
        assert!(result.success);
        assert_eq!(result.d_statistic, 1.0);
    }

    #[test]
    fn test_counts_select_prefixes() {
        let buffer1 = [1.0, 2.0, 3.0, 1000.0];
        let buffer2 = [1.5, 2.5, -1000.0];
        let result = two_sample_ks_with_counts(&buffer1, 3, &buffer2, 2).unwrap();
        assert_eq!(result, two_sample_ks(&[1.0, 2.0, 3.0], &[1.5, 2.5]));
        assert!(two_sample_ks_with_counts(&buffer1, 5, &buffer2, 2).is_err());
    }
}
