//! Two-sample Kolmogorov-Smirnov primitives.

use crate::Probability;

const MAX_TERMS: usize = 100;
const EPS_RELATIVE_TERM: f64 = 0.001;
const EPS_RELATIVE_SUM: f64 = 1e-8;

/// Below this `lambda` the Kolmogorov tail probability equals 1 to within `1e-6`
/// while its alternating series needs far more than [`MAX_TERMS`] terms.
const LAMBDA_NEGLIGIBLE: f64 = 0.27;

/// D statistic and significance for two samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KsOutcome {
    /// Maximum distance between the two empirical CDFs.
    pub d_statistic: f64,
    /// Probability of a D at least this large under the null hypothesis.
    pub probability: Probability,
}

/// Runs the two-sample Kolmogorov-Smirnov test on unsorted samples.
///
/// Both samples are copied and sorted, the inputs are left untouched. An empty
/// sample yields `d_statistic = 0` and a failed probability of 1; a NaN in
/// either sample yields `d_statistic = NaN` and a failed probability of 1.
///
/// # Examples
///
/// ```
/// # use arraystat_numerics::ks::ks_two_sample;
/// let a = [0.1, 0.4, 0.2, 0.3];
/// let b = [5.0, 6.0, 7.0, 8.0];
/// let outcome = ks_two_sample(&a, &b);
/// assert_eq!(outcome.d_statistic, 1.0);
/// assert!(outcome.probability.value < 0.05);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn ks_two_sample(data1: &[f64], data2: &[f64]) -> KsOutcome {
    if data1.is_empty() || data2.is_empty() {
        return KsOutcome {
            d_statistic: 0.0,
            probability: Probability::failed(1.0),
        };
    }
    if data1.iter().chain(data2).any(|x| x.is_nan()) {
        return KsOutcome {
            d_statistic: f64::NAN,
            probability: Probability::failed(1.0),
        };
    }

    let mut sorted1 = data1.to_vec();
    let mut sorted2 = data2.to_vec();
    sorted1.sort_by(f64::total_cmp);
    sorted2.sort_by(f64::total_cmp);

    let d_statistic = ks_statistic(&sorted1, &sorted2);
    let n1 = sorted1.len() as f64;
    let n2 = sorted2.len() as f64;
    let effective_n = n1 * n2 / (n1 + n2);

    KsOutcome {
        d_statistic,
        probability: ks_probability(d_statistic, effective_n),
    }
}

/// Maximum absolute distance between the empirical CDFs of two ascending samples.
///
/// # Panics
///
/// Panics if either sample is not sorted in ascending order, which includes
/// samples containing NaN.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn ks_statistic(sorted1: &[f64], sorted2: &[f64]) -> f64 {
    assert!(
        sorted1.is_sorted_by(|a, b| a <= b) && sorted2.is_sorted_by(|a, b| a <= b),
        "samples must be sorted in ascending order"
    );

    let n1 = sorted1.len() as f64;
    let n2 = sorted2.len() as f64;
    let (mut j1, mut j2) = (0, 0);
    let (mut cdf1, mut cdf2) = (0.0_f64, 0.0_f64);
    let mut d = 0.0_f64;

    while j1 < sorted1.len() && j2 < sorted2.len() {
        let x1 = sorted1[j1];
        let x2 = sorted2[j2];
        if x1 <= x2 {
            j1 += 1;
            cdf1 = j1 as f64 / n1;
        }
        if x2 <= x1 {
            j2 += 1;
            cdf2 = j2 as f64 / n2;
        }
        d = d.max((cdf2 - cdf1).abs());
    }

    d
}

/// Significance of a D statistic for an effective sample size `n1·n2/(n1+n2)`.
///
/// Uses the Stephens correction `lambda = (sqrt(Ne) + 0.12 + 0.11/sqrt(Ne))·d`.
#[must_use]
pub fn ks_probability(d: f64, effective_n: f64) -> Probability {
    if !(effective_n > 0.0 && d.is_finite()) {
        return Probability::failed(1.0);
    }
    let sqrt_n = effective_n.sqrt();
    kolmogorov_q((sqrt_n + 0.12 + 0.11 / sqrt_n) * d)
}

/// Kolmogorov tail function `Q(lambda) = 2·Σ (-1)^(j-1)·exp(-2j²λ²)`.
#[expect(clippy::cast_precision_loss)]
fn kolmogorov_q(lambda: f64) -> Probability {
    if lambda < LAMBDA_NEGLIGIBLE {
        return Probability::converged(1.0);
    }

    let a2 = -2.0 * lambda * lambda;
    let mut factor = 2.0;
    let mut sum = 0.0;
    let mut previous_term = 0.0;

    for j in 1..=MAX_TERMS {
        let j = j as f64;
        let term = factor * (a2 * j * j).exp();
        sum += term;
        if term.abs() <= EPS_RELATIVE_TERM * previous_term || term.abs() <= EPS_RELATIVE_SUM * sum
        {
            return Probability::converged(sum);
        }
        factor = -factor;
        previous_term = term.abs();
    }

    Probability::failed(1.0)
}
