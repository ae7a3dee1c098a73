//! One-way analysis of variance across N conditions.

use arraystat_numerics::beta::beta_incomplete;
use serde::Serialize;

use crate::{
    error::{self, InputError},
    group::GroupSummary,
};

/// Outcome of the N-condition ANOVA F-test.
///
/// Degrees of freedom and the F statistic are reported as computed, before the
/// `F < 1` fold-back applied for the p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnovaResult {
    pub f_statistic: f64,
    pub mean_square_within: f64,
    pub mean_square_between: f64,
    /// `total_count - num_conditions`
    pub df_within: usize,
    /// `num_conditions - 1`
    pub df_between: usize,
    pub p_value: f64,
    pub success: bool,
}

impl AnovaResult {
    const FAILED: Self = Self {
        f_statistic: 0.0,
        mean_square_within: 0.0,
        mean_square_between: 0.0,
        df_within: 0,
        df_between: 0,
        p_value: 1.0,
        success: false,
    };
}

/// Tests the null hypothesis that all condition means are equal.
///
/// Every condition needs at least two samples and at least two conditions are
/// required; a single under-populated condition invalidates the whole test.
/// Zero within-group variation also fails, since the F ratio is undefined.
///
/// # Examples
///
/// ```
/// # use arraystat_stats::anova::f_test_n_conditions;
/// let groups = [vec![1.0, 2.0, 3.0], vec![11.0, 12.0, 13.0], vec![21.0, 22.0, 23.0]];
/// let result = f_test_n_conditions(&groups);
/// assert!(result.success);
/// assert_eq!(result.f_statistic, 300.0);
/// assert_eq!((result.df_between, result.df_within), (2, 6));
/// assert!(result.p_value < 0.01);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn f_test_n_conditions<G>(groups: &[G]) -> AnovaResult
where
    G: AsRef<[f64]>,
{
    let num_conditions = groups.len();
    if num_conditions < 2 {
        tracing::debug!(num_conditions, "ANOVA needs at least two conditions");
        return AnovaResult::FAILED;
    }

    let summaries = groups
        .iter()
        .map(|g| GroupSummary::new(g.as_ref(), false))
        .collect::<Vec<_>>();
    if let Some(condition) = summaries.iter().position(|s| s.count < 2) {
        tracing::debug!(condition, "ANOVA condition has fewer than two samples");
        return AnovaResult::FAILED;
    }

    let total_count = summaries.iter().map(|s| s.count).sum::<usize>();
    let global_mean = summaries
        .iter()
        .map(|s| s.mean * s.count as f64)
        .sum::<f64>()
        / total_count as f64;

    let sum_sq_between = summaries
        .iter()
        .map(|s| (s.mean - global_mean).powi(2) * s.count as f64)
        .sum::<f64>();
    let sum_sq_within = summaries
        .iter()
        .map(|s| s.variance * (s.count - 1) as f64)
        .sum::<f64>();

    let df_within = total_count - num_conditions;
    let df_between = num_conditions - 1;
    let mean_square_within = sum_sq_within / df_within as f64;
    if mean_square_within == 0.0 {
        tracing::debug!("ANOVA within-group mean square is zero");
        return AnovaResult::FAILED;
    }
    let mean_square_between = sum_sq_between / df_between as f64;
    let f_statistic = mean_square_between / mean_square_within;

    let (p_value, success) = f_p_value(f_statistic, df_between, df_within);

    AnovaResult {
        f_statistic,
        mean_square_within,
        mean_square_between,
        df_within,
        df_between,
        p_value,
        success,
    }
}

/// Like [`f_test_n_conditions`], reading only the first `counts[k]` values of condition `k`.
///
/// # Errors
///
/// Returns an [`InputError`] if `counts` and `data` differ in length or a count
/// exceeds its buffer.
pub fn f_test_n_conditions_with_counts<G>(
    data: &[G],
    counts: &[usize],
) -> Result<AnovaResult, InputError>
where
    G: AsRef<[f64]>,
{
    if data.len() != counts.len() {
        return Err(InputError::ConditionCountMismatch {
            buffers: data.len(),
            counts: counts.len(),
        });
    }
    let prefixes = data
        .iter()
        .zip(counts)
        .map(|(buffer, &count)| error::valid_prefix(buffer.as_ref(), count))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(f_test_n_conditions(&prefixes))
}

/// Two-tailed p-value for an F statistic.
///
/// An F below 1 is inverted and its degrees of freedom swapped first so the
/// beta-function argument stays in its stable domain. The ANOVA form of the
/// beta call takes the between-group degrees of freedom first:
/// `2·I(dfB/2, dfW/2, dfB/(dfB + dfW·F))`.
///
/// `F == 0` reports `p = 1` directly, while any positive F below 1 goes
/// through the swap; the p-value is therefore discontinuous at zero.
#[expect(clippy::cast_precision_loss)]
fn f_p_value(f_statistic: f64, df_between: usize, df_within: usize) -> (f64, bool) {
    // Identical condition means: there is no between-group variation to test.
    if f_statistic == 0.0 {
        return (1.0, true);
    }

    let (f, df_between, df_within) = if f_statistic < 1.0 {
        (1.0 / f_statistic, df_within, df_between)
    } else {
        (f_statistic, df_between, df_within)
    };
    let df_between = df_between as f64;
    let df_within = df_within as f64;

    let beta = beta_incomplete(
        0.5 * df_between,
        0.5 * df_within,
        df_between / (df_between + df_within * f),
    );
    let p_value = 2.0 * beta.value;
    if !beta.success || p_value < 0.0 {
        tracing::debug!(f_statistic, df_between, df_within, "ANOVA p-value unavailable");
        return (1.0, false);
    }
    if p_value > 1.0 {
        (2.0 - p_value, true)
    } else {
        (p_value, true)
    }
}
