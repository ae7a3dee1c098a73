//! Adaptive two-sample t-test.
//!
//! The variance F-test decides between Student's pooled t-test and the
//! Behrens-Fisher t'-test with Satterthwaite degrees of freedom, following
//! Snedecor & Cochran.
//!
//! # Examples
//!
//! ```
//! use arraystat_stats::two_sample::{self, TTestKind, TwoSampleOptions};
//!
//! let result = two_sample::compare_two_groups(5, 5, 10.0, 20.0, 2.0, 2.0, TwoSampleOptions::default());
//! assert_eq!(result.test_used, TTestKind::Pooled);
//! assert_eq!(result.degrees_of_freedom, 8.0);
//! assert!(result.p_value_t < 0.001);
//! ```

use arraystat_numerics::beta::beta_incomplete;
use serde::{Deserialize, Serialize};

use crate::group::GroupSummary;

/// One-tailed F-test p-value below which the variances are treated as unequal.
pub const DEFAULT_VARIANCE_ALPHA: f64 = 0.05;

/// The t-test variant that produced a [`TwoSampleTestResult`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum TTestKind {
    /// Student's t-test with pooled variance and `n1 + n2 - 2` degrees of freedom.
    #[display("Student pooled t-test")]
    Pooled,
    /// Unequal-variance t'-test with Satterthwaite degrees of freedom.
    #[display("Behrens-Fisher t'-test")]
    BehrensFisher,
}

/// How [`compare_two_groups`] chooses the t-test variant.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestSelection {
    /// Pick by the variance F-test.
    #[default]
    Auto,
    /// Always use the pooled Student t-test.
    Pooled,
    /// Always use the Behrens-Fisher t'-test.
    BehrensFisher,
}

/// Options for the two-sample test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoSampleOptions {
    pub selection: TestSelection,
    /// Threshold on the one-tailed variance F-test p-value used by [`TestSelection::Auto`].
    pub variance_alpha: f64,
}

impl Default for TwoSampleOptions {
    fn default() -> Self {
        Self {
            selection: TestSelection::Auto,
            variance_alpha: DEFAULT_VARIANCE_ALPHA,
        }
    }
}

/// Outcome of the F-test for equality of two variances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VarianceFTest {
    /// Ratio of the larger variance to the smaller one, always `>= 1` on success.
    pub f_statistic: f64,
    /// Degrees of freedom of the group with the larger variance.
    pub df_numerator: usize,
    /// Degrees of freedom of the group with the smaller variance.
    pub df_denominator: usize,
    /// Two-tailed p-value, `1` on failure.
    pub p_value: f64,
    pub success: bool,
}

/// Outcome of the two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TwoSampleTestResult {
    /// Variance ratio from the homogeneity F-test.
    pub f_statistic: f64,
    /// One-tailed p-value of the homogeneity F-test.
    pub p_value_f: f64,
    pub test_used: TTestKind,
    pub t_statistic: f64,
    /// Real-valued for the Behrens-Fisher test.
    pub degrees_of_freedom: f64,
    /// Two-tailed p-value of the t-test.
    pub p_value_t: f64,
    pub success: bool,
}

impl TwoSampleTestResult {
    #[expect(clippy::cast_precision_loss)]
    fn worst_case(n1: usize, n2: usize) -> Self {
        Self {
            f_statistic: 0.0,
            p_value_f: 1.0,
            test_used: TTestKind::Pooled,
            t_statistic: 0.0,
            degrees_of_freedom: (n1 + n2).saturating_sub(2) as f64,
            p_value_t: 1.0,
            success: false,
        }
    }
}

/// F-test for the equality of two variances.
///
/// Fails with `p_value = 1` unless both counts and both variances are positive,
/// which downstream forces the pooled t-test.
///
/// # Examples
///
/// ```
/// # use arraystat_stats::two_sample::f_test_for_equal_variances;
/// let a = f_test_for_equal_variances(6, 9, 2.0, 8.0);
/// let b = f_test_for_equal_variances(9, 6, 8.0, 2.0);
/// assert_eq!(a.f_statistic, 4.0);
/// assert_eq!(a, b);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn f_test_for_equal_variances(n1: usize, n2: usize, var1: f64, var2: f64) -> VarianceFTest {
    let valid = n1 > 0 && n2 > 0 && var1 > 0.0 && var2 > 0.0;
    if !valid {
        tracing::debug!(n1, n2, var1, var2, "variance F-test needs positive counts and variances");
        return VarianceFTest {
            f_statistic: 0.0,
            df_numerator: n1.saturating_sub(1),
            df_denominator: n2.saturating_sub(1),
            p_value: 1.0,
            success: false,
        };
    }

    let (f_statistic, df_numerator, df_denominator) = if var1 > var2 {
        (var1 / var2, n1 - 1, n2 - 1)
    } else {
        (var2 / var1, n2 - 1, n1 - 1)
    };

    let df_num = df_numerator as f64;
    let df_den = df_denominator as f64;
    let beta = beta_incomplete(
        0.5 * df_den,
        0.5 * df_num,
        df_den / (df_den + df_num * f_statistic),
    );

    let mut p_value = 2.0 * beta.value;
    let mut success = true;
    if !beta.success || p_value < 0.0 {
        tracing::debug!(f_statistic, df_num, df_den, "variance F-test p-value unavailable");
        p_value = 1.0;
        success = false;
    } else if p_value > 1.0 {
        p_value = 2.0 - p_value;
    }

    VarianceFTest {
        f_statistic,
        df_numerator,
        df_denominator,
        p_value,
        success,
    }
}

/// Two-sample t-test on group sizes, means and standard deviations.
///
/// Needs `n1 >= 2`, `n2 >= 2` and non-zero standard deviations; otherwise the
/// worst-case result (`p_value_t = p_value_f = 1`, `success = false`) is returned.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn compare_two_groups(
    n1: usize,
    n2: usize,
    m1: f64,
    m2: f64,
    s1: f64,
    s2: f64,
    options: TwoSampleOptions,
) -> TwoSampleTestResult {
    if n1 < 2 || n2 < 2 || s1 == 0.0 || s2 == 0.0 {
        tracing::debug!(n1, n2, s1, s2, "two-sample test needs two samples and spread per group");
        return TwoSampleTestResult::worst_case(n1, n2);
    }

    let var1 = s1 * s1;
    let var2 = s2 * s2;
    let f_test = f_test_for_equal_variances(n1, n2, var1, var2);
    let p_value_f = if f_test.success {
        0.5 * f_test.p_value
    } else {
        f_test.p_value
    };

    let test_used = match options.selection {
        TestSelection::Auto if f_test.success && p_value_f < options.variance_alpha => {
            TTestKind::BehrensFisher
        }
        TestSelection::Auto | TestSelection::Pooled => TTestKind::Pooled,
        TestSelection::BehrensFisher => TTestKind::BehrensFisher,
    };
    tracing::trace!(%test_used, f = f_test.f_statistic, p_value_f, "selected t-test");

    let n1 = n1 as f64;
    let n2 = n2 as f64;
    let (degrees_of_freedom, t_statistic) = match test_used {
        TTestKind::BehrensFisher => {
            let vb1 = var1 / n1;
            let vb2 = var2 / n2;
            let df = (vb1 + vb2).powi(2) / (vb1.powi(2) / (n1 - 1.0) + vb2.powi(2) / (n2 - 1.0));
            (df, (m1 - m2) / (vb1 + vb2).sqrt())
        }
        TTestKind::Pooled => {
            let df = n1 + n2 - 2.0;
            let pooled_variance = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / df;
            let t = (m1 - m2) / (pooled_variance * (1.0 / n1 + 1.0 / n2)).sqrt();
            (df, t)
        }
    };

    let beta = beta_incomplete(
        0.5 * degrees_of_freedom,
        0.5,
        degrees_of_freedom / (degrees_of_freedom + t_statistic * t_statistic),
    );
    let (p_value_t, success) = if beta.success && beta.value <= 1.0 {
        (beta.value, true)
    } else {
        tracing::debug!(t_statistic, degrees_of_freedom, "t-test p-value unavailable");
        (1.0, false)
    };

    TwoSampleTestResult {
        f_statistic: f_test.f_statistic,
        p_value_f,
        test_used,
        t_statistic,
        degrees_of_freedom,
        p_value_t,
        success,
    }
}

/// Two-sample t-test on precomputed group summaries.
#[must_use]
pub fn compare_summaries(
    a: &GroupSummary,
    b: &GroupSummary,
    options: TwoSampleOptions,
) -> TwoSampleTestResult {
    compare_two_groups(
        a.count,
        b.count,
        a.mean,
        b.mean,
        a.std_dev_or_compute(),
        b.std_dev_or_compute(),
        options,
    )
}

/// Two-sample t-test on raw measurements.
///
/// # Examples
///
/// ```
/// # use arraystat_stats::two_sample::{compare_samples, TwoSampleOptions};
/// let control = [10.1, 9.8, 10.3, 9.9, 10.0];
/// let treated = [12.2, 11.9, 12.4, 12.0, 12.1];
/// let result = compare_samples(&control, &treated, TwoSampleOptions::default());
/// assert!(result.success);
/// assert!(result.p_value_t < 0.001);
/// ```
#[must_use]
pub fn compare_samples(a: &[f64], b: &[f64], options: TwoSampleOptions) -> TwoSampleTestResult {
    compare_summaries(
        &GroupSummary::new(a, true),
        &GroupSummary::new(b, true),
        options,
    )
}
