//! Hypothesis tests and histogram analysis for per-sample intensity data.
//!
//! This crate provides the statistical engine behind arraystat:
//!
//! - **Group statistics**: count, mean, sample variance and standard deviation of one group
//! - **Two-sample t-test**: Student or Behrens-Fisher, chosen by a variance F-test
//! - **ANOVA**: one-way F-test across N conditions
//! - **Kolmogorov-Smirnov**: two-sample comparison of empirical distributions
//! - **Histogram**: fixed-bin-count histogram with mean, median, mode and dispersion
//!
//! Every operation is a pure function returning a fresh result record. Tests
//! never fail with an error: when the data cannot support a verdict (too few
//! samples, zero variance, a numerical primitive that did not converge) the
//! result carries `p_value = 1` and `success = false`.
//!
//! # Modules
//!
//! - [`group`]: Sample groups and their summaries
//! - [`two_sample`]: Variance F-test and adaptive two-sample t-test
//! - [`anova`]: N-condition ANOVA F-test
//! - [`ks`]: Two-sample Kolmogorov-Smirnov test
//! - [`histogram`]: Histogram construction and derived statistics
//! - [`error`]: Input validation errors for prefix-length APIs
//!
//! # Examples
//!
//! ## Summarizing a group
//!
//! ```
//! use arraystat_stats::group::GroupSummary;
//!
//! let summary = GroupSummary::new(&[1.0, 2.0, 3.0, 4.0, 5.0], true);
//! assert_eq!(summary.mean, 3.0);
//! assert_eq!(summary.variance, 2.5);
//! ```
//!
//! ## Comparing two conditions
//!
//! ```
//! use arraystat_stats::two_sample::{compare_samples, TwoSampleOptions};
//!
//! let control = [5.1, 4.9, 5.3, 5.0, 4.8];
//! let treated = [6.2, 6.0, 6.5, 6.1, 6.3];
//! let result = compare_samples(&control, &treated, TwoSampleOptions::default());
//! assert!(result.success && result.p_value_t < 0.001);
//! ```
//!
//! ## Testing N conditions
//!
//! ```
//! use arraystat_stats::anova::f_test_n_conditions;
//!
//! let conditions = [vec![1.0, 2.0, 3.0], vec![2.0, 3.0, 4.0], vec![9.0, 10.0, 11.0]];
//! let result = f_test_n_conditions(&conditions);
//! assert!(result.p_value < 0.01);
//! ```
//!
//! ## Building a histogram
//!
//! ```
//! use arraystat_stats::histogram::Histogram;
//!
//! let histogram = Histogram::new(&[1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0], 4);
//! assert_eq!(histogram.total(), 7);
//! ```

pub mod anova;
pub mod error;
pub mod group;
pub mod histogram;
pub mod ks;
pub mod two_sample;

pub use self::error::InputError;
