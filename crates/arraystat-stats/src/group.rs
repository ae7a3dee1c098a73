use serde::{Deserialize, Serialize};

use crate::error::{self, InputError};

/// Measurements of one sample group under a single experimental condition.
///
/// The order of `values` only matters for traceability; none of the tests in
/// this crate depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleGroup {
    /// Condition identifier the group belongs to.
    pub condition: u32,
    /// Optional display label, e.g. a sample or strain name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Per-sample intensity measurements.
    pub values: Vec<f64>,
}

impl SampleGroup {
    #[must_use]
    pub fn new(condition: u32, values: Vec<f64>) -> Self {
        Self {
            condition,
            label: None,
            values,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Summarizes the group's values. See [`GroupSummary::new`].
    #[must_use]
    pub fn summary(&self, compute_std_dev: bool) -> GroupSummary {
        GroupSummary::new(&self.values, compute_std_dev)
    }
}

impl AsRef<[f64]> for SampleGroup {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Count, mean and sample variance of one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupSummary {
    /// Number of samples summarized.
    pub count: usize,
    /// Arithmetic mean, `0` for an empty group.
    pub mean: f64,
    /// Sample variance with Bessel's correction, `0` when `count < 2`.
    pub variance: f64,
    /// Standard deviation, present only when it was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
}

impl GroupSummary {
    /// Computes the summary of all values in the slice.
    ///
    /// The square root for the standard deviation is only taken when
    /// `compute_std_dev` is set. Fewer than two values is not an error: the
    /// variance is reported as `0` and downstream testers check for it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use arraystat_stats::group::GroupSummary;
    /// let summary = GroupSummary::new(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], true);
    /// assert_eq!(summary.mean, 5.0);
    /// assert!((summary.variance - 32.0 / 7.0).abs() < 1e-12);
    /// assert!(summary.std_dev.is_some());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(values: &[f64], compute_std_dev: bool) -> Self {
        let count = values.len();
        let mean = if count == 0 {
            0.0
        } else {
            values.iter().sum::<f64>() / count as f64
        };
        let variance = if count < 2 {
            0.0
        } else {
            values.iter().map(|v| (mean - v).powi(2)).sum::<f64>() / (count - 1) as f64
        };
        let std_dev = compute_std_dev.then(|| variance.sqrt());

        Self {
            count,
            mean,
            variance,
            std_dev,
        }
    }

    /// Computes the summary of the first `count` entries of an oversized buffer.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::CountExceedsData`] if `count > data.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use arraystat_stats::group::GroupSummary;
    /// let buffer = [1.0, 3.0, 0.0, 0.0];
    /// let summary = GroupSummary::from_prefix(&buffer, 2, false).unwrap();
    /// assert_eq!(summary.mean, 2.0);
    /// assert!(GroupSummary::from_prefix(&buffer, 5, false).is_err());
    /// ```
    pub fn from_prefix(
        data: &[f64],
        count: usize,
        compute_std_dev: bool,
    ) -> Result<Self, InputError> {
        let values = error::valid_prefix(data, count)?;
        Ok(Self::new(values, compute_std_dev))
    }

    /// The standard deviation, computing it if it was not requested up front.
    #[must_use]
    pub fn std_dev_or_compute(&self) -> f64 {
        self.std_dev.unwrap_or_else(|| self.variance.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textbook_example() {
        let summary = GroupSummary::new(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], true);
        assert_eq!(summary.count, 8);
        assert_eq!(summary.mean, 5.0);
        assert!((summary.variance - 4.571_428_571).abs() < 1e-9);
        let std_dev = summary.std_dev.unwrap();
        assert!((std_dev - 2.138_089_935).abs() < 1e-9);
    }

    #[test]
    fn test_std_dev_only_on_request() {
        let summary = GroupSummary::new(&[1.0, 2.0, 3.0], false);
        assert_eq!(summary.std_dev, None);
        assert_eq!(summary.std_dev_or_compute(), 1.0);
    }

    #[test]
    fn test_empty_group() {
        let summary = GroupSummary::new(&[], true);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, 0.0);
        assert_eq!(summary.variance, 0.0);
        assert_eq!(summary.std_dev, Some(0.0));
    }

    #[test]
    fn test_single_value_has_zero_variance() {
        let summary = GroupSummary::new(&[42.0], false);
        assert_eq!(summary.mean, 42.0);
        assert_eq!(summary.variance, 0.0);
    }

    #[test]
    fn test_variance_is_non_negative() {
        let groups: [&[f64]; 4] = [
            &[1.0, 1.0],
            &[-3.0, 7.5, 0.25],
            &[1e9, 1e9 + 1.0, 1e9 - 1.0],
            &[0.1, 0.2, 0.3, 0.4, 0.5],
        ];
        for values in groups {
            assert!(GroupSummary::new(values, false).variance >= 0.0);
        }
    }

    #[test]
    fn test_prefix_ignores_trailing_buffer() {
        let buffer = [2.0, 4.0, 100.0, -100.0];
        let summary = GroupSummary::from_prefix(&buffer, 2, false).unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, 3.0);
        assert_eq!(summary.variance, 2.0);
    }

    #[test]
    fn test_prefix_count_too_large() {
        assert_eq!(
            GroupSummary::from_prefix(&[1.0], 2, false),
            Err(InputError::CountExceedsData { count: 2, len: 1 })
        );
    }

    #[test]
    fn test_sample_group_deserializes_without_label() {
        let group: SampleGroup =
            serde_json::from_str(r#"{"condition": 3, "values": [1.0, 2.5]}"#).unwrap();
        assert_eq!(group, SampleGroup::new(3, vec![1.0, 2.5]));
        assert_eq!(group.summary(false).mean, 1.75);
    }
}
