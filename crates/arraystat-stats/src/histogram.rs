use serde::Serialize;

use crate::error::{self, InputError};

/// A fixed-bin-count histogram with summary statistics derived from it.
///
/// Bins have equal width and span `min..=max` of the data; the last bin also
/// holds the maximum value itself. The median and mode are read off the binned
/// counts, so they are resolved to the start of a bin rather than to an exact
/// order statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Number of values falling into each bin. The counts sum to the input length.
    pub bins: Vec<u64>,
    /// Bins per unit value, `bins.len() / (max - min)`. Infinite for constant data.
    pub bin_width: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation, `0` for a single value.
    pub std_dev: f64,
    /// Mean absolute deviation from the mean.
    pub mean_abs_dev: f64,
    /// Bin where the running count first reaches half the input length.
    pub median_index: usize,
    pub median_value: f64,
    /// First bin holding the largest count.
    pub mode_index: usize,
    pub mode_value: f64,
}

impl Histogram {
    /// Builds a histogram of `values` with `bin_count` equal-width bins.
    ///
    /// An empty input or `bin_count == 0` yields an empty histogram with no bins.
    ///
    /// # Arguments
    ///
    /// * `values` - The data points to bin, in any order.
    /// * `bin_count` - The number of bins.
    ///
    /// # Examples
    ///
    /// ```
    /// # use arraystat_stats::histogram::Histogram;
    /// let histogram = Histogram::new(&[1.0, 1.0, 1.0, 2.0, 2.0, 3.0], 3);
    /// assert_eq!(histogram.bins, vec![3, 2, 1]);
    /// assert_eq!(histogram.bin_width, 1.5);
    /// assert_eq!(histogram.median_value, 1.0);
    /// assert_eq!(histogram.mode_value, 1.0);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn new(values: &[f64], bin_count: usize) -> Self {
        if values.is_empty() || bin_count == 0 {
            return Self::empty();
        }

        let n = values.len();
        let (min, max, sum) = values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &v| (min.min(v), max.max(v), sum + v),
        );
        let mean = sum / n as f64;

        let range = max - min;
        let bin_width = if range > 0.0 {
            bin_count as f64 / range
        } else {
            f64::INFINITY
        };

        let mut bins = vec![0; bin_count];
        for &v in values {
            let idx = if range > 0.0 {
                ((v - min) * bin_width).floor() as usize
            } else {
                0
            };
            // The maximum lands exactly on the upper edge of the last bin.
            bins[idx.min(bin_count - 1)] += 1;
        }

        let (abs_dev_sum, sq_dev_sum) = values.iter().fold((0.0, 0.0), |(abs, sq), &v| {
            let dev = mean - v;
            (abs + dev.abs(), sq + dev * dev)
        });
        let mean_abs_dev = abs_dev_sum / n as f64;
        let std_dev = if n < 2 {
            0.0
        } else {
            (sq_dev_sum / (n - 1) as f64).sqrt()
        };

        let half = (n / 2) as u64;
        let median_index = bins
            .iter()
            .scan(0, |cumulative, &count| {
                *cumulative += count;
                Some(*cumulative)
            })
            .position(|cumulative| cumulative >= half)
            .unwrap_or(bin_count - 1);
        let (mode_index, _) = bins.iter().enumerate().fold(
            (0, 0),
            |(best_idx, best_count), (idx, &count)| {
                if count > best_count {
                    (idx, count)
                } else {
                    (best_idx, best_count)
                }
            },
        );

        let to_value = |idx: usize| idx as f64 / bin_width + min;

        Self {
            bins,
            bin_width,
            min,
            max,
            mean,
            std_dev,
            mean_abs_dev,
            median_index,
            median_value: to_value(median_index),
            mode_index,
            mode_value: to_value(mode_index),
        }
    }

    /// Builds a histogram of the first `n` entries of an oversized buffer.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::CountExceedsData`] if `n > data.len()`.
    pub fn from_prefix(data: &[f64], n: usize, bin_count: usize) -> Result<Self, InputError> {
        Ok(Self::new(error::valid_prefix(data, n)?, bin_count))
    }

    fn empty() -> Self {
        Self {
            bins: vec![],
            bin_width: 0.0,
            min: 0.0,
            max: 0.0,
            mean: 0.0,
            std_dev: 0.0,
            mean_abs_dev: 0.0,
            median_index: 0,
            median_value: 0.0,
            mode_index: 0,
            mode_value: 0.0,
        }
    }

    /// Number of bins, `0` for an empty histogram.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Total number of values counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Lower edge of bin `idx` in value space.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn bin_start(&self, idx: usize) -> f64 {
        idx as f64 / self.bin_width + self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_small_integer_sample() {
        let histogram = Histogram::new(&[1.0, 1.0, 1.0, 2.0, 2.0, 3.0], 3);
        assert_eq!(histogram.bins, vec![3, 2, 1]);
        assert_eq!(histogram.min, 1.0);
        assert_eq!(histogram.max, 3.0);
        assert_close(histogram.mean, 5.0 / 3.0);
        assert_close(histogram.mean_abs_dev, 2.0 / 3.0);
        assert_close(histogram.std_dev, (2.0_f64 / 3.0).sqrt());
        // n / 2 = 3 is reached exactly at the end of the first bin.
        assert_eq!(histogram.median_index, 0);
        assert_eq!(histogram.median_value, 1.0);
        assert_eq!(histogram.mode_index, 0);
    }

    #[test]
    fn test_median_moves_past_boundary() {
        let histogram = Histogram::new(&[1.0, 1.0, 2.0, 2.0, 2.0, 3.0], 3);
        assert_eq!(histogram.bins, vec![2, 3, 1]);
        assert_eq!(histogram.median_index, 1);
        assert_close(histogram.median_value, 1.0 / 1.5 + 1.0);
        assert_eq!(histogram.mode_index, 1);
    }

    #[test]
    fn test_mode_ties_prefer_lowest_bin() {
        let histogram = Histogram::new(&[0.0, 0.5, 3.5, 4.0], 4);
        assert_eq!(histogram.bins, vec![2, 0, 0, 2]);
        assert_eq!(histogram.mode_index, 0);
        assert_eq!(histogram.mode_value, 0.0);
    }

    #[test]
    fn test_counts_sum_to_input_length() {
        let inputs: [&[f64]; 4] = [
            &[0.1, 0.2, 0.3, 0.7, 0.9, 1.0],
            &[-5.0, 5.0],
            &[1e-3, 2e-3, 3e-3, 4e-3, 5e-3, 6e-3, 7e-3],
            &[3.3, 1.1, 2.2, 9.9, 0.0, 4.4, 4.4, 7.7],
        ];
        for values in inputs {
            for bin_count in [1, 2, 3, 7, 64] {
                let histogram = Histogram::new(values, bin_count);
                assert_eq!(histogram.bin_count(), bin_count);
                assert_eq!(histogram.total(), values.len() as u64);
                assert!(values.iter().all(|v| (histogram.min..=histogram.max).contains(v)));
            }
        }
    }

    #[test]
    fn test_recomputation_is_identical() {
        let values = [4.2, 1.7, 9.3, 2.2, 2.8, 7.5, 5.0];
        assert_eq!(Histogram::new(&values, 5), Histogram::new(&values, 5));
    }

    #[test]
    fn test_constant_data_fills_first_bin() {
        let histogram = Histogram::new(&[2.5; 4], 5);
        assert_eq!(histogram.bins, vec![4, 0, 0, 0, 0]);
        assert_eq!(histogram.mean, 2.5);
        assert_eq!(histogram.std_dev, 0.0);
        assert_eq!(histogram.median_value, 2.5);
        assert_eq!(histogram.mode_value, 2.5);
    }

    #[test]
    fn test_single_value() {
        let histogram = Histogram::new(&[7.0], 3);
        assert_eq!(histogram.total(), 1);
        assert_eq!(histogram.std_dev, 0.0);
        assert_eq!(histogram.mean_abs_dev, 0.0);
    }

    #[test]
    fn test_empty_input() {
        let histogram = Histogram::new(&[], 10);
        assert_eq!(histogram.bin_count(), 0);
        assert_eq!(histogram.total(), 0);
        assert_eq!(Histogram::new(&[1.0, 2.0], 0).bin_count(), 0);
    }

    #[test]
    fn test_bin_start_maps_back_to_values() {
        let histogram = Histogram::new(&[0.0, 10.0], 5);
        assert_eq!(histogram.bin_width, 0.5);
        assert_eq!(histogram.bin_start(0), 0.0);
        assert_eq!(histogram.bin_start(3), 6.0);
    }

    #[test]
    fn test_prefix() {
        let buffer = [1.0, 2.0, 3.0, f64::NAN];
        let histogram = Histogram::from_prefix(&buffer, 3, 3).unwrap();
        assert_eq!(histogram.bins, vec![1, 1, 1]);
        assert!(Histogram::from_prefix(&buffer, 5, 3).is_err());
    }
}
