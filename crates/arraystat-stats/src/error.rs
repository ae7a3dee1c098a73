/// Errors raised when a caller's buffer does not match the length it declared.
///
/// Statistical degeneracies (too few samples, zero variance, numerical failure)
/// are not errors; they are reported through the `success` flag of each result.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InputError {
    #[display("declared count {count} exceeds the {len} values supplied")]
    CountExceedsData { count: usize, len: usize },
    #[display("{buffers} condition buffers but {counts} counts")]
    ConditionCountMismatch { buffers: usize, counts: usize },
}

/// Returns the first `count` values of `data`.
pub(crate) fn valid_prefix(data: &[f64], count: usize) -> Result<&[f64], InputError> {
    data.get(..count).ok_or(InputError::CountExceedsData {
        count,
        len: data.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_within_bounds() {
        let data = [1.0, 2.0, 3.0];
        assert_eq!(valid_prefix(&data, 2).unwrap(), &[1.0, 2.0]);
        assert!(valid_prefix(&data, 0).unwrap().is_empty());
    }

    #[test]
    fn test_prefix_past_end() {
        let err = valid_prefix(&[1.0], 4).unwrap_err();
        assert_eq!(err, InputError::CountExceedsData { count: 4, len: 1 });
        assert_eq!(
            err.to_string(),
            "declared count 4 exceeds the 1 values supplied"
        );
    }
}
