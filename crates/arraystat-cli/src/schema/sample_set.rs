use arraystat_stats::group::SampleGroup;
use serde::{Deserialize, Serialize};

/// Sample groups loaded from an input JSON file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SampleSet {
    pub groups: Vec<SampleGroup>,
}

impl SampleSet {
    /// Picks the two groups to compare.
    ///
    /// With `conditions` given, the first group of each listed condition is used;
    /// otherwise the first two groups in the file.
    pub(crate) fn select_pair(
        &self,
        conditions: Option<&[u32]>,
    ) -> anyhow::Result<(&SampleGroup, &SampleGroup)> {
        match conditions {
            Some(&[first, second]) => Ok((self.find(first)?, self.find(second)?)),
            Some(other) => anyhow::bail!("expected two conditions, got {}", other.len()),
            None => match self.groups.as_slice() {
                [first, second, ..] => Ok((first, second)),
                _ => anyhow::bail!(
                    "two sample groups are required, input has {}",
                    self.groups.len()
                ),
            },
        }
    }

    fn find(&self, condition: u32) -> anyhow::Result<&SampleGroup> {
        self.groups
            .iter()
            .find(|g| g.condition == condition)
            .ok_or_else(|| anyhow::anyhow!("condition {condition} not found in input"))
    }
}
