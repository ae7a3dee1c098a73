use arraystat_stats::ks::{self, KsTestResult};
use clap::Args;
use serde::Serialize;

use crate::{command::IoArg, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct KsArg {
    #[clap(flatten)]
    pub io: IoArg,

    /// Condition IDs of the two groups to compare (defaults to the first two groups)
    #[arg(long, value_delimiter = ',', num_args = 1)]
    pub conditions: Option<Vec<u32>>,
}

#[derive(Debug, Serialize)]
struct KsReport {
    conditions: [u32; 2],
    #[serde(flatten)]
    result: KsTestResult,
}

pub(crate) fn run(arg: &KsArg) -> anyhow::Result<()> {
    let set = util::read_sample_set_file(&arg.io.input)?;
    let (a, b) = set.select_pair(arg.conditions.as_deref())?;

    let result = ks::two_sample_ks(&a.values, &b.values);
    if !result.success {
        tracing::warn!(
            condition_a = a.condition,
            condition_b = b.condition,
            "KS test could not be computed; reporting p = 1"
        );
    }

    let report = KsReport {
        conditions: [a.condition, b.condition],
        result,
    };
    util::Output::save_json(&report, arg.io.output.clone())
}
