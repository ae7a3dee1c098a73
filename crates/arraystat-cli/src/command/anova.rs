use arraystat_stats::anova::{self, AnovaResult};
use clap::Args;
use serde::Serialize;

use crate::{command::IoArg, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct AnovaArg {
    #[clap(flatten)]
    pub io: IoArg,
}

#[derive(Debug, Serialize)]
struct AnovaReport {
    conditions: Vec<u32>,
    #[serde(flatten)]
    result: AnovaResult,
}

pub(crate) fn run(arg: &AnovaArg) -> anyhow::Result<()> {
    let set = util::read_sample_set_file(&arg.io.input)?;
    let result = anova::f_test_n_conditions(&set.groups);
    if !result.success {
        tracing::warn!(
            conditions = set.groups.len(),
            "ANOVA could not be computed; reporting p = 1"
        );
    }

    let report = AnovaReport {
        conditions: set.groups.iter().map(|g| g.condition).collect(),
        result,
    };
    util::Output::save_json(&report, arg.io.output.clone())
}
