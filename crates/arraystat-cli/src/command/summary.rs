use arraystat_stats::group::GroupSummary;
use clap::Args;
use serde::Serialize;

use crate::{command::IoArg, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct SummaryArg {
    #[clap(flatten)]
    pub io: IoArg,

    /// Also compute the standard deviation of each group
    #[arg(long)]
    pub std_dev: bool,
}

#[derive(Debug, Serialize)]
struct GroupReport<'a> {
    condition: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    #[serde(flatten)]
    summary: GroupSummary,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let set = util::read_sample_set_file(&arg.io.input)?;
    let reports = set
        .groups
        .iter()
        .map(|group| GroupReport {
            condition: group.condition,
            label: group.label.as_deref(),
            summary: group.summary(arg.std_dev),
        })
        .collect::<Vec<_>>();
    util::Output::save_json(&reports, arg.io.output.clone())
}
