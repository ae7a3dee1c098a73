use arraystat_stats::histogram::Histogram;
use clap::Args;
use serde::Serialize;

use crate::{command::IoArg, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct HistogramArg {
    #[clap(flatten)]
    pub io: IoArg,

    /// Number of histogram bins
    #[arg(long, default_value_t = 20)]
    pub bins: usize,
}

#[derive(Debug, Serialize)]
struct HistogramReport<'a> {
    condition: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    histogram: Histogram,
}

pub(crate) fn run(arg: &HistogramArg) -> anyhow::Result<()> {
    let set = util::read_sample_set_file(&arg.io.input)?;
    let reports = set
        .groups
        .iter()
        .map(|group| {
            let histogram = Histogram::new(&group.values, arg.bins);
            if histogram.min == histogram.max && !group.values.is_empty() {
                tracing::warn!(
                    condition = group.condition,
                    "constant data, all values fall into the first bin"
                );
            }
            HistogramReport {
                condition: group.condition,
                label: group.label.as_deref(),
                histogram,
            }
        })
        .collect::<Vec<_>>();
    util::Output::save_json(&reports, arg.io.output.clone())
}
