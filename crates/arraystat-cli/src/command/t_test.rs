use arraystat_stats::two_sample::{
    self, DEFAULT_VARIANCE_ALPHA, TestSelection, TwoSampleOptions, TwoSampleTestResult,
};
use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::{command::IoArg, util};

/// Which t-test variant to run
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SelectionArg {
    /// Choose by the variance F-test
    #[default]
    Auto,
    /// Student t-test with pooled variance
    Pooled,
    /// Behrens-Fisher t'-test for unequal variances
    BehrensFisher,
}

impl From<SelectionArg> for TestSelection {
    fn from(arg: SelectionArg) -> Self {
        match arg {
            SelectionArg::Auto => TestSelection::Auto,
            SelectionArg::Pooled => TestSelection::Pooled,
            SelectionArg::BehrensFisher => TestSelection::BehrensFisher,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct TTestArg {
    #[clap(flatten)]
    pub io: IoArg,

    /// t-test variant
    #[arg(long, value_enum, default_value_t = SelectionArg::Auto)]
    pub selection: SelectionArg,

    /// One-tailed F-test p-value below which variances count as unequal
    #[arg(long, default_value_t = DEFAULT_VARIANCE_ALPHA)]
    pub variance_alpha: f64,

    /// Condition IDs of the two groups to compare (defaults to the first two groups)
    #[arg(long, value_delimiter = ',', num_args = 1)]
    pub conditions: Option<Vec<u32>>,
}

#[derive(Debug, Serialize)]
struct TTestReport {
    conditions: [u32; 2],
    #[serde(flatten)]
    result: TwoSampleTestResult,
}

pub(crate) fn run(arg: &TTestArg) -> anyhow::Result<()> {
    let set = util::read_sample_set_file(&arg.io.input)?;
    let (a, b) = set.select_pair(arg.conditions.as_deref())?;

    let options = TwoSampleOptions {
        selection: arg.selection.into(),
        variance_alpha: arg.variance_alpha,
    };
    let result = two_sample::compare_samples(&a.values, &b.values, options);
    if !result.success {
        tracing::warn!(
            condition_a = a.condition,
            condition_b = b.condition,
            "t-test could not be computed; reporting p = 1"
        );
    }
    tracing::info!(
        test = %result.test_used,
        t = result.t_statistic,
        p = result.p_value_t,
        "two-sample test finished"
    );

    let report = TTestReport {
        conditions: [a.condition, b.condition],
        result,
    };
    util::Output::save_json(&report, arg.io.output.clone())
}
