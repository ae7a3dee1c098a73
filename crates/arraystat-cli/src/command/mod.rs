use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{
    anova::AnovaArg, histogram::HistogramArg, ks::KsArg, summary::SummaryArg, t_test::TTestArg,
};

mod anova;
mod histogram;
mod ks;
mod summary;
mod t_test;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v for debug, -vv for trace). `RUST_LOG` takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// What analysis to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Summarize each sample group (count, mean, variance)
    Summary(#[clap(flatten)] SummaryArg),
    /// Compare two groups with the adaptive two-sample t-test
    TTest(#[clap(flatten)] TTestArg),
    /// Test all groups for equal means with one-way ANOVA
    Anova(#[clap(flatten)] AnovaArg),
    /// Compare two groups with the Kolmogorov-Smirnov test
    Ks(#[clap(flatten)] KsArg),
    /// Build a histogram for each sample group
    Histogram(#[clap(flatten)] HistogramArg),
}

/// Input and output paths shared by every command
#[derive(Debug, Clone, Args)]
pub(crate) struct IoArg {
    /// Path to the sample groups JSON file
    pub input: PathBuf,

    /// Write the JSON result to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);
    match args.mode {
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::TTest(arg) => t_test::run(&arg)?,
        Mode::Anova(arg) => anova::run(&arg)?,
        Mode::Ks(arg) => ks::run(&arg)?,
        Mode::Histogram(arg) => histogram::run(&arg)?,
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
