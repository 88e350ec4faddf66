mod compute;
mod merge;
mod options;
mod progress;

use anyhow::Result;
use clap::Parser;
use options::Cli;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli {
        Cli::Compute(compute) => compute.run(),
        Cli::Merge(merge) => merge.run(),
    }
}
