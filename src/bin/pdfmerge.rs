use clap::Parser;
use std::process::ExitCode;
use tidydesk::cli::{MergeArgs, run_merge};

fn main() -> ExitCode {
    run_merge(MergeArgs::parse())
}
