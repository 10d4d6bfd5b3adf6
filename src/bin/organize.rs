use clap::Parser;
use std::process::ExitCode;
use tidydesk::cli::{OrganizeArgs, run_organize};

fn main() -> ExitCode {
    run_organize(OrganizeArgs::parse())
}
