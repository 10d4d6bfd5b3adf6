use clap::Parser;
use std::process::ExitCode;
use tidydesk::cli::{ResizeArgs, run_resize};

fn main() -> ExitCode {
    run_resize(ResizeArgs::parse())
}
