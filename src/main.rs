use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod paths;
mod phase;
mod report;
mod retrieve;
mod runner;
mod summary;

use cli::{Command, RootArgs};

fn main() -> Result<()> {
    init_tracing();
    let args = RootArgs::parse();

    match args.command {
        Command::Run(args) => runner::run_all(&args),
        Command::Summarize(args) => runner::run_summarize(&args),
        Command::Phases => {
            print_phase_table();
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_phase_table() {
    println!("{:<3} {:<16} {:<28} {}", "#", "Phase", "Manifest", "Target");
    for phase in &phase::PHASES {
        println!(
            "{:<3} {:<16} {:<28} {}",
            phase.ordinal,
            phase.name,
            format!("{}.package.xml", phase.manifest_id),
            phase.target_leaf
        );
    }
}
