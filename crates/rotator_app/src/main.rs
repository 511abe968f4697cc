mod cli;
mod config;
mod report;
mod run;

use clap::Parser;
use log::LevelFilter;
use rotator_logging::LogDestination;

use crate::cli::Cli;
use crate::config::AppPaths;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let paths = AppPaths::discover();
    let config = config::resolve(&cli, &paths)?;

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let destination = if config.log_to_file {
        LogDestination::Both(config.log_dir.clone())
    } else {
        LogDestination::Terminal
    };
    rotator_logging::initialize(destination, level);

    run::run(&config)?;
    Ok(())
}
