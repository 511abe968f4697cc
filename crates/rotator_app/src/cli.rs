use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use rotator_core::CategoryFilter;

#[derive(Debug, Parser)]
#[command(
    name = "jobsites",
    version,
    about = "Open a fair rotation of job-search sites, favouring the least recently visited"
)]
pub struct Cli {
    /// Config file (defaults to config.ron in the user config directory).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Maximum number of URLs to open this run.
    #[arg(short, long)]
    pub budget: Option<usize>,

    /// Site catalog file.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Saved queue file.
    #[arg(long, value_name = "PATH")]
    pub state: Option<PathBuf>,

    /// Only open sites of this category.
    #[arg(long, value_enum, default_value_t = FilterArg::All)]
    pub filter: FilterArg,

    /// Output format for the run report.
    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    pub format: ReportFormat,

    /// Select and report without opening anything or saving the queue.
    #[arg(long)]
    pub dry_run: bool,

    /// Also write the log to rotator.log in the data directory.
    #[arg(long)]
    pub log_file: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    All,
    Jobboards,
    Organizations,
}

impl From<FilterArg> for CategoryFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => CategoryFilter::All,
            FilterArg::Jobboards => CategoryFilter::JobBoards,
            FilterArg::Organizations => CategoryFilter::Organizations,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Table,
    Markdown,
}
