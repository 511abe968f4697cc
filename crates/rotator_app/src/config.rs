//! Run configuration: optional RON config file, overridden by CLI flags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rotator_core::CategoryFilter;
use rotator_engine::DEFAULT_QUEUE_FILENAME;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::{Cli, ReportFormat};

pub const CONFIG_FILENAME: &str = "config.ron";
pub const CATALOG_FILENAME: &str = "catalog.ron";
pub const DEFAULT_BUDGET: usize = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("budget must be at least 1")]
    ZeroBudget,
}

/// Contents of `config.ron`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub budget: usize,
    pub catalog_path: Option<PathBuf>,
    pub state_path: Option<PathBuf>,
    pub log_to_file: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            catalog_path: None,
            state_path: None,
            log_to_file: false,
        }
    }
}

/// Per-user directories for config and data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// Platform directories for `jobsites`, or the working directory if the
    /// platform has none.
    pub fn discover() -> Self {
        match ProjectDirs::from("", "", "jobsites") {
            Some(dirs) => Self {
                config_dir: dirs.config_dir().to_path_buf(),
                data_dir: dirs.data_dir().to_path_buf(),
            },
            None => Self {
                config_dir: PathBuf::from("."),
                data_dir: PathBuf::from("."),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub budget: usize,
    pub catalog_path: PathBuf,
    pub state_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_to_file: bool,
    pub filter: CategoryFilter,
    pub format: ReportFormat,
    pub dry_run: bool,
}

pub fn resolve(cli: &Cli, paths: &AppPaths) -> Result<RunConfig, ConfigError> {
    let file = match &cli.config {
        Some(path) => load_file_config(path)?,
        None => load_file_config_or_default(&paths.config_dir.join(CONFIG_FILENAME))?,
    };
    merge(cli, file, paths)
}

fn merge(cli: &Cli, file: FileConfig, paths: &AppPaths) -> Result<RunConfig, ConfigError> {
    let budget = cli.budget.unwrap_or(file.budget);
    if budget == 0 {
        return Err(ConfigError::ZeroBudget);
    }

    let catalog_path = cli
        .catalog
        .clone()
        .or(file.catalog_path)
        .unwrap_or_else(|| paths.config_dir.join(CATALOG_FILENAME));
    let state_path = cli
        .state
        .clone()
        .or(file.state_path)
        .unwrap_or_else(|| paths.data_dir.join(DEFAULT_QUEUE_FILENAME));

    Ok(RunConfig {
        budget,
        catalog_path,
        state_path,
        log_dir: paths.data_dir.clone(),
        log_to_file: cli.log_file || file.log_to_file,
        filter: cli.filter.into(),
        format: cli.format,
        dry_run: cli.dry_run,
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&text).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn load_file_config_or_default(path: &Path) -> Result<FileConfig, ConfigError> {
    if path.exists() {
        load_file_config(path)
    } else {
        Ok(FileConfig::default())
    }
}
