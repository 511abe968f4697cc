use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rotator_core::{QueueState, SiteId};
use rotator_logging::{rotator_info, rotator_warn};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::persist::{AtomicFileWriter, PersistError};

pub const DEFAULT_QUEUE_FILENAME: &str = "job_queue.ron";

#[derive(Debug, Serialize)]
#[serde(rename = "JobQueue")]
struct SavedQueue<'a> {
    queue: &'a [SiteId],
}

#[derive(Debug, Deserialize)]
#[serde(rename = "JobQueue")]
struct LoadedQueue {
    queue: Vec<LoadedEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LoadedEntry {
    Id(SiteId),
    Malformed(IgnoredAny),
}

/// Persists the queue order between runs in a single RON file.
#[derive(Debug, Clone)]
pub struct QueueStore {
    path: PathBuf,
}

impl QueueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved queue. Any missing, unreadable or corrupt file yields an
    /// empty queue; entries that are not site ids are dropped.
    pub fn load(&self) -> QueueState {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                rotator_info!("No saved queue at {:?}; starting empty", self.path);
                return QueueState::new();
            }
            Err(err) => {
                rotator_warn!("Failed to read saved queue from {:?}: {}", self.path, err);
                return QueueState::new();
            }
        };

        let loaded: LoadedQueue = match ron::from_str(&content) {
            Ok(loaded) => loaded,
            Err(err) => {
                rotator_warn!("Failed to parse saved queue from {:?}: {}", self.path, err);
                return QueueState::new();
            }
        };

        let total = loaded.queue.len();
        let state: QueueState = loaded
            .queue
            .into_iter()
            .filter_map(|entry| match entry {
                LoadedEntry::Id(id) => Some(id),
                LoadedEntry::Malformed(_) => None,
            })
            .collect();
        if state.len() < total {
            rotator_warn!(
                "Dropped {} malformed entries from saved queue",
                total - state.len()
            );
        }

        rotator_info!("Loaded queue of {} sites from {:?}", state.len(), self.path);
        state
    }

    /// Overwrites the saved queue. Errors propagate: a lost save would skew
    /// every later run.
    pub fn save(&self, state: &QueueState) -> Result<PathBuf, PersistError> {
        let filename = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                PersistError::OutputDir(format!("{} has no file name", self.path.display()))
            })?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let saved = SavedQueue {
            queue: state.as_slice(),
        };
        let content = ron::ser::to_string_pretty(&saved, ron::ser::PrettyConfig::new())
            .map_err(|err| PersistError::Serialize(err.to_string()))?;

        let target = AtomicFileWriter::new(dir).write(filename, &content)?;
        rotator_info!("Saved queue of {} sites to {:?}", state.len(), target);
        Ok(target)
    }
}
