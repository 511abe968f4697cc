//! Rotator engine: queue persistence, catalog loading and URL launching.
mod catalog;
mod launch;
mod persist;
mod store;

pub use catalog::{load_catalog, parse_catalog, CatalogError};
pub use launch::{BrowserLauncher, DryRunLauncher};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use store::{QueueStore, DEFAULT_QUEUE_FILENAME};
