//! One run: load, reconcile, select, report, rotate, save.

use std::io::{self, Write};

use anyhow::Context;
use rotator_core::{order_by_queue, reconcile, rotate, select, RunOutcome, UrlSink};
use rotator_engine::{load_catalog, BrowserLauncher, DryRunLauncher, QueueStore};
use rotator_logging::{rotator_info, rotator_warn};

use crate::config::RunConfig;
use crate::report;

pub fn run(config: &RunConfig) -> anyhow::Result<RunOutcome> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if config.dry_run {
        let mut launcher = DryRunLauncher::default();
        let outcome = execute(config, &mut launcher, &mut out)?;
        for url in &launcher.urls {
            writeln!(out, "would open {url}")?;
        }
        Ok(outcome)
    } else {
        execute(config, &mut BrowserLauncher::system(), &mut out)
    }
}

/// Runs the pipeline with an explicit URL sink and report writer. The queue is
/// saved last, and only when not a dry run.
pub fn execute(
    config: &RunConfig,
    sink: &mut dyn UrlSink,
    out: &mut dyn Write,
) -> anyhow::Result<RunOutcome> {
    let sites = load_catalog(&config.catalog_path)
        .with_context(|| format!("loading catalog {}", config.catalog_path.display()))?;

    let store = QueueStore::new(&config.state_path);
    let mut state = reconcile(store.load(), &sites);

    let ordered = order_by_queue(&state, &sites);
    let outcome = select(&mut state, ordered, config.budget, &config.filter, sink);

    write!(out, "{}", report::render_outcome(&outcome, config.format))
        .context("writing run report")?;

    let next = rotate(state, &outcome.used);
    if config.dry_run {
        rotator_warn!("Dry run: queue not saved to {:?}", store.path());
    } else {
        store
            .save(&next)
            .with_context(|| format!("saving queue to {}", store.path().display()))?;
        rotator_info!("Run complete: {} sites opened", outcome.used.len());
    }

    Ok(outcome)
}
