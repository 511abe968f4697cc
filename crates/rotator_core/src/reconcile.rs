use std::collections::HashSet;

use rotator_logging::{rotator_debug, rotator_info};

use crate::{QueueState, Site, SiteId};

/// Repairs a persisted queue against the current catalog.
///
/// Ids no longer in the catalog and repeated ids are dropped in a single
/// left-to-right pass that keeps the relative order of the survivors. Catalog
/// ids missing from the queue are then appended in catalog order.
pub fn reconcile(mut state: QueueState, catalog: &[Site]) -> QueueState {
    let mut catalog_ids: Vec<SiteId> = catalog.iter().map(|site| site.id).collect();
    catalog_ids.sort_unstable();

    if matches_catalog(&state, &catalog_ids) {
        return state;
    }

    let mut seen = HashSet::with_capacity(state.len());
    let mut removed = 0usize;
    state.retain(|&id| {
        let keep = catalog_ids.binary_search(&id).is_ok() && seen.insert(id);
        if !keep {
            rotator_debug!("Dropping queue entry {} (stale or duplicate)", id);
            removed += 1;
        }
        keep
    });

    let mut appended = 0usize;
    for site in catalog {
        if !state.contains(site.id) {
            rotator_info!(
                "Adding {} ({}) to queue at index {}",
                site.name,
                site.id,
                state.len()
            );
            state.push(site.id);
            appended += 1;
        }
    }

    rotator_info!(
        "Reconciled queue: {} removed, {} appended, {} total",
        removed,
        appended,
        state.len()
    );
    state
}

/// True when the queue holds exactly the catalog ids, each once.
fn matches_catalog(state: &QueueState, sorted_catalog_ids: &[SiteId]) -> bool {
    if state.len() != sorted_catalog_ids.len() {
        return false;
    }
    let mut queued = state.as_slice().to_vec();
    queued.sort_unstable();
    queued == sorted_catalog_ids
}
