use std::num::NonZeroU32;

use rotator_logging::{rotator_debug, rotator_info, rotator_warn};
use thiserror::Error;

use crate::{QueueState, Site, SiteFilter, SiteId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("failed to start opener for {url}: {message}")]
    Spawn { url: String, message: String },
}

/// Receives every URL the selection decides to open. Launches are best-effort.
/// An `Err` only means the URL could not be handed off.
pub trait UrlSink {
    fn launch(&mut self, url: &str) -> Result<(), LaunchError>;
}

/// A site opened during the run, with the queue position it held when selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsedSlot {
    pub queue_index: usize,
    pub id: SiteId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStatus {
    Opened,
    /// Too far back in the queue for its priority.
    NotDue,
    /// Rejected by the run-level filter.
    Filtered,
    /// Opening all of its URLs would overshoot the budget.
    ExceedsBudget,
    /// The budget was already used up before this site was reached.
    BudgetExhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    pub id: SiteId,
    pub name: String,
    pub queue_index: usize,
    pub priority: u32,
    pub threshold: usize,
    pub urls_total: usize,
    pub urls_launched: usize,
    pub status: SelectionStatus,
}

impl SelectionResult {
    pub fn opened(&self) -> bool {
        self.status == SelectionStatus::Opened
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub budget: usize,
    pub opened_count: usize,
    pub results: Vec<SelectionResult>,
    pub used: Vec<UsedSlot>,
}

/// Number of front queue slots a site with `priority` may be opened from.
pub fn eligibility_threshold(queue_len: usize, priority: NonZeroU32) -> usize {
    queue_len.div_ceil(priority.get() as usize)
}

/// Orders sites by their queue position. Sites absent from the queue go last,
/// keeping catalog order among themselves.
pub fn order_by_queue<'a>(state: &QueueState, sites: &'a [Site]) -> Vec<&'a Site> {
    let mut ordered: Vec<&Site> = sites.iter().collect();
    ordered.sort_by_key(|site| state.position(site.id).unwrap_or(usize::MAX));
    ordered
}

/// Per-run selection state: URL-opens spent so far and the sites opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    budget: usize,
    opened_count: usize,
    used: Vec<UsedSlot>,
}

impl RunContext {
    pub fn new(budget: usize) -> Self {
        Self {
            budget,
            opened_count: 0,
            used: Vec::new(),
        }
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn opened_count(&self) -> usize {
        self.opened_count
    }

    pub fn used(&self) -> &[UsedSlot] {
        &self.used
    }

    pub fn is_exhausted(&self) -> bool {
        self.opened_count >= self.budget
    }

    /// Decides whether `site` opens this run, launching its URLs through `sink` if so.
    ///
    /// A site missing from `state` is appended to it first.
    pub fn consider(
        &mut self,
        state: &mut QueueState,
        site: &Site,
        filter: &dyn SiteFilter,
        sink: &mut dyn UrlSink,
    ) -> SelectionResult {
        let queue_index = state.index_or_append(site.id);
        let threshold = eligibility_threshold(state.len(), site.priority);
        let urls_total = site.urls.len();

        let status = if self.is_exhausted() {
            SelectionStatus::BudgetExhausted
        } else if !filter.accepts(site) {
            SelectionStatus::Filtered
        } else if queue_index >= threshold {
            SelectionStatus::NotDue
        } else if self.opened_count + urls_total > self.budget {
            SelectionStatus::ExceedsBudget
        } else {
            SelectionStatus::Opened
        };

        let mut urls_launched = 0;
        if status == SelectionStatus::Opened {
            for url in &site.urls {
                match sink.launch(url) {
                    Ok(()) => urls_launched += 1,
                    Err(err) => rotator_warn!("Could not open {} for {}: {}", url, site.name, err),
                }
            }
            self.opened_count += urls_total;
            self.used.push(UsedSlot {
                queue_index,
                id: site.id,
            });
        }

        rotator_debug!(
            "{} ({}) q_index={} priority={} threshold={} status={:?} opened={}/{}",
            site.name,
            site.id,
            queue_index,
            site.priority,
            threshold,
            status,
            self.opened_count,
            self.budget
        );

        SelectionResult {
            id: site.id,
            name: site.name.clone(),
            queue_index,
            priority: site.priority.get(),
            threshold,
            urls_total,
            urls_launched,
            status,
        }
    }

    pub fn finish(self, results: Vec<SelectionResult>) -> RunOutcome {
        RunOutcome {
            budget: self.budget,
            opened_count: self.opened_count,
            results,
            used: self.used,
        }
    }
}

/// Runs selection over `sites` in the order given.
pub fn select<'a>(
    state: &mut QueueState,
    sites: impl IntoIterator<Item = &'a Site>,
    budget: usize,
    filter: &dyn SiteFilter,
    sink: &mut dyn UrlSink,
) -> RunOutcome {
    let mut context = RunContext::new(budget);
    let results: Vec<SelectionResult> = sites
        .into_iter()
        .map(|site| context.consider(state, site, filter, sink))
        .collect();

    rotator_info!(
        "Opened {} / {} urls across {} sites",
        context.opened_count(),
        context.budget(),
        context.used().len()
    );
    context.finish(results)
}
