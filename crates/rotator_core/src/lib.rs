//! Rotator core: pure queue reconciliation, site selection and rotation.
mod filter;
mod queue;
mod reconcile;
mod rotate;
mod select;
mod site;

pub use filter::{CategoryFilter, SiteFilter};
pub use queue::QueueState;
pub use reconcile::reconcile;
pub use rotate::rotate;
pub use select::{
    eligibility_threshold, order_by_queue, select, LaunchError, RunContext, RunOutcome,
    SelectionResult, SelectionStatus, UrlSink, UsedSlot,
};
pub use site::{Category, Location, Site, SiteId};
