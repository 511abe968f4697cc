use std::num::NonZeroU32;

use pretty_assertions::assert_eq;
use rotator_core::{
    eligibility_threshold, order_by_queue, select, CategoryFilter, Category, LaunchError,
    QueueState, RunContext, Site, SiteId, SelectionStatus, UrlSink, UsedSlot,
};

#[derive(Default)]
struct RecordingSink {
    launched: Vec<String>,
    fail_on: Option<String>,
}

impl UrlSink for RecordingSink {
    fn launch(&mut self, url: &str) -> Result<(), LaunchError> {
        if self.fail_on.as_deref() == Some(url) {
            return Err(LaunchError::Spawn {
                url: url.to_string(),
                message: "no browser".to_string(),
            });
        }
        self.launched.push(url.to_string());
        Ok(())
    }
}

fn priority(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap()
}

fn site(id: SiteId, urls: usize, prio: u32) -> Site {
    let urls = (0..urls)
        .map(|n| format!("https://site-{id}.example.com/{n}"))
        .collect();
    Site::new(id, format!("site-{id}"), urls, priority(prio))
}

fn accept_all(_: &Site) -> bool {
    true
}

#[test]
fn threshold_rounds_up() {
    assert_eq!(eligibility_threshold(4, priority(2)), 2);
    assert_eq!(eligibility_threshold(5, priority(2)), 3);
    assert_eq!(eligibility_threshold(5, priority(1)), 5);
    assert_eq!(eligibility_threshold(1, priority(10)), 1);
    assert_eq!(eligibility_threshold(0, priority(3)), 0);
}

#[test]
fn priority_two_only_opens_front_half() {
    let mut state = QueueState::from(vec![10, 11, 12, 13]);
    let sites = vec![site(10, 1, 2), site(11, 1, 2), site(12, 1, 2), site(13, 1, 2)];
    let mut sink = RecordingSink::default();

    let outcome = select(&mut state, &sites, 10, &accept_all, &mut sink);
    let statuses: Vec<_> = outcome.results.iter().map(|r| r.status).collect();

    assert_eq!(
        statuses,
        vec![
            SelectionStatus::Opened,
            SelectionStatus::Opened,
            SelectionStatus::NotDue,
            SelectionStatus::NotDue,
        ]
    );
    assert!(outcome.results.iter().all(|r| r.threshold == 2));
}

#[test]
fn priority_one_is_eligible_everywhere() {
    let ids: Vec<SiteId> = (1..=6).collect();
    for position in 0..ids.len() {
        let mut state = QueueState::from(ids.clone());
        let target = site(ids[position], 1, 1);
        let mut context = RunContext::new(1);
        let mut sink = RecordingSink::default();
        let result = context.consider(&mut state, &target, &accept_all, &mut sink);
        assert!(result.opened(), "position {position}");
    }
}

#[test]
fn oversized_site_is_skipped_without_ending_the_run() {
    let mut state = QueueState::from(vec![1, 2, 3, 4]);
    let sites = vec![site(1, 2, 1), site(2, 2, 1), site(3, 1, 1), site(4, 1, 1)];
    let mut sink = RecordingSink::default();

    let outcome = select(&mut state, &sites, 3, &accept_all, &mut sink);
    let statuses: Vec<_> = outcome.results.iter().map(|r| r.status).collect();

    assert_eq!(
        statuses,
        vec![
            SelectionStatus::Opened,
            SelectionStatus::ExceedsBudget,
            SelectionStatus::Opened,
            SelectionStatus::BudgetExhausted,
        ]
    );
    assert_eq!(outcome.opened_count, 3);
    assert_eq!(
        outcome.used,
        vec![
            UsedSlot { queue_index: 0, id: 1 },
            UsedSlot { queue_index: 2, id: 3 },
        ]
    );
    assert_eq!(sink.launched.len(), 3);
}

#[test]
fn budget_is_never_exceeded() {
    for budget in 0..8 {
        let ids: Vec<SiteId> = (1..=7).collect();
        let mut state = QueueState::from(ids.clone());
        let sites: Vec<Site> = ids.iter().map(|&id| site(id, (id % 3 + 1) as usize, 1)).collect();
        let mut sink = RecordingSink::default();

        let outcome = select(&mut state, &sites, budget, &accept_all, &mut sink);
        let opened: usize = outcome
            .results
            .iter()
            .filter(|r| r.opened())
            .map(|r| r.urls_total)
            .sum();

        assert!(opened <= budget, "budget {budget} opened {opened}");
        assert_eq!(opened, outcome.opened_count);
    }
}

#[test]
fn filter_blocks_otherwise_due_sites() {
    let mut state = QueueState::from(vec![1, 2]);
    let sites = vec![
        site(1, 1, 1).with_category(Category::Organization),
        site(2, 1, 1).with_category(Category::JobBoard),
    ];
    let mut sink = RecordingSink::default();

    let outcome = select(&mut state, &sites, 5, &CategoryFilter::JobBoards, &mut sink);

    assert_eq!(outcome.results[0].status, SelectionStatus::Filtered);
    assert_eq!(outcome.results[1].status, SelectionStatus::Opened);
    assert_eq!(sink.launched, vec!["https://site-2.example.com/0".to_string()]);
}

#[test]
fn site_missing_from_queue_is_appended() {
    let mut state = QueueState::from(vec![1]);
    let sites = vec![site(1, 1, 1), site(9, 1, 1)];
    let mut sink = RecordingSink::default();

    let outcome = select(&mut state, &sites, 5, &accept_all, &mut sink);

    assert_eq!(state.as_slice(), &[1, 9]);
    assert_eq!(outcome.results[1].queue_index, 1);
    assert!(outcome.results[1].opened());
}

#[test]
fn failed_launch_still_spends_budget() {
    let mut state = QueueState::from(vec![1]);
    let sites = vec![site(1, 2, 1)];
    let mut sink = RecordingSink {
        fail_on: Some("https://site-1.example.com/0".to_string()),
        ..RecordingSink::default()
    };

    let outcome = select(&mut state, &sites, 2, &accept_all, &mut sink);

    assert!(outcome.results[0].opened());
    assert_eq!(outcome.results[0].urls_launched, 1);
    assert_eq!(outcome.opened_count, 2);
}

#[test]
fn selection_is_deterministic() {
    let sites: Vec<Site> = (1..=5).map(|id| site(id, 1, (id % 2 + 1) as u32)).collect();
    let run = || {
        let mut state = QueueState::from(vec![3, 1, 5, 2, 4]);
        let ordered = order_by_queue(&state, &sites);
        let mut sink = RecordingSink::default();
        let outcome = select(&mut state, ordered, 3, &accept_all, &mut sink);
        (outcome, sink.launched)
    };
    assert_eq!(run(), run());
}

#[test]
fn order_by_queue_puts_unknown_sites_last() {
    let state = QueueState::from(vec![3, 1]);
    let sites = vec![site(1, 1, 1), site(7, 1, 1), site(3, 1, 1), site(8, 1, 1)];
    let ordered: Vec<SiteId> = order_by_queue(&state, &sites).iter().map(|s| s.id).collect();
    assert_eq!(ordered, vec![3, 1, 7, 8]);
}
