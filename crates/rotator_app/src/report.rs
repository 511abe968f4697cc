//! Renders selection results as a table or markdown.

use std::collections::BTreeMap;

use rotator_core::{RunOutcome, SelectionResult, SelectionStatus};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::ReportFormat;

const COLUMNS: [&str; 8] = [
    "ID",
    "Name",
    "Opened",
    "URLs",
    "Q Index",
    "Priority",
    "Threshold",
    "Status",
];

/// One table row. The caller states which shape it is handing over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEntry<'a> {
    /// A site's selection result.
    Record(&'a SelectionResult),
    /// Values keyed by column name; unknown keys are ignored.
    Mapping(BTreeMap<String, String>),
    /// Values in column order; short rows are padded.
    Sequence(Vec<String>),
}

impl ReportEntry<'_> {
    fn cells(&self) -> Vec<String> {
        match self {
            ReportEntry::Record(result) => vec![
                result.id.to_string(),
                result.name.clone(),
                if result.opened() { "yes" } else { "no" }.to_string(),
                format!("{}/{}", result.urls_launched, result.urls_total),
                result.queue_index.to_string(),
                result.priority.to_string(),
                result.threshold.to_string(),
                status_label(result.status).to_string(),
            ],
            ReportEntry::Mapping(values) => COLUMNS
                .iter()
                .map(|column| values.get(*column).cloned().unwrap_or_default())
                .collect(),
            ReportEntry::Sequence(values) => {
                let mut cells: Vec<String> = values.iter().take(COLUMNS.len()).cloned().collect();
                cells.resize(COLUMNS.len(), String::new());
                cells
            }
        }
    }
}

fn status_label(status: SelectionStatus) -> &'static str {
    match status {
        SelectionStatus::Opened => "opened",
        SelectionStatus::NotDue => "not due",
        SelectionStatus::Filtered => "filtered",
        SelectionStatus::ExceedsBudget => "exceeds budget",
        SelectionStatus::BudgetExhausted => "budget spent",
    }
}

pub fn render_entries(entries: &[ReportEntry<'_>], format: ReportFormat) -> String {
    let mut builder = Builder::default();
    builder.push_record(COLUMNS.iter().map(|column| column.to_string()));
    for entry in entries {
        builder.push_record(entry.cells());
    }

    let mut table = builder.build();
    match format {
        ReportFormat::Table => table.with(Style::rounded()),
        ReportFormat::Markdown => table.with(Style::markdown()),
    };
    table.to_string()
}

/// Full run report: one row per site, totals and budget rows, and a summary line.
pub fn render_outcome(outcome: &RunOutcome, format: ReportFormat) -> String {
    let mut entries: Vec<ReportEntry<'_>> =
        outcome.results.iter().map(ReportEntry::Record).collect();

    let launched: usize = outcome.results.iter().map(|r| r.urls_launched).sum();
    entries.push(ReportEntry::Sequence(vec![
        String::new(),
        "Total".to_string(),
        outcome.used.len().to_string(),
        format!("{}/{}", launched, outcome.opened_count),
    ]));
    entries.push(ReportEntry::Mapping(BTreeMap::from([
        ("Name".to_string(), "Budget".to_string()),
        (
            "URLs".to_string(),
            format!("{}/{}", outcome.opened_count, outcome.budget),
        ),
    ])));

    format!(
        "{}\nOpened {} / {} urls\n",
        render_entries(&entries, format),
        outcome.opened_count,
        outcome.budget
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: u64, status: SelectionStatus) -> SelectionResult {
        SelectionResult {
            id,
            name: format!("site-{id}"),
            queue_index: 0,
            priority: 1,
            threshold: 2,
            urls_total: 1,
            urls_launched: usize::from(status == SelectionStatus::Opened),
            status,
        }
    }

    #[test]
    fn markdown_report_lists_every_site_and_summary() {
        let outcome = RunOutcome {
            budget: 5,
            opened_count: 1,
            results: vec![
                result(1, SelectionStatus::Opened),
                result(2, SelectionStatus::NotDue),
            ],
            used: vec![rotator_core::UsedSlot { queue_index: 0, id: 1 }],
        };

        let text = render_outcome(&outcome, ReportFormat::Markdown);

        assert!(text.contains("| ID"));
        assert!(text.contains("site-1"));
        assert!(text.contains("not due"));
        assert!(text.contains("Total"));
        let budget_row = text
            .lines()
            .find(|line| line.contains("Budget"))
            .expect("budget row");
        assert!(budget_row.contains("1/5"));
        assert!(text.ends_with("Opened 1 / 5 urls\n"));
    }

    #[test]
    fn entry_shapes_fill_the_same_columns() {
        let mut mapping = BTreeMap::new();
        mapping.insert("Name".to_string(), "mapped".to_string());
        mapping.insert("Bogus".to_string(), "ignored".to_string());

        let mapped = ReportEntry::Mapping(mapping).cells();
        assert_eq!(mapped.len(), COLUMNS.len());
        assert_eq!(mapped[1], "mapped");
        assert!(!mapped.contains(&"ignored".to_string()));

        let sequence = ReportEntry::Sequence(vec!["7".to_string()]).cells();
        assert_eq!(sequence.len(), COLUMNS.len());
        assert_eq!(sequence[0], "7");

        let record = result(3, SelectionStatus::ExceedsBudget);
        let cells = ReportEntry::Record(&record).cells();
        assert_eq!(cells[2], "no");
        assert_eq!(cells[7], "exceeds budget");
    }

    #[test]
    fn table_style_draws_borders() {
        let record = result(4, SelectionStatus::Opened);
        let text = render_entries(&[ReportEntry::Record(&record)], ReportFormat::Table);
        assert!(text.contains('╭'));
        assert!(text.contains("site-4"));
    }
}
