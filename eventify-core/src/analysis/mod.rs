//! Event Analysis
//!
//! Aggregates behind the analysis page: composable month/search/type
//! filters, summary counts, a monthly histogram, CSV export and paging of
//! the event table.
//!
//! ## Submodules
//!
//! - `filter`: `YearMonth`, `MonthFilter`, `AnalysisQuery` and month menus
//! - `histogram`: Per-month bucket counts for the bar chart
//! - `export`: CSV rendering of the filtered table
//! - `pagination`: 1-based page slicing

mod export;
mod filter;
mod histogram;
mod pagination;

pub use export::{export_csv, EXPORT_FILENAME};
pub use filter::{month_options, years_in, AnalysisQuery, MonthFilter, YearMonth};
pub use histogram::{MonthlyHistogram, MONTH_LABELS};
pub use pagination::{page_count, paginate, DEFAULT_PER_PAGE};

use chrono::NaiveDate;
use serde::Serialize;

use crate::event::{Event, EventStatus};

/// Headline counts of the analysis page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    /// Fetched events dated after today
    pub upcoming: usize,
    /// Fetched events dated today or earlier, or undated
    pub completed: usize,
    /// All fetched events
    pub total: usize,
    /// Events passing the current filters
    pub matching: usize,
}

impl Summary {
    /// Compute the counts over the full fetched set
    pub fn compute(all: &[Event], matching: usize, today: NaiveDate) -> Self {
        let upcoming = all
            .iter()
            .filter(|e| e.status(today) == EventStatus::Upcoming)
            .count();
        Self {
            upcoming,
            completed: all.len() - upcoming,
            total: all.len(),
            matching,
        }
    }
}

/// Everything the analysis page renders for one filter selection
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub filtered: Vec<Event>,
    pub summary: Summary,
    pub histogram: MonthlyHistogram,
}

impl AnalysisReport {
    /// Run the filters and aggregate the result
    pub fn build(events: &[Event], query: &AnalysisQuery, today: NaiveDate) -> Self {
        let filtered = query.apply(events, today);
        let summary = Summary::compute(events, filtered.len(), today);
        let histogram = MonthlyHistogram::from_events(&filtered);

        tracing::debug!(
            month = %query.month,
            search = %query.search,
            matching = summary.matching,
            total = summary.total,
            "Analysis report built"
        );

        Self {
            filtered,
            summary,
            histogram,
        }
    }

    /// One page of the filtered table
    pub fn page(&self, page: usize, per_page: usize) -> &[Event] {
        paginate(&self.filtered, page, per_page)
    }

    pub fn page_count(&self, per_page: usize) -> usize {
        page_count(self.filtered.len(), per_page)
    }

    /// CSV of the filtered table
    pub fn to_csv(&self, today: NaiveDate) -> crate::error::CoreResult<String> {
        export_csv(&self.filtered, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;
    use crate::fixtures::event;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn sample_events() -> Vec<Event> {
        vec![
            event(1, "2024-05-20", "", "A", EventType::Festival),
            event(2, "2024-06-20", "", "A", EventType::Conference),
            event(3, "2024-06-25", "", "A", EventType::Festival),
            event(4, "2024-09-01", "", "A", EventType::Festival),
            event(5, "2025-09-10", "", "A", EventType::Playground),
            event(6, "n/a", "", "A", EventType::Festival),
        ]
    }

    #[test]
    fn test_summary_counts_whole_set() {
        let query = AnalysisQuery {
            event_type: Some(EventType::Festival),
            ..Default::default()
        };
        let report = AnalysisReport::build(&sample_events(), &query, today());

        assert_eq!(report.summary.total, 6);
        assert_eq!(report.summary.upcoming, 4);
        assert_eq!(report.summary.completed, 2);
        assert_eq!(report.summary.matching, 2);
    }

    #[test]
    fn test_histogram_sums_to_filtered_size() {
        let report = AnalysisReport::build(&sample_events(), &AnalysisQuery::default(), today());

        assert_eq!(report.filtered.len(), 4);
        assert_eq!(report.histogram.total(), report.filtered.len());
        assert_eq!(report.histogram.count(6), 2);
        assert_eq!(report.histogram.count(9), 2);
    }

    #[test]
    fn test_report_paging_and_csv() {
        let report = AnalysisReport::build(&sample_events(), &AnalysisQuery::default(), today());

        assert_eq!(report.page_count(DEFAULT_PER_PAGE), 1);
        assert_eq!(report.page(1, 3).len(), 3);
        assert_eq!(report.page(2, 3).len(), 1);

        let csv = report.to_csv(today()).unwrap();
        assert_eq!(csv.lines().count(), report.filtered.len() + 1);
    }
}
