//! Monthly bucketing for the analysis bar chart

use chrono::Datelike;
use serde::Serialize;

use crate::event::Event;

/// Short labels of the chart's x axis
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Event counts per calendar month, January first
///
/// Years are folded together: an event in March 2024 and one in March 2025
/// land in the same bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MonthlyHistogram {
    buckets: [usize; 12],
}

impl MonthlyHistogram {
    /// Count `events` by month of their date
    ///
    /// Events without a readable date are skipped.
    pub fn from_events(events: &[Event]) -> Self {
        let mut buckets = [0usize; 12];
        for date in events.iter().filter_map(|e| e.calendar_date()) {
            buckets[date.month0() as usize] += 1;
        }
        Self { buckets }
    }

    pub fn buckets(&self) -> &[usize; 12] {
        &self.buckets
    }

    /// Count for a 1-based month
    pub fn count(&self, month: u32) -> usize {
        match month {
            1..=12 => self.buckets[(month - 1) as usize],
            _ => 0,
        }
    }

    /// Sum of all buckets
    pub fn total(&self) -> usize {
        self.buckets.iter().sum()
    }

    /// Tallest bucket, used to scale the chart
    pub fn max(&self) -> usize {
        self.buckets.iter().copied().max().unwrap_or(0)
    }

    /// `(label, count)` pairs in calendar order
    pub fn labelled(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        MONTH_LABELS.iter().copied().zip(self.buckets.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;
    use crate::fixtures::event;

    #[test]
    fn test_buckets_by_month() {
        let events = vec![
            event(1, "2024-01-10", "", "A", EventType::Festival),
            event(2, "2024-01-31", "", "A", EventType::Festival),
            event(3, "2025-01-01", "", "A", EventType::Conference),
            event(4, "2024-12-24", "", "A", EventType::Playground),
            event(5, "2024-07-04", "", "A", EventType::Festival),
        ];

        let histogram = MonthlyHistogram::from_events(&events);
        assert_eq!(histogram.count(1), 3);
        assert_eq!(histogram.count(7), 1);
        assert_eq!(histogram.count(12), 1);
        assert_eq!(histogram.count(2), 0);
        assert_eq!(histogram.count(13), 0);
        assert_eq!(histogram.total(), events.len());
        assert_eq!(histogram.max(), 3);
    }

    #[test]
    fn test_unreadable_dates_are_skipped() {
        let events = vec![
            event(1, "someday", "", "A", EventType::Festival),
            event(2, "2024-03-01", "", "A", EventType::Festival),
        ];
        let histogram = MonthlyHistogram::from_events(&events);
        assert_eq!(histogram.total(), 1);
    }

    #[test]
    fn test_labelled() {
        let histogram = MonthlyHistogram::from_events(&[event(
            1,
            "2024-02-02",
            "",
            "A",
            EventType::Festival,
        )]);
        let pairs: Vec<_> = histogram.labelled().collect();
        assert_eq!(pairs.len(), 12);
        assert_eq!(pairs[0], ("Jan", 0));
        assert_eq!(pairs[1], ("Feb", 1));
        assert_eq!(pairs[11], ("Dec", 0));
    }
}
