//! Month, search and type filters of the analysis page

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::event::{Event, EventType};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month of a specific year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based month number
    pub month: u32,
}

impl YearMonth {
    /// Create a year-month, rejecting months outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Year-month of a calendar date
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Check whether a date falls in this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Menu label, e.g. "January 2024"
    pub fn label(&self) -> String {
        let name = MONTH_NAMES
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("Unknown");
        format!("{} {}", name, self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

/// Month selection
///
/// The "All" option of the month menu shows upcoming events only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    Upcoming,
    Month(YearMonth),
}

impl MonthFilter {
    /// Check whether an event passes this filter
    ///
    /// Events without a readable date never pass.
    pub fn matches(&self, event: &Event, today: NaiveDate) -> bool {
        let Some(date) = event.calendar_date() else {
            return false;
        };
        match self {
            MonthFilter::Upcoming => date > today,
            MonthFilter::Month(ym) => ym.contains(date),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::Upcoming => write!(f, "all"),
            MonthFilter::Month(ym) => write!(f, "{}", ym),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("upcoming") {
            return Ok(MonthFilter::Upcoming);
        }
        trimmed.parse().map(MonthFilter::Month)
    }
}

/// Filter selection of the analysis page
///
/// All three filters compose: an event must pass the month filter, the
/// search and the type filter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisQuery {
    pub month: MonthFilter,
    /// Case-insensitive substring of title or description
    pub search: String,
    /// `None` keeps every type
    pub event_type: Option<EventType>,
}

impl AnalysisQuery {
    /// Check whether an event passes every filter
    pub fn matches(&self, event: &Event, today: NaiveDate) -> bool {
        if !self.month.matches(event, today) {
            return false;
        }

        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty()
            && !event.title.to_lowercase().contains(&needle)
            && !event.description.to_lowercase().contains(&needle)
        {
            return false;
        }

        self.event_type.map_or(true, |t| event.event_type == t)
    }

    /// Filter `events`, keeping input order
    pub fn apply(&self, events: &[Event], today: NaiveDate) -> Vec<Event> {
        events
            .iter()
            .filter(|e| self.matches(e, today))
            .cloned()
            .collect()
    }
}

/// Distinct years present in the data, ascending
pub fn years_in(events: &[Event]) -> Vec<i32> {
    let mut years: Vec<i32> = events
        .iter()
        .filter_map(|e| e.calendar_date())
        .map(|d| d.year())
        .collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Every month of the given years, in order
pub fn month_options(years: &[i32]) -> Vec<YearMonth> {
    years
        .iter()
        .flat_map(|&year| (1..=12).map(move |month| YearMonth { year, month }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::event;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn sample_events() -> Vec<Event> {
        let mut events = vec![
            event(1, "2024-05-20", "10:00 AM", "Paris", EventType::Festival),
            event(2, "2024-06-15", "10:00 AM", "Paris", EventType::Conference),
            event(3, "2024-06-30", "10:00 AM", "Paris", EventType::Conference),
            event(4, "2024-08-01", "10:00 AM", "Paris", EventType::Playground),
            event(5, "2025-06-02", "10:00 AM", "Paris", EventType::Festival),
            event(6, "tbd", "10:00 AM", "Paris", EventType::Festival),
        ];
        events[2].title = "Rust Summit".to_string();
        events[3].description = "Kids and RUST".to_string();
        events
    }

    fn ids(events: &[Event]) -> Vec<u64> {
        events.iter().map(|e| e.id.0).collect()
    }

    #[test]
    fn test_year_month_parse_and_label() {
        let ym: YearMonth = "2024-01".parse().unwrap();
        assert_eq!(ym, YearMonth { year: 2024, month: 1 });
        assert_eq!(ym.to_string(), "2024-01");
        assert_eq!(ym.label(), "January 2024");

        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024/01".parse::<YearMonth>().is_err());
        assert!("".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_upcoming_is_strictly_after_today() {
        let query = AnalysisQuery::default();
        assert_eq!(ids(&query.apply(&sample_events(), today())), vec![3, 4, 5]);
    }

    #[test]
    fn test_month_filter_checks_year_too() {
        let query = AnalysisQuery {
            month: "2024-06".parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&sample_events(), today())), vec![2, 3]);
    }

    #[test]
    fn test_filters_compose() {
        let query = AnalysisQuery {
            month: MonthFilter::Upcoming,
            search: "rust".to_string(),
            event_type: Some(EventType::Conference),
        };
        assert_eq!(ids(&query.apply(&sample_events(), today())), vec![3]);

        let query = AnalysisQuery {
            search: "rust".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&sample_events(), today())), vec![3, 4]);
    }

    #[test]
    fn test_month_filter_parse() {
        assert_eq!("all".parse::<MonthFilter>(), Ok(MonthFilter::Upcoming));
        assert_eq!(
            "2025-02".parse::<MonthFilter>(),
            Ok(MonthFilter::Month(YearMonth { year: 2025, month: 2 }))
        );
        assert!("feb".parse::<MonthFilter>().is_err());
    }

    #[test]
    fn test_years_and_month_options() {
        assert_eq!(years_in(&sample_events()), vec![2024, 2025]);

        let options = month_options(&[2024, 2025]);
        assert_eq!(options.len(), 24);
        assert_eq!(options[0].to_string(), "2024-01");
        assert_eq!(options[23].to_string(), "2025-12");
    }
}
