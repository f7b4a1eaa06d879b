//! Dashboard Pipeline
//!
//! Client-side filtering, sorting and incremental reveal for the event
//! dashboard.
//!
//! ```text
//! all events → category filter → location filter → sort by start → feed
//!                                                                   │
//!                                     first page, then chunk by chunk
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::event::{Event, EventType};

/// Category tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(EventType),
}

impl CategoryFilter {
    /// Check whether an event passes this filter
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(event_type) => event.event_type == *event_type,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(event_type) => write!(f, "{}", event_type),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<EventType>()
            .map(CategoryFilter::Only)
            .map_err(|_| CoreError::UnknownCategory(s.to_string()))
    }
}

/// Date ordering of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Short value used by the sort select
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(CoreError::UnknownSortOrder(s.to_string())),
        }
    }
}

/// Filter and sort selection of the dashboard
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardQuery {
    pub category: CategoryFilter,
    /// Case-insensitive substring of the location; empty matches all
    pub location: String,
    pub sort: SortOrder,
}

impl DashboardQuery {
    /// Run the filter/sort pipeline over `events`
    pub fn apply(&self, events: &[Event]) -> Vec<Event> {
        let needle = self.location.to_lowercase();

        let mut filtered: Vec<Event> = events
            .iter()
            .filter(|e| self.category.matches(e))
            .filter(|e| needle.is_empty() || e.location.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        sort_by_start(&mut filtered, self.sort);
        filtered
    }
}

/// Stable sort by start timestamp
///
/// Events without a readable start go last regardless of direction.
pub fn sort_by_start(events: &mut [Event], order: SortOrder) {
    events.sort_by(|a, b| match (a.starts_at(), b.starts_at()) {
        (Some(a), Some(b)) => match order {
            SortOrder::Ascending => a.cmp(&b),
            SortOrder::Descending => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Sizes of the incremental feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    /// Events shown before any "load more"
    pub page_size: usize,
    /// Events appended by each "load more"
    pub chunk_size: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            chunk_size: 3,
        }
    }
}

/// Incrementally revealed list of filtered events
#[derive(Debug, Clone, PartialEq)]
pub struct EventFeed {
    events: Vec<Event>,
    shown: usize,
    config: FeedConfig,
}

impl EventFeed {
    /// Create a feed showing the first page
    pub fn new(events: Vec<Event>, config: FeedConfig) -> Self {
        let shown = config.page_size.min(events.len());
        Self {
            events,
            shown,
            config,
        }
    }

    /// Replace the underlying list and go back to the first page
    pub fn reset(&mut self, events: Vec<Event>) {
        self.shown = self.config.page_size.min(events.len());
        self.events = events;
    }

    /// Events currently on screen
    pub fn visible(&self) -> &[Event] {
        &self.events[..self.shown]
    }

    /// Reveal the next chunk, returning only the newly revealed events
    pub fn load_more(&mut self) -> &[Event] {
        let start = self.shown;
        // A zero chunk would stall scrolling, so always reveal at least one
        let step = self.config.chunk_size.max(1);
        self.shown = (start + step).min(self.events.len());
        &self.events[start..self.shown]
    }

    /// Reveal everything
    pub fn see_all(&mut self) {
        self.shown = self.events.len();
    }

    pub fn has_more(&self) -> bool {
        self.shown < self.events.len()
    }

    /// Number of events currently on screen
    pub fn shown(&self) -> usize {
        self.shown
    }

    /// Number of events matching the filters
    pub fn total(&self) -> usize {
        self.events.len()
    }

    pub fn config(&self) -> FeedConfig {
        self.config
    }
}

/// State behind the dashboard page
///
/// Every filter change re-runs the pipeline over all fetched events and
/// resets the feed to its first page.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    events: Vec<Event>,
    query: DashboardQuery,
    feed: EventFeed,
}

impl Dashboard {
    /// Create a dashboard over fetched events with the default query
    pub fn new(events: Vec<Event>, config: FeedConfig) -> Self {
        Self::with_query(events, DashboardQuery::default(), config)
    }

    /// Create a dashboard with an initial query
    pub fn with_query(events: Vec<Event>, query: DashboardQuery, config: FeedConfig) -> Self {
        let filtered = query.apply(&events);
        Self {
            events,
            query,
            feed: EventFeed::new(filtered, config),
        }
    }

    /// Replace the fetched events, keeping the current query
    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
        self.refresh();
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.query.category = category;
        self.refresh();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.query.location = location.into();
        self.refresh();
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.query.sort = sort;
        self.refresh();
    }

    pub fn query(&self) -> &DashboardQuery {
        &self.query
    }

    pub fn feed(&self) -> &EventFeed {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut EventFeed {
        &mut self.feed
    }

    /// All fetched events, unfiltered
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    fn refresh(&mut self) {
        let filtered = self.query.apply(&self.events);
        tracing::debug!(
            category = %self.query.category,
            location = %self.query.location,
            sort = %self.query.sort,
            matching = filtered.len(),
            "Dashboard filters applied"
        );
        self.feed.reset(filtered);
    }
}
