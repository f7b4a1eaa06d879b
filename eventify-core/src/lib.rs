//! # Eventify Core
//!
//! Domain model and list pipelines shared by the Eventify CLI and the
//! Leptos front end. Nothing in this crate performs I/O, so it compiles
//! unchanged for native targets and `wasm32`.
//!
//! ## Modules
//!
//! - [`event`]: The `Event` record, its id, type and date/time parsing
//! - [`store`]: Client-side event store with reducer-style actions
//! - [`dashboard`]: Category/location filtering, date sort, incremental feed
//! - [`analysis`]: Month/type/search filters, histogram, CSV export, paging
//! - [`forms`]: Create-event, signup and login form validation
//! - [`notice`]: Transient user-facing notifications
//!
//! ## Example
//!
//! ```rust
//! use eventify_core::dashboard::{CategoryFilter, DashboardQuery, SortOrder};
//! use eventify_core::event::{Event, EventType};
//!
//! let events: Vec<Event> = serde_json::from_str(r#"[
//!     {"id": 1, "title": "Jazz Night", "date": "2024-07-02", "time": "8:00 PM - 11:00 PM",
//!      "location": "New York", "price": "$40", "description": "Live jazz", "eventType": "festival"},
//!     {"id": 2, "title": "RustConf", "date": "2024-06-10", "time": "9:00 AM - 5:00 PM",
//!      "location": "Montreal", "price": "$300", "description": "Talks", "eventType": "conference"}
//! ]"#).unwrap();
//!
//! let query = DashboardQuery {
//!     category: CategoryFilter::Only(EventType::Festival),
//!     location: "new york".to_string(),
//!     sort: SortOrder::Ascending,
//! };
//!
//! let filtered = query.apply(&events);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].title, "Jazz Night");
//! ```

pub mod analysis;
pub mod dashboard;
pub mod error;
pub mod event;
pub mod forms;
pub mod notice;
pub mod store;

#[cfg(test)]
pub(crate) mod fixtures;

pub use analysis::{
    export_csv, month_options, page_count, paginate, years_in, AnalysisQuery, AnalysisReport,
    MonthFilter, MonthlyHistogram, Summary, YearMonth,
};
pub use dashboard::{CategoryFilter, Dashboard, DashboardQuery, EventFeed, FeedConfig, SortOrder};
pub use error::{CoreError, CoreResult};
pub use event::{Event, EventId, EventStatus, EventType, NewEvent};
pub use forms::{Credentials, EventForm, FormError, SignupField, SignupFlow, SignupForm, SignupStep};
pub use notice::{Notice, NoticeLevel};
pub use store::{EventStore, StoreAction};
