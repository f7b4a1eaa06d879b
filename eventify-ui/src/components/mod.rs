//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod event_card;
pub mod header;
pub mod histogram;
pub mod loading;
pub mod protected;
pub mod toast;

pub use event_card::{EventCard, ViewMode};
pub use header::Header;
pub use histogram::Histogram;
pub use loading::Loading;
pub use protected::Protected;
pub use toast::Toast;
