//! Pages
//!
//! Top-level page components for each route.

pub mod analysis;
pub mod create_event;
pub mod dashboard;
pub mod event_details;
pub mod home;
pub mod login;
pub mod signup;

pub use analysis::Analysis;
pub use create_event::CreateEvent;
pub use dashboard::Dashboard;
pub use event_details::EventDetails;
pub use home::Home;
pub use login::Login;
pub use signup::Signup;

use eventify_core::notice::messages::UNEXPECTED_ERROR;
use eventify_core::Notice;

use crate::api::FetchError;

/// Notice for a failed call: rejections get `rejected`, everything else
/// the generic message
pub(crate) fn failure_notice(err: &FetchError, rejected: &str) -> Notice {
    web_sys::console::error_1(&err.to_string().into());
    if err.is_rejection() {
        Notice::error(rejected)
    } else {
        Notice::error(UNEXPECTED_ERROR)
    }
}
