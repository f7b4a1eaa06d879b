//! Global Application State
//!
//! Reactive state shared by every page: the event store, the logged-in
//! user and the toast messages.

use eventify_core::{EventStore, Notice, NoticeLevel, StoreAction};
use leptos::*;

use super::session;

/// How long a success or info toast stays up
const SUCCESS_TOAST_MS: u32 = 3000;
/// How long an error toast stays up
const ERROR_TOAST_MS: u32 = 5000;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Events the client knows about
    pub store: RwSignal<EventStore>,
    /// User payload from the auth API, mirrored in local storage
    pub user: RwSignal<Option<serde_json::Value>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
    /// Informational message (for toasts)
    pub info: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        store: create_rw_signal(EventStore::new()),
        user: create_rw_signal(session::load_user()),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
        info: create_rw_signal(None),
    };

    provide_context(state);
}

/// Shared state of the current component tree
pub fn use_global_state() -> GlobalState {
    expect_context::<GlobalState>()
}

impl GlobalState {
    /// Apply an action to the event store
    pub fn dispatch(&self, action: StoreAction) {
        self.store.update(|store| store.dispatch(action));
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.with(Option::is_some)
    }

    /// Remember the user here and in local storage
    pub fn log_in(&self, user: serde_json::Value) {
        session::save_user(&user);
        self.user.set(Some(user));
    }

    pub fn log_out(&self) {
        session::clear_user();
        self.user.set(None);
    }

    /// Show a notice as the matching toast
    pub fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Success => self.show_success(&notice.message),
            NoticeLevel::Error => self.show_error(&notice.message),
            NoticeLevel::Info => self.show_info(&notice.message),
        }
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        flash(self.success, message, SUCCESS_TOAST_MS);
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        flash(self.error, message, ERROR_TOAST_MS);
    }

    pub fn show_info(&self, message: &str) {
        flash(self.info, message, SUCCESS_TOAST_MS);
    }
}

fn flash(signal: RwSignal<Option<String>>, message: &str, millis: u32) {
    signal.set(Some(message.to_string()));

    gloo_timers::callback::Timeout::new(millis, move || {
        signal.set(None);
    })
    .forget();
}
