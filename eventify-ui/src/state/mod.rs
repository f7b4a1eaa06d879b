//! State Management
//!
//! Global reactive state and the browser-side session.

pub mod global;
pub mod session;

pub use global::{provide_global_state, GlobalState};
