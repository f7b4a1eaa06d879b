//! API Routes
//!
//! Route handlers organized by resource.

pub mod events;
pub mod health;
