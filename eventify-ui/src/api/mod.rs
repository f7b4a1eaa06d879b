//! API Layer
//!
//! Browser HTTP calls to the events backend and the auth API.

pub mod client;

pub use client::*;
