//! Eventify Web
//!
//! Browser front end for Eventify built with Leptos (WASM).
//!
//! # Features
//!
//! - Event dashboard with category tabs, location search and infinite scroll
//! - Event details with registration
//! - Event creation form
//! - Monthly analysis with a histogram, CSV export and a paged table
//!
//! # Architecture
//!
//! A client-side rendered (CSR) Leptos application. Filtering, validation
//! and analysis come from `eventify-core`; this crate only adds the views,
//! the browser HTTP calls and local-storage session handling.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
