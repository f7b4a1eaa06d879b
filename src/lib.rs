//! # Eventify
//!
//! Browse, register for, create and analyse events. The domain logic lives
//! in [`eventify_core`]; this crate adds everything that touches the
//! outside world.
//!
//! ## Features
//!
//! - **Dashboard**: Category tabs, location search, date sort and an incremental feed
//! - **Registration**: One-way registration with duplicate protection
//! - **Event creation**: Validated form, posted to the backend
//! - **Analysis**: Month/type/search filters, summary, histogram and CSV export
//! - **Accounts**: Login and two-step signup against a third-party auth API
//!
//! ## Modules
//!
//! - [`client`]: HTTP clients for the events backend and the auth API
//! - [`actions`]: User flows that turn API outcomes into notices
//! - [`session`]: Persisted login session and the route guard
//! - [`repository`]: JSON-file event database behind the development backend
//! - [`api`]: Development backend with Axum
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eventify::actions;
//! use eventify::client::EventsClient;
//! use eventify::config::Config;
//! use eventify_core::{DashboardQuery, EventStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = EventsClient::from_config(&config.backend)?;
//!
//!     let mut store = EventStore::new();
//!     let events = actions::load_events(&client, &mut store)
//!         .await
//!         .map_err(|notice| notice.message)?;
//!
//!     let upcoming = DashboardQuery::default().apply(&events);
//!     println!("{} events on the dashboard", upcoming.len());
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod api;
pub mod client;
pub mod config;
pub mod logging;
pub mod repository;
pub mod session;

// Re-export top-level types for convenience
pub use actions::EventDetails;

pub use api::{build_router, serve, ApiError, AppState};

pub use client::{AuthApi, AuthClient, ClientError, ClientResult, EventsApi, EventsClient};

pub use config::{
    AnalysisConfig, AuthConfig, BackendConfig, Config, ConfigError, DashboardConfig,
    LoggingConfig, ServerConfig, SessionConfig,
};

pub use logging::{init_logging, LogFormat, LoggingError};

pub use repository::{EventRepository, RepositoryError, RepositoryResult};

pub use session::{Session, SessionError, SessionStore, LOGIN_REQUIRED};
