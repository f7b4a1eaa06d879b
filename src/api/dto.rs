//! Response bodies that are not plain events

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy or unhealthy
    pub status: String,
    /// Number of stored events
    pub events: usize,
    /// Whether the database is file-backed or in memory
    pub storage: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
