//! Health check handlers

use application::{CacheStats, DataSource};
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub cache: CacheStatus,
}

/// What the display cache currently holds
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    /// Source of the cached state, if any
    pub source: Option<DataSource>,
    /// Expiry of the cached state
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the cached state can still be served
    pub fresh: bool,
    #[serde(flatten)]
    pub stats: CacheStats,
}

/// Readiness check
///
/// The server can always answer once it has started: an empty or stale
/// cache is refreshed on the next view request.
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let cached = state.weather.cached_state();

    let cache = CacheStatus {
        source: cached.as_ref().map(|(source, _)| *source),
        expires_at: cached.as_ref().map(|(_, s)| s.expires_at),
        fresh: cached
            .as_ref()
            .is_some_and(|(_, s)| state.weather.is_fresh(s)),
        stats: state.weather.stats(),
    };

    Json(ReadinessResponse { ready: true, cache })
}
