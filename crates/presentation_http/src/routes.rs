//! Route definitions

use axum::{Router, http::Uri, routing::get};
use tower_http::services::ServeDir;

use crate::{error::ApiError, handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // HTML views
        .route("/", get(handlers::pages::live_reloader))
        .route("/inner", get(handlers::pages::live_inner))
        .route("/fake", get(handlers::pages::fixture_reloader))
        .route("/fake-inner", get(handlers::pages::fixture_inner))
        // Weather API (v1)
        .route("/v1/weather", get(handlers::weather::get_weather))
        // Stylesheets and other assets
        .nest_service("/static", static_files)
        .fallback(not_found)
        // Attach state
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
