//! HTML view handlers
//!
//! Each data source gets a reloader page and the inner fragment the reloader
//! fetches. Live views sit at `/` and `/inner`, fixture views at `/fake` and
//! `/fake-inner`.

use application::DataSource;
use axum::{extract::State, response::Html};
use infrastructure::ReloaderPage;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Inner view path for a data source
pub const fn inner_path(source: DataSource) -> &'static str {
    match source {
        DataSource::Live => "/inner",
        DataSource::Fixture => "/fake-inner",
    }
}

fn render_reloader(state: &AppState, source: DataSource) -> Result<Html<String>, ApiError> {
    let page = &state.config.page;
    let html = state.templates.render_reloader(&ReloaderPage {
        css_url: page.css_url.clone(),
        favicon_url: page.favicon_url.clone(),
        inner_url: inner_path(source).to_string(),
        reload_interval_secs: page.reload_interval_secs,
    })?;
    Ok(Html(html))
}

async fn render_inner(state: &AppState, source: DataSource) -> Result<Html<String>, ApiError> {
    let display = state.weather.display_state(source).await?;
    let html = state.templates.render_inner(&display, state.units)?;
    Ok(Html(html))
}

/// Reloader page for live data
pub async fn live_reloader(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render_reloader(&state, DataSource::Live)
}

/// Reloader page for fixture data
pub async fn fixture_reloader(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render_reloader(&state, DataSource::Fixture)
}

/// Inner view for live data
#[instrument(skip(state))]
pub async fn live_inner(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render_inner(&state, DataSource::Live).await
}

/// Inner view for fixture data
#[instrument(skip(state))]
pub async fn fixture_inner(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render_inner(&state, DataSource::Fixture).await
}
