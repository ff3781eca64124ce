//! JSON weather endpoint

use application::DataSource;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use domain::{DisplayState, UnitSystem};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Query parameters for `GET /v1/weather`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct WeatherQuery {
    /// Data source, defaults to live
    #[serde(default)]
    pub source: DataSource,
}

/// Display state with the source and units it was produced for
#[derive(Debug, Clone, Serialize)]
pub struct WeatherResponse {
    pub source: DataSource,
    pub units: UnitSystem,
    #[serde(flatten)]
    pub state: DisplayState,
}

/// Current display state as JSON
#[instrument(skip(state, query))]
pub async fn get_weather(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let display = state.weather.display_state(query.source).await?;

    Ok(Json(WeatherResponse {
        source: query.source,
        units: state.units,
        state: (*display).clone(),
    }))
}
