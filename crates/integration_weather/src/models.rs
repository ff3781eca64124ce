//! Weather data models
//!
//! Wire types for the OpenWeatherMap One Call payload. Only the fields the
//! display needs are modelled; everything else in the body is ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Condition entry of the `weather` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherDescriptor {
    /// Human readable description, e.g. "scattered clouds"
    #[serde(default)]
    pub description: String,
    /// Icon code, e.g. "03d"
    #[serde(default)]
    pub icon: String,
}

/// Weather at one time point (`current` or an element of `hourly`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPoint {
    /// Unix timestamp, UTC
    pub dt: i64,
    /// Temperature in the requested units
    pub temp: f64,
    /// Apparent temperature in the requested units
    pub feels_like: f64,
    /// Condition descriptors; absent in the payload means empty
    #[serde(default)]
    pub weather: Vec<WeatherDescriptor>,
    /// Precipitation volumes keyed by window, e.g. `{"1h": 0.25}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<HashMap<String, f64>>,
}

impl WeatherPoint {
    /// Precipitation volumes, empty when the payload had none
    #[must_use]
    pub fn rain_volumes(&self) -> HashMap<String, f64> {
        self.rain.clone().unwrap_or_default()
    }
}

/// One Call API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneCallResponse {
    /// Timezone name of the requested location
    #[serde(default)]
    pub timezone: String,
    /// Current conditions
    pub current: WeatherPoint,
    /// Hourly forecast
    #[serde(default)]
    pub hourly: Vec<WeatherPoint>,
}
