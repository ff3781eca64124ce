//! OpenWeatherMap One Call client
//!
//! HTTP client for the One Call endpoint. The request target is fixed when
//! the client is built, so it doubles as the identifier of the data source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::OneCallResponse;

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Base URL could not be parsed
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Fixture file could not be read
    #[error("Fixture unavailable: {0}")]
    FixtureUnavailable(String),
}

/// One Call client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Provider credential sent as `appid`
    pub api_key: String,

    /// Latitude of the forecast location
    pub latitude: f64,

    /// Longitude of the forecast location
    pub longitude: f64,

    /// Unit system: "standard", "metric" or "imperial"
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    10
}

fn default_units() -> String {
    "standard".to_string()
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &"[REDACTED]")
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("units", &self.units)
            .finish()
    }
}

impl WeatherConfig {
    /// Create a configuration with default endpoint and timeout
    #[must_use]
    pub fn new(api_key: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            api_key: api_key.into(),
            latitude,
            longitude,
            units: default_units(),
        }
    }

    /// Set the unit system
    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }
}

/// A source of One Call payloads
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Identifier of the data this client produces
    fn source_id(&self) -> &str;

    /// Fetch one complete payload
    async fn fetch(&self) -> Result<OneCallResponse, WeatherError>;
}

/// One Call HTTP client implementation
#[derive(Debug)]
pub struct OneCallClient {
    client: Client,
    url: String,
    timeout_secs: u64,
}

impl OneCallClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are out of range or the HTTP
    /// client cannot be initialized.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        Self::validate_coordinates(config.latitude, config.longitude)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            url: Self::build_url(config)?,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Build the request target. `exclude` is always sent empty.
    ///
    /// Values are form-encoded, so keys containing `&`, `#` or `+` survive.
    fn build_url(config: &WeatherConfig) -> Result<String, WeatherError> {
        let endpoint = format!("{}/onecall", config.base_url.trim_end_matches('/'));
        let url = Url::parse_with_params(
            &endpoint,
            &[
                ("lat", format!("{:.6}", config.latitude)),
                ("lon", format!("{:.6}", config.longitude)),
                ("exclude", String::new()),
                ("appid", config.api_key.clone()),
                ("units", config.units.clone()),
            ],
        )
        .map_err(|e| WeatherError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        Ok(url.to_string())
    }
}

/// Mask the `appid` query value so the URL can be logged
#[must_use]
pub fn redact_url(url: &str) -> String {
    let Some(start) = url.find("appid=") else {
        return url.to_string();
    };
    let value_start = start + "appid=".len();
    let value_end = url[value_start..]
        .find('&')
        .map_or(url.len(), |offset| value_start + offset);
    format!("{}***{}", &url[..value_start], &url[value_end..])
}

#[async_trait]
impl WeatherClient for OneCallClient {
    fn source_id(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self))]
    async fn fetch(&self) -> Result<OneCallResponse, WeatherError> {
        debug!(url = %redact_url(&self.url), "Fetching one call forecast");

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                WeatherError::Timeout(self.timeout_secs)
            } else {
                WeatherError::RequestFailed(e.without_url().to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.without_url().to_string()))?;

        let parsed: OneCallResponse =
            serde_json::from_slice(&body).map_err(|e| WeatherError::ParseError(e.to_string()))?;

        debug!(
            timezone = %parsed.timezone,
            hourly = parsed.hourly.len(),
            "Received one call forecast"
        );

        Ok(parsed)
    }
}
