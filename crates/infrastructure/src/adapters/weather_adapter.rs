//! Weather adapter - Implements WeatherSourcePort using integration_weather

use std::path::Path;
use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::WeatherSourcePort;
use async_trait::async_trait;
use domain::{ConditionDescriptor, RawSnapshot, RawWeather};
use integration_weather::{
    FixtureClient, OneCallClient, OneCallResponse, WeatherClient, WeatherConfig, WeatherError,
    WeatherPoint, redact_url,
};
use tracing::{debug, instrument};

/// Adapter turning One Call payloads into raw snapshots
pub struct WeatherSourceAdapter {
    client: Arc<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherSourceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherSourceAdapter")
            .field("source", &redact_url(self.client.source_id()))
            .finish()
    }
}

impl WeatherSourceAdapter {
    /// Wrap an existing client
    #[must_use]
    pub fn new(client: Arc<dyn WeatherClient>) -> Self {
        Self { client }
    }

    /// Adapter for the live One Call API
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are invalid or the HTTP client
    /// fails to initialize.
    pub fn live(config: &WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OneCallClient::new(config).map_err(Self::map_error)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Adapter for a fixture file
    #[must_use]
    pub fn fixture(path: impl AsRef<Path>) -> Self {
        Self::new(Arc::new(FixtureClient::new(path)))
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
            WeatherError::InvalidCoordinates | WeatherError::InvalidBaseUrl(_) => {
                ApplicationError::Configuration(err.to_string())
            },
            WeatherError::ConnectionFailed(_)
            | WeatherError::RequestFailed(_)
            | WeatherError::Timeout(_)
            | WeatherError::ParseError(_)
            | WeatherError::ServiceUnavailable(_)
            | WeatherError::FixtureUnavailable(_) => ApplicationError::Fetch(err.to_string()),
        }
    }

    fn map_point(point: &WeatherPoint) -> RawWeather {
        RawWeather {
            timestamp: point.dt,
            temperature: point.temp,
            feels_like: point.feels_like,
            conditions: point
                .weather
                .iter()
                .map(|w| ConditionDescriptor::new(w.description.clone(), w.icon.clone()))
                .collect(),
            precipitation: point.rain_volumes(),
        }
    }

    fn map_response(response: &OneCallResponse, source_id: &str) -> RawSnapshot {
        RawSnapshot {
            timezone: response.timezone.clone(),
            current: Self::map_point(&response.current),
            hourly: response.hourly.iter().map(Self::map_point).collect(),
            source_id: source_id.to_string(),
        }
    }
}

#[async_trait]
impl WeatherSourcePort for WeatherSourceAdapter {
    fn source_id(&self) -> String {
        self.client.source_id().to_string()
    }

    #[instrument(skip(self), fields(source = %redact_url(self.client.source_id())))]
    async fn fetch_snapshot(&self) -> Result<RawSnapshot, ApplicationError> {
        let result = self.client.fetch().await.map_err(Self::map_error);

        match &result {
            Ok(response) => {
                debug!(
                    timezone = %response.timezone,
                    hourly = response.hourly.len(),
                    "Retrieved weather snapshot"
                );
            },
            Err(e) => {
                debug!(error = %e, "Failed to retrieve weather snapshot");
            },
        }

        result.map(|r| Self::map_response(&r, self.client.source_id()))
    }
}
