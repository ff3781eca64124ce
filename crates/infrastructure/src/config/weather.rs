//! Weather provider configuration.

use std::path::PathBuf;
use std::time::Duration;

use domain::{GeoLocation, Timezone, UnitSystem};
use integration_weather::DEFAULT_FIXTURE_FILE;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Weather provider configuration
///
/// Accepts the short keys `lat`, `lon` and `tz` as aliases.
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherSettings {
    /// Provider API key (sensitive - uses `SecretString`)
    #[serde(default = "empty_secret", skip_serializing)]
    pub api_key: SecretString,

    /// Latitude of the forecast location
    #[serde(default, alias = "lat")]
    pub latitude: f64,

    /// Longitude of the forecast location
    #[serde(default, alias = "lon")]
    pub longitude: f64,

    /// Unit system: "standard", "metric" or "imperial"
    #[serde(default = "default_units")]
    pub units: String,

    /// IANA timezone used for time labels
    #[serde(default = "default_timezone", alias = "tz")]
    pub timezone: String,

    /// One Call API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// How long a display state stays valid, in seconds
    #[serde(default = "default_max_age")]
    pub max_age_secs: u64,

    /// Fixture file used by the fake views
    #[serde(default = "default_fixture_path")]
    pub fixture_path: String,
}

impl std::fmt::Debug for WeatherSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherSettings")
            .field("api_key", &"[REDACTED]")
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("units", &self.units)
            .field("timezone", &self.timezone)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_age_secs", &self.max_age_secs)
            .field("fixture_path", &self.fixture_path)
            .finish()
    }
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

fn default_units() -> String {
    UnitSystem::default().as_str().to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    10
}

const fn default_max_age() -> u64 {
    5 * 60
}

fn default_fixture_path() -> String {
    DEFAULT_FIXTURE_FILE.to_string()
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_key: empty_secret(),
            latitude: 0.0,
            longitude: 0.0,
            units: default_units(),
            timezone: default_timezone(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_age_secs: default_max_age(),
            fixture_path: default_fixture_path(),
        }
    }
}

impl WeatherSettings {
    /// Resolve the raw settings into validated domain values
    pub fn resolve(&self) -> Result<ResolvedWeatherSettings, ConfigError> {
        let location = GeoLocation::new(self.latitude, self.longitude)
            .map_err(|e| ConfigError::InvalidCoordinates(e.to_string()))?;
        let units: UnitSystem = self
            .units
            .parse()
            .map_err(|e: domain::DomainError| ConfigError::InvalidUnitSystem(e.to_string()))?;
        let timezone = Timezone::parse(&self.timezone)
            .map_err(|e| ConfigError::InvalidTimezone(e.to_string()))?;

        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "weather.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.max_age_secs == 0 {
            return Err(ConfigError::Invalid(
                "weather.max_age_secs must be greater than zero".to_string(),
            ));
        }

        Ok(ResolvedWeatherSettings {
            api_key: self.api_key.clone(),
            location,
            units,
            timezone,
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            max_age: Duration::from_secs(self.max_age_secs),
            fixture_path: PathBuf::from(&self.fixture_path),
        })
    }
}

/// Weather settings after validation
#[derive(Clone)]
pub struct ResolvedWeatherSettings {
    api_key: SecretString,
    /// Forecast location
    pub location: GeoLocation,
    /// Unit system requested from the provider
    pub units: UnitSystem,
    /// Timezone used for labels
    pub timezone: Timezone,
    /// One Call API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Validity window of a display state
    pub max_age: Duration,
    /// Fixture file used by the fake views
    pub fixture_path: PathBuf,
}

impl std::fmt::Debug for ResolvedWeatherSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedWeatherSettings")
            .field("api_key", &"[REDACTED]")
            .field("location", &self.location)
            .field("units", &self.units)
            .field("timezone", &self.timezone)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_age", &self.max_age)
            .field("fixture_path", &self.fixture_path)
            .finish()
    }
}

impl ResolvedWeatherSettings {
    /// Whether an API key was configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }

    /// Convert to `integration_weather`'s `WeatherConfig`
    #[must_use]
    pub fn to_client_config(&self) -> integration_weather::WeatherConfig {
        integration_weather::WeatherConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            ..integration_weather::WeatherConfig::new(
                self.api_key.expose_secret(),
                self.location.latitude(),
                self.location.longitude(),
            )
            .with_units(self.units.as_str())
        }
    }
}
