//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `weather`: provider credentials, location and cache lifetime
//! - `page`: rendered view settings and log output

mod page;
mod server;
mod weather;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use page::{PageConfig, TelemetryAppConfig};
pub use server::ServerConfig;
pub use weather::{ResolvedWeatherSettings, WeatherSettings};

/// Base name of the optional configuration file (`config.toml`, `config.json`, ...)
pub const CONFIG_FILE: &str = "config";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "NOWCAST";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Configuration errors, all fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Latitude or longitude out of range
    #[error("{0}")]
    InvalidCoordinates(String),

    /// Unit system not understood by the provider
    #[error("{0}")]
    InvalidUnitSystem(String),

    /// Timezone name could not be resolved
    #[error("{0}")]
    InvalidTimezone(String),

    /// Any other invalid value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherSettings,

    /// Rendered view configuration
    #[serde(default)]
    pub page: PageConfig,

    /// Log output configuration
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Environment variables use a double underscore between section and
    /// key, e.g. `NOWCAST_SERVER__PORT` or `NOWCAST_WEATHER__API_KEY`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(
            config::File::with_name(CONFIG_FILE).required(false),
            environment(),
        )
    }

    /// Load configuration from an explicit file source and environment
    pub fn load_from<S>(file: S, env: config::Environment) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate everything needed before the server starts
    pub fn validate(&self) -> Result<ResolvedWeatherSettings, ConfigError> {
        self.server.socket_addr()?;
        if self.page.reload_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "page.reload_interval_secs must be greater than zero".to_string(),
            ));
        }
        self.weather.resolve()
    }
}

/// Environment source with the application prefix
#[must_use]
pub fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        environment().source(Some(map))
    }

    fn no_file() -> config::File<config::FileSourceFile, config::FileFormat> {
        config::File::with_name("does-not-exist-nowcast").required(false)
    }

    #[test]
    fn defaults_without_sources() {
        let config = AppConfig::load_from(no_file(), env(&[])).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.weather.units, "standard");
        assert_eq!(config.page.reload_interval_secs, 60);
        assert!(!config.telemetry.json_logs);
    }

    #[test]
    fn environment_overrides() {
        let config = AppConfig::load_from(
            no_file(),
            env(&[
                ("NOWCAST_SERVER__PORT", "9090"),
                ("NOWCAST_WEATHER__API_KEY", "env-key"),
                ("NOWCAST_WEATHER__TIMEZONE", "Asia/Tokyo"),
                ("NOWCAST_TELEMETRY__JSON_LOGS", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.weather.api_key.expose_secret(), "env-key");
        assert_eq!(config.weather.timezone, "Asia/Tokyo");
        assert!(config.telemetry.json_logs);
    }

    #[test]
    fn json_file_with_short_keys() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"weather": {{"api_key": "file-key", "lat": 40.7128, "lon": -74.006, "units": "imperial", "tz": "America/New_York"}}}}"#
        )
        .unwrap();

        let config =
            AppConfig::load_from(config::File::from(file.path()), env(&[])).unwrap();
        let resolved = config.validate().unwrap();

        assert_eq!(resolved.timezone.name(), "America/New_York");
        assert_eq!(resolved.units.as_str(), "imperial");
        assert!((resolved.location.latitude() - 40.7128).abs() < f64::EPSILON);
    }

    #[test]
    fn environment_wins_over_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 3000\nhost = \"127.0.0.1\"").unwrap();

        let config = AppConfig::load_from(
            config::File::from(file.path()),
            env(&[("NOWCAST_SERVER__PORT", "4000")]),
        )
        .unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn malformed_file_is_load_error() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{ not json").unwrap();

        let result = AppConfig::load_from(config::File::from(file.path()), env(&[]));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn validate_rejects_bad_timezone() {
        let mut config = AppConfig::default();
        config.weather.timezone = "Nowhere/Special".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn validate_rejects_zero_reload_interval() {
        let mut config = AppConfig::default();
        config.page.reload_interval_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn validate_defaults() {
        let resolved = AppConfig::default().validate().unwrap();
        assert!(!resolved.has_api_key());
        assert_eq!(resolved.timezone.name(), "UTC");
    }
}
