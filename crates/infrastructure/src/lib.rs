//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and provides the
//! configuration, log output and HTML rendering the server needs.

pub mod adapters;
pub mod config;
pub mod telemetry;
pub mod templates;

pub use adapters::*;
pub use config::{
    AppConfig, ConfigError, PageConfig, ResolvedWeatherSettings, ServerConfig,
    TelemetryAppConfig, WeatherSettings,
};
pub use telemetry::{TelemetryError, init_telemetry};
pub use templates::{ReloaderPage, TemplateEngine, TemplateError};
