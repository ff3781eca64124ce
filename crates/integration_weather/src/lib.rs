//! OpenWeatherMap integration
//!
//! Client for the One Call API (<https://openweathermap.org/api/one-call-api>)
//! plus a fixture client that serves the same payload shape from disk.

pub mod client;
pub mod fixture;
mod models;

pub use client::{OneCallClient, WeatherClient, WeatherConfig, WeatherError, redact_url};
pub use fixture::{DEFAULT_FIXTURE_FILE, FixtureClient};
pub use models::{OneCallResponse, WeatherDescriptor, WeatherPoint};
