//! Application services

mod state_cache;
mod weather_display_service;
mod weather_transformer;

pub use state_cache::{CacheStats, StateCache};
pub use weather_display_service::{DEFAULT_MAX_AGE, DataSource, WeatherDisplayService};
pub use weather_transformer::WeatherTransformer;
