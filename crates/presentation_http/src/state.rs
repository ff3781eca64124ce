//! Application state shared across handlers

use std::sync::Arc;

use application::WeatherDisplayService;
use domain::UnitSystem;
use infrastructure::{AppConfig, TemplateEngine};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Display state service for both data sources
    pub weather: Arc<WeatherDisplayService>,
    /// HTML templates
    pub templates: TemplateEngine,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Unit system the provider reports in
    pub units: UnitSystem,
}
