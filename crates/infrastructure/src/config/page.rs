//! Page rendering and telemetry configuration.

use serde::{Deserialize, Serialize};

// ==============================
// Page Configuration
// ==============================

/// Settings for the rendered HTML views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Stylesheet linked from the reloader page
    #[serde(default = "default_css_url")]
    pub css_url: String,

    /// Favicon linked from the reloader page
    #[serde(default = "default_favicon_url")]
    pub favicon_url: String,

    /// How often the reloader page refreshes the inner view, in seconds
    #[serde(default = "default_reload_interval")]
    pub reload_interval_secs: u64,
}

fn default_css_url() -> String {
    "/static/main.css".to_string()
}

fn default_favicon_url() -> String {
    "https://openweathermap.org/img/wn/04d@2x.png".to_string()
}

const fn default_reload_interval() -> u64 {
    60
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            css_url: default_css_url(),
            favicon_url: default_favicon_url(),
            reload_interval_secs: default_reload_interval(),
        }
    }
}

// ==============================
// Telemetry Configuration
// ==============================

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryAppConfig {
    /// Default `EnvFilter` directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit structured JSON logs instead of human-readable text
    #[serde(default)]
    pub json_logs: bool,
}

fn default_log_filter() -> String {
    "nowcast=info,presentation_http=info,application=info,infrastructure=info,tower_http=info"
        .to_string()
}

impl Default for TelemetryAppConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json_logs: false,
        }
    }
}
