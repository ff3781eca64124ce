//! Template engine for the HTML views
//!
//! Uses Tera with two embedded templates:
//! - `pages/reloader.html`: shell page that periodically reloads an inner view
//! - `pages/inner.html`: current conditions plus the hourly strip
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::templates::{ReloaderPage, TemplateEngine};
//!
//! let engine = TemplateEngine::new()?;
//! let html = engine.render_reloader(&ReloaderPage {
//!     css_url: "/static/main.css".into(),
//!     favicon_url: "https://openweathermap.org/img/wn/04d@2x.png".into(),
//!     inner_url: "/inner".into(),
//!     reload_interval_secs: 60,
//! })?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use domain::{DisplayState, UnitSystem};
use serde::Serialize;
use tera::{Context, Tera, Value};
use thiserror::Error;

/// Provider icon URL pattern, `{icon}` is replaced by the icon code
const ICON_URL_PATTERN: &str = "https://openweathermap.org/img/wn/{icon}@2x.png";

const RELOADER_TEMPLATE: &str = "pages/reloader.html";
const INNER_TEMPLATE: &str = "pages/inner.html";

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Render(String),

    /// Template compilation failed
    #[error("Template compilation failed: {0}")]
    Compile(String),
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => Self::Render(e.to_string()),
        }
    }
}

/// Data for the reloader shell page
#[derive(Debug, Clone, Serialize)]
pub struct ReloaderPage {
    /// Stylesheet URL
    pub css_url: String,
    /// Favicon URL
    pub favicon_url: String,
    /// URL of the inner view to load
    pub inner_url: String,
    /// Reload period in seconds
    pub reload_interval_secs: u64,
}

/// Embedded templates - compiled into the binary
mod embedded {
    pub const RELOADER: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Weather</title>
    <link rel="stylesheet" href="{{ css_url | safe }}">
    <link rel="icon" href="{{ favicon_url | safe }}">
</head>
<body>
    <div id="weather"></div>
    <script>
        (function () {
            var innerUrl = {{ inner_url | json_encode() | safe }};
            var target = document.getElementById("weather");
            function reload() {
                fetch(innerUrl, { cache: "no-store" })
                    .then(function (r) { return r.ok ? r.text() : Promise.reject(r.status); })
                    .then(function (html) { target.innerHTML = html; })
                    .catch(function () {});
            }
            reload();
            setInterval(reload, {{ reload_interval_secs * 1000 }});
        })();
    </script>
</body>
</html>
"#;

    pub const INNER: &str = r#"<div class="current">
    <img class="icon" src="{{ state.icon | icon_url }}" alt="{{ state.description }}">
    <div class="temperature">{{ state.temperature }}{{ suffix }}</div>
    <div class="feels-like">Feels like {{ state.feels_like }}{{ suffix }}</div>
    <div class="description">{{ state.description }}</div>
    <div class="time">{{ state.time_label }}</div>
</div>
<div class="hourly">
{% for hour in state.hourly %}
    <div class="hour{% if hour.rain %} rain{% endif %}">
        <div class="time">{{ hour.time_label }}</div>
        <img class="icon" src="{{ hour.icon | icon_url }}" alt="{{ hour.description }}">
        <div class="temperature">{{ hour.temperature }}{{ suffix }}</div>
    </div>
{% endfor %}
</div>
"#;
}

/// Template engine using Tera
#[derive(Clone)]
pub struct TemplateEngine {
    tera: Arc<Tera>,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("templates", &self.list_templates())
            .finish()
    }
}

impl TemplateEngine {
    /// Create a template engine with the embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);

        tera.add_raw_template(RELOADER_TEMPLATE, embedded::RELOADER)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;
        tera.add_raw_template(INNER_TEMPLATE, embedded::INNER)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;

        tera.register_filter("icon_url", icon_url_filter);

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Render the reloader shell page
    pub fn render_reloader(&self, page: &ReloaderPage) -> Result<String, TemplateError> {
        let context = Context::from_serialize(page)?;
        self.tera
            .render(RELOADER_TEMPLATE, &context)
            .map_err(TemplateError::from)
    }

    /// Render the inner view for a display state
    pub fn render_inner(
        &self,
        state: &DisplayState,
        units: UnitSystem,
    ) -> Result<String, TemplateError> {
        let mut context = Context::new();
        context.insert("state", state);
        context.insert("suffix", units.temperature_suffix());
        self.tera
            .render(INNER_TEMPLATE, &context)
            .map_err(TemplateError::from)
    }

    /// List all loaded template names
    #[must_use]
    pub fn list_templates(&self) -> Vec<&str> {
        self.tera.get_template_names().collect()
    }
}

fn icon_url_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let icon = tera::try_get_value!("icon_url", "value", String, value);
    Ok(Value::String(ICON_URL_PATTERN.replace("{icon}", &icon)))
}
