//! Weather display service
//!
//! Facade for request handlers: picks the live or fixture source and routes
//! the request through the shared state cache.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use domain::DisplayState;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{CacheStats, StateCache};
use crate::error::ApplicationError;
use crate::ports::WeatherSourcePort;

/// Default validity window for a display state
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(5 * 60);

/// Which upstream a request wants data from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// The remote weather provider
    #[default]
    Live,
    /// The local fixture file
    #[serde(alias = "fake")]
    Fixture,
}

impl DataSource {
    /// Stable lowercase label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Fixture => "fixture",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "fixture" | "fake" => Ok(Self::Fixture),
            other => Err(ApplicationError::Configuration(format!(
                "unknown data source: {other}"
            ))),
        }
    }
}

/// Serves display states for either data source
pub struct WeatherDisplayService {
    cache: Arc<StateCache>,
    live: Arc<dyn WeatherSourcePort>,
    fixture: Arc<dyn WeatherSourcePort>,
    max_age: Duration,
}

impl fmt::Debug for WeatherDisplayService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherDisplayService")
            .field("cache", &self.cache)
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}

impl WeatherDisplayService {
    /// Create a service with the default max age
    #[must_use]
    pub fn new(
        cache: Arc<StateCache>,
        live: Arc<dyn WeatherSourcePort>,
        fixture: Arc<dyn WeatherSourcePort>,
    ) -> Self {
        Self {
            cache,
            live,
            fixture,
            max_age: DEFAULT_MAX_AGE,
        }
    }

    /// Override how long a refreshed state stays valid
    #[must_use]
    pub const fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Configured validity window
    #[must_use]
    pub const fn max_age(&self) -> Duration {
        self.max_age
    }

    fn port(&self, source: DataSource) -> &Arc<dyn WeatherSourcePort> {
        match source {
            DataSource::Live => &self.live,
            DataSource::Fixture => &self.fixture,
        }
    }

    /// Display state for `source`, refreshed if the cached one is unusable
    ///
    /// # Errors
    ///
    /// Returns the fetch or transform error of a failed refresh.
    #[instrument(skip(self))]
    pub async fn display_state(
        &self,
        source: DataSource,
    ) -> Result<Arc<DisplayState>, ApplicationError> {
        let port = self.port(source);
        let source_id = port.source_id();

        let state = self
            .cache
            .get_or_refresh(&source_id, self.max_age, || port.fetch_snapshot())
            .await?;

        debug!(expires_at = %state.expires_at, "Display state ready");
        Ok(state)
    }

    /// Cached state and the source it came from, without refreshing
    #[must_use]
    pub fn cached_state(&self) -> Option<(DataSource, Arc<DisplayState>)> {
        let state = self.cache.peek()?;
        let source = [DataSource::Live, DataSource::Fixture]
            .into_iter()
            .find(|s| self.port(*s).source_id() == state.source_id)?;
        Some((source, state))
    }

    /// Whether a state returned by `cached_state` is still servable
    #[must_use]
    pub fn is_fresh(&self, state: &DisplayState) -> bool {
        self.cache.is_valid(state)
    }

    /// Cache counters
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
