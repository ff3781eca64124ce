//! Fixture-backed weather client
//!
//! Serves a One Call payload stored on disk. Used for demos and for
//! developing views without spending API calls.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::client::{WeatherClient, WeatherError};
use crate::models::OneCallResponse;

/// Default fixture file name
pub const DEFAULT_FIXTURE_FILE: &str = "testdata.json";

/// Reads a One Call payload from a local JSON file on every fetch
#[derive(Debug, Clone)]
pub struct FixtureClient {
    path: PathBuf,
    source_id: String,
}

impl FixtureClient {
    /// Create a client for the fixture at `path`
    ///
    /// The path as given is the source identifier.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let source_id = path.display().to_string();
        Self { path, source_id }
    }

    /// Path of the fixture file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FixtureClient {
    fn default() -> Self {
        Self::new(DEFAULT_FIXTURE_FILE)
    }
}

#[async_trait]
impl WeatherClient for FixtureClient {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<OneCallResponse, WeatherError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| WeatherError::FixtureUnavailable(format!("{}: {e}", self.source_id)))?;

        let parsed: OneCallResponse =
            serde_json::from_slice(&bytes).map_err(|e| WeatherError::ParseError(e.to_string()))?;

        debug!(hourly = parsed.hourly.len(), "Loaded fixture forecast");
        Ok(parsed)
    }
}
