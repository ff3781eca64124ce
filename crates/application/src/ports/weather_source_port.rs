//! Weather source port
//!
//! Defines the interface for obtaining raw weather snapshots.

use async_trait::async_trait;
use domain::RawSnapshot;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for a single upstream of weather data (live provider or fixture)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherSourcePort: Send + Sync {
    /// Identifier of the data this source produces
    ///
    /// Two sources with different identifiers never share a cached state.
    fn source_id(&self) -> String;

    /// Fetch one complete snapshot
    ///
    /// The returned snapshot's `source_id` must equal `self.source_id()`.
    async fn fetch_snapshot(&self) -> Result<RawSnapshot, ApplicationError>;
}
