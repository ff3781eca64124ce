//! Display-ready weather state
//!
//! The shape handed to views. A `DisplayState` is always built in one piece
//! from a single `RawSnapshot` and is never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Maximum number of hourly entries shown
pub const HOURS_TO_SHOW: usize = 8;

/// One hour of the forecast strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyDisplay {
    /// Local time label, e.g. "3:00 PM"
    pub time_label: String,
    /// Temperature rounded to the nearest integer
    pub temperature: i64,
    /// Provider icon code
    pub icon: String,
    /// Condition description
    pub description: String,
    /// Whether any precipitation was forecast
    pub rain: bool,
}

/// Current conditions plus the upcoming hours, with cache metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    /// Current temperature rounded to the nearest integer
    pub temperature: i64,
    /// Apparent temperature rounded to the nearest integer
    pub feels_like: i64,
    /// Local observation time label, e.g. "Mon 3:04 PM"
    pub time_label: String,
    /// Condition description
    pub description: String,
    /// Provider icon code
    pub icon: String,
    /// Upcoming hours, chronological, at most `HOURS_TO_SHOW`
    pub hourly: Vec<HourlyDisplay>,
    /// Instant from which this state is stale
    pub expires_at: DateTime<Utc>,
    /// Identifier of the source that produced this state
    #[serde(skip_serializing)]
    pub source_id: String,
}

/// Why a cached state can no longer be served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// The validity window has passed
    Expired,
    /// The state came from a different source
    SourceChanged,
}

impl fmt::Display for Staleness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expired => write!(f, "expired"),
            Self::SourceChanged => write!(f, "source_changed"),
        }
    }
}

impl DisplayState {
    /// Check whether this state may be served for `source_id` at `now`
    ///
    /// Returns `None` when the state is valid. The boundary is exclusive:
    /// at exactly `expires_at` the state is already expired.
    #[must_use]
    pub fn staleness(&self, source_id: &str, now: DateTime<Utc>) -> Option<Staleness> {
        if self.source_id != source_id {
            Some(Staleness::SourceChanged)
        } else if now >= self.expires_at {
            Some(Staleness::Expired)
        } else {
            None
        }
    }

    /// Shorthand for `staleness(..).is_none()`
    #[must_use]
    pub fn is_valid_for(&self, source_id: &str, now: DateTime<Utc>) -> bool {
        self.staleness(source_id, now).is_none()
    }
}
