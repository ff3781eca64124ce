//! Raw weather snapshot entities
//!
//! Provider-agnostic view of one fetch: the current observation plus the
//! hourly series, tagged with the identifier of the source that produced it.

use std::collections::HashMap;

/// A (description, icon) pair describing the weather at one time point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionDescriptor {
    /// Human readable description, e.g. "light rain"
    pub description: String,
    /// Provider icon code, e.g. "10d"
    pub icon: String,
}

impl ConditionDescriptor {
    /// Create a new condition descriptor
    #[must_use]
    pub fn new(description: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            icon: icon.into(),
        }
    }
}

/// Weather at a single time point
#[derive(Debug, Clone, PartialEq)]
pub struct RawWeather {
    /// Observation or forecast time, epoch seconds
    pub timestamp: i64,
    /// Temperature in the requested unit system
    pub temperature: f64,
    /// Apparent temperature in the requested unit system
    pub feels_like: f64,
    /// Condition descriptors, most significant first
    pub conditions: Vec<ConditionDescriptor>,
    /// Precipitation volumes keyed by window (e.g. "1h"); empty when dry
    pub precipitation: HashMap<String, f64>,
}

impl RawWeather {
    /// The first (most significant) condition descriptor
    #[must_use]
    pub fn primary_condition(&self) -> Option<&ConditionDescriptor> {
        self.conditions.first()
    }

    /// Whether any precipitation was reported, regardless of volume
    #[must_use]
    pub fn has_rain(&self) -> bool {
        !self.precipitation.is_empty()
    }
}

/// One complete fetch from a weather source
#[derive(Debug, Clone, PartialEq)]
pub struct RawSnapshot {
    /// Timezone name reported by the provider
    pub timezone: String,
    /// Current conditions
    pub current: RawWeather,
    /// Hourly forecast, in provider order
    pub hourly: Vec<RawWeather>,
    /// Identifier of the source that produced this snapshot
    pub source_id: String,
}
