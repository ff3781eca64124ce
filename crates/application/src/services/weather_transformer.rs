//! Weather transformer
//!
//! Turns a raw snapshot into the display state. Pure: the same snapshot,
//! timezone and expiry always produce the same state.

use chrono::{DateTime, Utc};
use domain::{
    DisplayState, DomainError, HOURS_TO_SHOW, HourlyDisplay, RawSnapshot, RawWeather, Timezone,
};

/// Label format for the current observation, e.g. "Mon 3:04 PM"
const CURRENT_TIME_FORMAT: &str = "%a %-I:%M %p";

/// Label format for hourly entries, e.g. "3:04 PM"
const HOURLY_TIME_FORMAT: &str = "%-I:%M %p";

/// Converts raw snapshots into display states for one timezone
#[derive(Debug, Clone, Copy)]
pub struct WeatherTransformer {
    timezone: Timezone,
    hours_to_show: usize,
}

impl WeatherTransformer {
    /// Create a transformer rendering times in `timezone`
    #[must_use]
    pub const fn new(timezone: Timezone) -> Self {
        Self {
            timezone,
            hours_to_show: HOURS_TO_SHOW,
        }
    }

    /// Timezone used for labels
    #[must_use]
    pub const fn timezone(&self) -> Timezone {
        self.timezone
    }

    /// Build the display state for `snapshot`
    ///
    /// Hourly entries at or before the current observation are skipped, and
    /// at most `HOURS_TO_SHOW` of the remaining ones are kept.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingConditionData` if the current record or a
    /// kept hourly record has no condition descriptors, and
    /// `DomainError::InvalidDateTime` for timestamps chrono cannot represent.
    pub fn transform(
        &self,
        snapshot: &RawSnapshot,
        expires_at: DateTime<Utc>,
    ) -> Result<DisplayState, DomainError> {
        let current = &snapshot.current;
        let condition = current
            .primary_condition()
            .ok_or_else(DomainError::missing_current_conditions)?;

        let time_label = self
            .timezone
            .localize(current.timestamp)?
            .format(CURRENT_TIME_FORMAT)
            .to_string();

        Ok(DisplayState {
            temperature: round_temperature(current.temperature),
            feels_like: round_temperature(current.feels_like),
            time_label,
            description: condition.description.clone(),
            icon: condition.icon.clone(),
            hourly: self.hourly(current.timestamp, &snapshot.hourly)?,
            expires_at,
            source_id: snapshot.source_id.clone(),
        })
    }

    fn hourly(
        &self,
        current_timestamp: i64,
        entries: &[RawWeather],
    ) -> Result<Vec<HourlyDisplay>, DomainError> {
        let mut hourly = Vec::with_capacity(self.hours_to_show);

        for (index, entry) in entries.iter().enumerate() {
            if entry.timestamp <= current_timestamp {
                continue;
            }
            if hourly.len() == self.hours_to_show {
                break;
            }

            let condition = entry
                .primary_condition()
                .ok_or_else(|| DomainError::missing_hourly_conditions(index))?;

            hourly.push(HourlyDisplay {
                time_label: self
                    .timezone
                    .localize(entry.timestamp)?
                    .format(HOURLY_TIME_FORMAT)
                    .to_string(),
                temperature: round_temperature(entry.temperature),
                icon: condition.icon.clone(),
                description: condition.description.clone(),
                rain: entry.has_rain(),
            });
        }

        Ok(hourly)
    }
}

/// Round half away from zero
#[allow(clippy::cast_possible_truncation)]
fn round_temperature(value: f64) -> i64 {
    value.round() as i64
}
