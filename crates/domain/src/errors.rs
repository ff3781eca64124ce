//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// A weather record carries no condition descriptors
    #[error("Missing condition data: {record} has no weather descriptors")]
    MissingConditionData { record: String },

    /// Timezone name could not be resolved against the IANA database
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Unit system not understood by the provider
    #[error("Invalid unit system: {0}. Use 'standard', 'metric' or 'imperial'")]
    InvalidUnitSystem(String),

    /// Date/time conversion error
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
}

impl DomainError {
    /// Missing conditions on the current observation
    pub fn missing_current_conditions() -> Self {
        Self::MissingConditionData {
            record: "current".to_string(),
        }
    }

    /// Missing conditions on the hourly entry at `index` of the raw sequence
    pub fn missing_hourly_conditions(index: usize) -> Self {
        Self::MissingConditionData {
            record: format!("hourly[{index}]"),
        }
    }

    /// Check if this error was caused by malformed provider data
    pub const fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::MissingConditionData { .. } | Self::InvalidDateTime(_)
        )
    }
}
