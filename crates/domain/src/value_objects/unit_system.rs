//! Measurement unit system requested from the weather provider

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Unit system understood by the provider's `units` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Kelvin
    #[default]
    Standard,
    /// Celsius
    Metric,
    /// Fahrenheit
    Imperial,
}

impl UnitSystem {
    /// Query parameter value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    /// Suffix for rendering temperatures
    #[must_use]
    pub const fn temperature_suffix(&self) -> &'static str {
        match self {
            Self::Standard => "K",
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            _ => Err(DomainError::InvalidUnitSystem(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_standard() {
        assert_eq!(UnitSystem::default(), UnitSystem::Standard);
    }

    #[test]
    fn from_str_case_insensitive() {
        assert_eq!("metric".parse::<UnitSystem>().unwrap(), UnitSystem::Metric);
        assert_eq!("IMPERIAL".parse::<UnitSystem>().unwrap(), UnitSystem::Imperial);
        assert_eq!(" Standard ".parse::<UnitSystem>().unwrap(), UnitSystem::Standard);
    }

    #[test]
    fn from_str_rejects_unknown() {
        assert!("celsius".parse::<UnitSystem>().is_err());
        assert!("".parse::<UnitSystem>().is_err());
    }

    #[test]
    fn display_matches_query_value() {
        assert_eq!(UnitSystem::Imperial.to_string(), "imperial");
        assert_eq!(UnitSystem::Metric.as_str(), "metric");
    }

    #[test]
    fn temperature_suffixes() {
        assert_eq!(UnitSystem::Standard.temperature_suffix(), "K");
        assert_eq!(UnitSystem::Metric.temperature_suffix(), "°C");
        assert_eq!(UnitSystem::Imperial.temperature_suffix(), "°F");
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(
            serde_json::to_string(&UnitSystem::Imperial).unwrap(),
            "\"imperial\""
        );
        let parsed: UnitSystem = serde_json::from_str("\"metric\"").unwrap();
        assert_eq!(parsed, UnitSystem::Metric);
    }
}
