//! Timezone value object

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::DomainError;

/// A timezone resolved against the IANA database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timezone(Tz);

impl Timezone {
    /// Resolve an IANA timezone name such as `America/Los_Angeles`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the name is unknown.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        name.trim()
            .parse::<Tz>()
            .map(Self)
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
    }

    /// UTC timezone
    #[must_use]
    pub const fn utc() -> Self {
        Self(Tz::UTC)
    }

    /// Get the underlying `chrono_tz` zone
    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.0
    }

    /// Get the IANA name
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Convert an epoch timestamp (seconds) into local time
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateTime` if chrono cannot represent the timestamp.
    pub fn localize(&self, epoch_secs: i64) -> Result<DateTime<Tz>, DomainError> {
        let utc = DateTime::<Utc>::from_timestamp(epoch_secs, 0).ok_or_else(|| {
            DomainError::InvalidDateTime(format!("timestamp {epoch_secs} is out of range"))
        })?;
        Ok(self.0.from_utc_datetime(&utc.naive_utc()))
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Timezone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timezone_parse() {
        let tz = Timezone::parse("Europe/Berlin").expect("known zone");
        assert_eq!(tz.name(), "Europe/Berlin");
        assert_eq!(tz.tz(), chrono_tz::Europe::Berlin);
    }

    #[test]
    fn test_timezone_parse_trims_whitespace() {
        let tz = Timezone::parse("  America/New_York ").expect("known zone");
        assert_eq!(tz.name(), "America/New_York");
    }

    #[test]
    fn test_timezone_parse_unknown() {
        let err = Timezone::parse("Atlantis/Lost").unwrap_err();
        assert!(matches!(err, DomainError::InvalidTimezone(ref name) if name == "Atlantis/Lost"));
    }

    #[test]
    fn test_timezone_default_is_utc() {
        assert_eq!(Timezone::default(), Timezone::utc());
        assert_eq!(Timezone::default().name(), "UTC");
    }

    #[test]
    fn test_timezone_display() {
        let tz: Timezone = "Asia/Tokyo".parse().expect("known zone");
        assert_eq!(format!("{tz}"), "Asia/Tokyo");
    }

    #[test]
    fn test_localize_applies_offset() {
        let tz = Timezone::parse("Asia/Tokyo").expect("known zone");
        // 2024-01-15T12:00:00Z is 21:00 in Tokyo (UTC+9)
        let local = tz.localize(1_705_320_000).expect("in range");
        assert_eq!(local.format("%H:%M").to_string(), "21:00");
    }

    #[test]
    fn test_localize_out_of_range() {
        let err = Timezone::utc().localize(i64::MAX).unwrap_err();
        assert!(matches!(err, DomainError::InvalidDateTime(_)));
    }
}
