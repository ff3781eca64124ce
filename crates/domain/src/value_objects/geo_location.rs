//! Forecast location

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Point the forecast is requested for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

/// Rejected coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error(
    "Invalid coordinates ({latitude}, {longitude}): latitude must be within [-90, 90] \
     and longitude within [-180, 180]"
)]
pub struct InvalidCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    /// Validate and build a location
    ///
    /// NaN fails both range checks and is rejected with everything else
    /// outside [-90, 90] x [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        let lat_ok = (-90.0..=90.0).contains(&latitude);
        let lon_ok = (-180.0..=180.0).contains(&longitude);
        if !(lat_ok && lon_ok) {
            return Err(InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Six decimals, the precision sent to the provider
impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_edges() {
        for (lat, lon) in [(90.0, 180.0), (-90.0, -180.0), (0.0, 0.0)] {
            let loc = GeoLocation::new(lat, lon).expect("valid coordinates");
            assert!((loc.latitude() - lat).abs() < f64::EPSILON);
            assert!((loc.longitude() - lon).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(GeoLocation::new(90.000_1, 0.0).is_err());
        assert!(GeoLocation::new(-91.0, 0.0).is_err());
        assert!(GeoLocation::new(0.0, 180.5).is_err());
        assert!(GeoLocation::new(0.0, -181.0).is_err());
    }

    #[test]
    fn rejects_nan() {
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
        assert!(GeoLocation::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn display_uses_six_decimals() {
        let loc = GeoLocation::new(47.6062, -122.3321).expect("valid");
        assert_eq!(format!("{loc}"), "47.606200, -122.332100");
    }

    #[test]
    fn error_reports_rejected_pair() {
        let err = GeoLocation::new(120.0, 13.4).unwrap_err();
        assert!((err.latitude - 120.0).abs() < f64::EPSILON);
        let msg = err.to_string();
        assert!(msg.contains("(120, 13.4)"));
        assert!(msg.contains("latitude must be within [-90, 90]"));
    }
}
