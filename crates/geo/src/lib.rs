//! Geospatial utilities for mealfinder.
//!
//! This crate provides:
//! - Validated coordinates
//! - Haversine distance in kilometers and miles
//!
//! # Example
//!
//! ```
//! use mealfinder_geo::{haversine_distance_miles, Coordinate};
//!
//! let soho = Coordinate::new(40.7233, -74.0030);
//! let union_square = Coordinate::new(40.7359, -73.9911);
//!
//! let miles = haversine_distance_miles(&soho, &union_square);
//! assert!(miles > 0.9 && miles < 1.3);
//! ```

mod error;
mod haversine;

pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{haversine_distance, haversine_distance_miles, EARTH_RADIUS_KM, EARTH_RADIUS_MI};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    #[serde(alias = "lat")]
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate without range checks.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting out-of-range or non-finite values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(GeoError::InvalidCoordinate(format!(
                "latitude {latitude}, longitude {longitude}"
            )))
        }
    }

    /// Returns true if the coordinate has valid values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::NAN).is_valid());
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        let err = Coordinate::try_new(40.7, -200.0).unwrap_err();
        assert_eq!(err.code(), GeoErrorCode::InvalidCoordinate);
        assert_eq!(err.code() as u32, 10002);
        assert!(Coordinate::try_new(40.7, -74.0).is_ok());
    }

    #[test]
    fn test_deserialize_short_keys() {
        let coord: Coordinate = serde_json::from_str(r#"{"lat": 40.7, "lng": -74.0}"#).unwrap();
        assert_eq!(coord, Coordinate::new(40.7, -74.0));
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let coord: Coordinate = (40.7128, -74.0060).into();
        assert_eq!(coord.latitude, 40.7128);
    }
}
