//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in statute miles.
pub const EARTH_RADIUS_MI: f64 = 3958.8;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// # Example
/// ```
/// use mealfinder_geo::{haversine_distance, Coordinate};
///
/// let berlin = Coordinate::new(52.5200, 13.4050);
/// let paris = Coordinate::new(48.8566, 2.3522);
///
/// let distance = haversine_distance(&berlin, &paris);
/// assert!((distance - 878.0).abs() < 10.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Calculates the great-circle distance between two coordinates in miles.
///
/// Restaurant distances are reported in miles throughout mealfinder.
#[inline]
pub fn haversine_distance_miles(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_MI)
}

#[inline]
fn haversine_distance_with_radius(from: &Coordinate, to: &Coordinate, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    radius * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const BERLIN: Coordinate = Coordinate::new(52.5200, 13.4050);
    const PARIS: Coordinate = Coordinate::new(48.8566, 2.3522);
    const NEW_YORK: Coordinate = Coordinate::new(40.7128, -74.0060);
    const BOSTON: Coordinate = Coordinate::new(42.3601, -71.0589);

    #[test]
    fn test_berlin_to_paris() {
        let distance = haversine_distance(&BERLIN, &PARIS);
        assert!((distance - 878.0).abs() < 5.0, "Berlin-Paris: {}", distance);
    }

    #[test]
    fn test_new_york_to_boston_miles() {
        // ~190 miles great-circle
        let distance = haversine_distance_miles(&NEW_YORK, &BOSTON);
        assert!((distance - 190.0).abs() < 5.0, "NYC-Boston: {}", distance);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert!(haversine_distance_miles(&NEW_YORK, &NEW_YORK).abs() < 0.001);
    }

    #[test]
    fn test_symmetry() {
        let d1 = haversine_distance_miles(&NEW_YORK, &BOSTON);
        let d2 = haversine_distance_miles(&BOSTON, &NEW_YORK);
        assert!((d1 - d2).abs() < 0.001);
    }

    #[test]
    fn test_km_and_miles_agree() {
        let km = haversine_distance(&BERLIN, &PARIS);
        let miles = haversine_distance_miles(&BERLIN, &PARIS);
        assert!((km / 1.609_34 - miles).abs() < 1.0);
    }
}
