//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84-style (latitude, longitude) pair in decimal degrees.
///
/// Values are not validated; out-of-range coordinates propagate as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (positive = north).
    pub lat: f64,
    /// Longitude in degrees (positive = east).
    pub lon: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// Calculate the distance between two points using the haversine formula.
///
/// Returns the distance in kilometers.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Haversine distance in meters.
pub fn haversine_m(a: Coordinate, b: Coordinate) -> f64 {
    haversine_km(a, b) * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_haversine_distance() {
        // Seattle to Portland is approximately 233 km
        let seattle = Coordinate::new(47.6062, -122.3321);
        let portland = Coordinate::new(45.5152, -122.6784);
        let dist = haversine_km(seattle, portland);
        assert!((dist - 233.0).abs() < 5.0, "got {dist}");
    }

    #[test]
    fn test_haversine_zero_and_symmetric() {
        let a = Coordinate::new(51.2, 3.4);
        let b = Coordinate::new(51.25, 3.5);
        assert_eq!(haversine_km(a, a), 0.0);
        assert_relative_eq!(haversine_km(a, b), haversine_km(b, a), epsilon = 1e-12);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // One degree along a meridian is R * pi / 180
        let d = haversine_m(Coordinate::new(10.0, 20.0), Coordinate::new(11.0, 20.0));
        let expected = EARTH_RADIUS_KM * 1000.0 * std::f64::consts::PI / 180.0;
        assert_relative_eq!(d, expected, max_relative = 1e-9);
    }
}
