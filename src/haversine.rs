//! Great-circle distance between visit coordinates.
//!
//! Ignores roads entirely; used as the proxy for travel distance.

use crate::traits::DistanceModel;
use crate::visit::Coordinate;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Haversine;

impl DistanceModel for Haversine {
    fn distance_km(&self, from: Coordinate, to: Coordinate) -> f64 {
        haversine_km(from, to)
    }
}

/// Calculate haversine distance between two points in kilometers.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat().to_radians();
    let lat2_rad = to.lat().to_radians();
    let delta_lat = (to.lat() - from.lat()).to_radians();
    let delta_lon = (to.lon() - from.lon()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_haversine_same_point() {
        let p = coord(4.711, -74.0721);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Bogotá (4.711, -74.0721) to Medellín (6.2442, -75.5812), ~240 km
        let dist = haversine_km(coord(4.711, -74.0721), coord(6.2442, -75.5812));
        assert!(dist > 230.0 && dist < 250.0, "BOG to MDE should be ~240km, got {}", dist);
    }

    #[test]
    fn test_haversine_symmetric() {
        let pairs = [
            (coord(4.711, -74.0721), coord(4.6097, -74.0817)),
            (coord(-33.45, -70.66), coord(51.5, -0.12)),
            (coord(89.9, 179.9), coord(-89.9, -179.9)),
        ];
        for (a, b) in pairs {
            assert_eq!(haversine_km(a, b), haversine_km(b, a));
        }
    }

    #[test]
    fn test_model_delegates_to_formula() {
        let a = coord(4.711, -74.0721);
        let b = coord(4.72, -74.08);
        assert_eq!(Haversine.distance_km(a, b), haversine_km(a, b));
        let dist = haversine_km(a, b);
        assert!(dist > 1.0 && dist < 1.5, "got {}", dist);
    }
}
