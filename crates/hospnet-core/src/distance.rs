//! Great-circle distance on a spherical earth model.

use crate::types::Coordinate;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates, in kilometers.
///
/// Pure and deterministic; inputs are guaranteed in-range by
/// [`Coordinate::new`], so no failure mode exists.
#[must_use]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (dlon / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("test coordinate in range")
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = coord(17.4065, 78.4772);
        assert!(haversine_km(p, p).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = coord(17.4065, 78.4772);
        let b = coord(17.4450, 78.3498);
        let ab = haversine_km(a, b);
        let ba = haversine_km(b, a);
        assert!((ab - ba).abs() < 1e-9, "ab={ab}, ba={ba}");
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = haversine_km(coord(0.0, 0.0), coord(0.0, 1.0));
        assert!((d - 111.19).abs() < 0.1, "expected ~111.19 km, got {d}");
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = haversine_km(coord(0.0, 0.0), coord(0.0, 180.0));
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half).abs() < 0.5, "expected ~{half} km, got {d}");
    }

    #[test]
    fn short_city_hop_is_small_and_positive() {
        // Two points roughly 1.5 km apart in Hyderabad.
        let d = haversine_km(coord(17.40, 78.47), coord(17.41, 78.48));
        assert!(d > 0.5 && d < 3.0, "got {d}");
    }
}
