//! Geofence distance math for the time-clock screens

use rust_decimal::prelude::ToPrimitive;

use crate::types::GpsCoordinates;

/// Mean Earth radius in meters
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points, in meters.
///
/// Coordinates are stored as `Decimal`; this is the one place they drop
/// to `f64` for the trigonometry.
pub fn haversine_m(a: &GpsCoordinates, b: &GpsCoordinates) -> f64 {
    haversine_m_f64(
        a.latitude.to_f64().unwrap_or(0.0),
        a.longitude.to_f64().unwrap_or(0.0),
        b.latitude.to_f64().unwrap_or(0.0),
        b.longitude.to_f64().unwrap_or(0.0),
    )
}

/// Raw-coordinate variant for boundaries that carry plain floats
pub fn haversine_m_f64(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn point(lat: &str, lon: &str) -> GpsCoordinates {
        GpsCoordinates::new(
            Decimal::from_str(lat).unwrap(),
            Decimal::from_str(lon).unwrap(),
        )
    }

    #[test]
    fn test_zero_distance_on_identical_points() {
        let p = point("13.7563", "100.5018");
        assert_eq!(haversine_m(&p, &p), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = point("13.7563", "100.5018");
        let b = point("13.7600", "100.5100");
        let ab = haversine_m(&a, &b);
        let ba = haversine_m(&b, &a);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_pure_latitude_shift_scale() {
        // 0.001 degrees of latitude is ~111.2 m anywhere on the globe
        let a = point("13.7563", "100.5018");
        let b = point("13.7573", "100.5018");
        let d = haversine_m(&a, &b);
        assert!((d - 111.19).abs() < 0.5, "got {}", d);
    }
}
