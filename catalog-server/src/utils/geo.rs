//! Geo math for proximity queries
//!
//! Great-circle distance plus the bounding-box deltas used to prefilter
//! candidates on the indexed lat/lng columns before exact ranking.

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters of great-circle distance between two (lng, lat) points (haversine).
pub fn haversine_m(lng1: f64, lat1: f64, lng2: f64, lat2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * a.sqrt().asin() * EARTH_RADIUS_M
}

/// Degree deltas spanning `radius_m` around a point at `lat`.
/// 1° latitude ≈ 111km; longitude shrinks by cos(lat).
pub fn bounding_deltas(lat: f64, radius_m: f64) -> (f64, f64) {
    let radius_km = radius_m / 1000.0;
    let lat_delta = radius_km / 111.0;
    let lng_delta = radius_km / (111.0 * lat.to_radians().cos().abs().max(1e-6));
    (lat_delta, lng_delta)
}
