//! Great circle helpers on a spherical earth.
//!
//! All functions are total over finite coordinates and free of side effects.

use super::geo_point::{GeoPoint, normalize_degrees};

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Projects `origin` along the great circle starting at `heading_deg` for `distance_km`.
///
/// # Arguments
/// * `origin` – The starting point.
/// * `distance_km` – The travelled distance along the great circle. Non-positive distances
///   return `origin` unchanged.
/// * `heading_deg` – The initial bearing, clockwise from true north.
///
/// # Returns
/// The destination point with its longitude wrapped into `(-180, 180]`.
pub fn destination(origin: GeoPoint, distance_km: f64, heading_deg: f64) -> GeoPoint {
    if distance_km <= 0.0 {
        return origin;
    }
    let (lon1, lat1) = origin.to_radians();
    let delta = distance_km / EARTH_RADIUS_KM;
    let theta = heading_deg.to_radians();

    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_d, cos_d) = delta.sin_cos();

    let sin_lat2 = (sin_lat1 * cos_d + cos_lat1 * sin_d * theta.cos()).clamp(-1.0, 1.0);
    let lat2 = sin_lat2.asin();
    let lon2 = lon1 + (theta.sin() * sin_d * cos_lat1).atan2(cos_d - sin_lat1 * sin_lat2);

    GeoPoint::from_radians(lon2, lat2)
}

/// Initial bearing from `a` to `b` in degrees within `(-180, 180]`.
///
/// Coincident points have no defined bearing, `0.0` is returned for them.
pub fn bearing(a: GeoPoint, b: GeoPoint) -> f64 {
    if a == b {
        return 0.0;
    }
    let (lon1, lat1) = a.to_radians();
    let (lon2, lat2) = b.to_radians();
    let d_lon = lon2 - lon1;

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Great circle distance between `a` and `b` in kilometers (haversine).
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lon1, lat1) = a.to_radians();
    let (lon2, lat2) = b.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let h = ((d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}
