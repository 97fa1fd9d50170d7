pub mod geo_point;
pub mod geodesic;
#[cfg(test)]
mod tests;

pub use geo_point::{GeoPoint, normalize_degrees};
pub use geodesic::{EARTH_RADIUS_KM, bearing, destination, distance};
