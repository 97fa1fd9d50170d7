use std::fmt::{Display, Formatter};

/// A position on the globe given in degrees.
///
/// Longitude comes first, matching the `[lon, lat]` layout used on the wire.
#[derive(Debug, PartialEq, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    /// Longitude in degrees, east positive.
    lon: f64,
    /// Latitude in degrees, north positive.
    lat: f64,
}

impl GeoPoint {
    /// Creates a new `GeoPoint` from longitude and latitude in degrees.
    pub const fn new(lon: f64, lat: f64) -> Self { Self { lon, lat } }

    /// Returns the longitude in degrees.
    pub const fn lon(&self) -> f64 { self.lon }

    /// Returns the latitude in degrees.
    pub const fn lat(&self) -> f64 { self.lat }

    /// Returns `(lon, lat)` converted to radians.
    pub fn to_radians(self) -> (f64, f64) { (self.lon.to_radians(), self.lat.to_radians()) }

    /// Builds a point from radians, normalizing the longitude into `(-180, 180]`.
    pub fn from_radians(lon: f64, lat: f64) -> Self {
        Self::new(normalize_degrees(lon.to_degrees()), lat.to_degrees())
    }

    /// Whether both coordinates lie within `eps` degrees of `other`.
    pub fn approx_eq(&self, other: &GeoPoint, eps: f64) -> bool {
        (self.lat - other.lat).abs() <= eps
            && normalize_degrees(self.lon - other.lon).abs() <= eps
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from(value: [f64; 2]) -> Self { Self::new(value[0], value[1]) }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(value: GeoPoint) -> Self { [value.lon, value.lat] }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lon, self.lat)
    }
}

/// Wraps an angle in degrees into the half open interval `(-180, 180]`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}
