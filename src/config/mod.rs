#[cfg(test)]
mod tests;

use crate::flight_control::{common::GeoPoint, motion::MotionModel, plane::UserId};
use crate::warn;
use std::{env, str::FromStr, time::Duration};

/// Process wide settings, built once at startup and handed to every component that needs
/// them.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// URL of the plane collection; `GET` lists, `POST` launches.
    pub base_url: String,
    /// The logged in user, if any.
    pub user: Option<UserId>,
    /// Bearer token used for launch submissions.
    pub token: Option<String>,
    /// Constant ground speed of every plane.
    pub speed_km_per_sec: f64,
    /// Radius around the sensor position in which planes can be caught.
    pub nearby_radius_km: f64,
    /// Cadence of the store poll.
    pub poll_interval: Duration,
    /// Cadence of the position sampler.
    pub sample_interval: Duration,
    /// Fixed seed for catch selection, random if unset.
    pub rng_seed: Option<u64>,
    /// Initial sensor reading, e.g. for headless runs.
    pub start_position: Option<GeoPoint>,
}

impl SimConfig {
    const DEFAULT_BASE_URL: &'static str = "http://localhost:3000/planes";
    const DEFAULT_SPEED_KMPS: f64 = 0.25;
    const DEFAULT_NEARBY_KM: f64 = 50.0;
    const DEFAULT_POLL: Duration = Duration::from_secs(5);
    const DEFAULT_SAMPLE: Duration = Duration::from_millis(20);

    /// Reads the configuration from `PLANES_*` environment variables.
    pub fn from_env() -> Self { Self::from_lookup(|key| env::var(key).ok()) }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Unparsable values are reported and replaced by their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where F: Fn(&str) -> Option<String> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let millis = |key: &str, default: Duration| {
            parse_or(key, non_empty(key), default.as_millis())
                .try_into()
                .map_or(default, Duration::from_millis)
        };
        let speed = parse_or("PLANES_SPEED_KMPS", non_empty("PLANES_SPEED_KMPS"), Self::DEFAULT_SPEED_KMPS);
        let radius = parse_or("PLANES_NEARBY_KM", non_empty("PLANES_NEARBY_KM"), Self::DEFAULT_NEARBY_KM);
        Self {
            base_url: non_empty("PLANES_BASE_URL").unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string()),
            user: non_empty("PLANES_USER").map(UserId::new),
            token: non_empty("PLANES_TOKEN"),
            speed_km_per_sec: if speed.is_finite() && speed >= 0.0 { speed } else { Self::DEFAULT_SPEED_KMPS },
            nearby_radius_km: if radius.is_finite() && radius >= 0.0 { radius } else { Self::DEFAULT_NEARBY_KM },
            poll_interval: millis("PLANES_POLL_MS", Self::DEFAULT_POLL),
            sample_interval: millis("PLANES_SAMPLE_MS", Self::DEFAULT_SAMPLE),
            rng_seed: non_empty("PLANES_SEED").and_then(|v| parse_opt("PLANES_SEED", &v)),
            start_position: non_empty("PLANES_START_POS").and_then(|v| parse_point(&v)),
        }
    }

    /// The motion model shared by the sampler and the claim engine.
    pub fn motion(&self) -> MotionModel { MotionModel::new(self.speed_km_per_sec) }
}

impl Default for SimConfig {
    fn default() -> Self { Self::from_lookup(|_| None) }
}

fn parse_opt<T: FromStr>(key: &str, value: &str) -> Option<T> {
    let parsed = value.trim().parse::<T>().ok();
    if parsed.is_none() {
        warn!("Ignoring unparsable value {value:?} for {key}");
    }
    parsed
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> T {
    value.and_then(|v| parse_opt(key, &v)).unwrap_or(default)
}

/// Parses `"lon,lat"` in degrees.
pub fn parse_point(value: &str) -> Option<GeoPoint> {
    let (lon, lat) = value.split_once(',')?;
    let lon: f64 = lon.trim().parse().ok()?;
    let lat: f64 = lat.trim().parse().ok()?;
    let valid = lon.is_finite() && lat.is_finite() && (-90.0..=90.0).contains(&lat);
    if valid {
        Some(GeoPoint::new(lon, lat))
    } else {
        warn!("Ignoring invalid position {value:?}");
        None
    }
}
