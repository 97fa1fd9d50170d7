use super::{SimConfig, parse_point};
use crate::flight_control::{common::GeoPoint, plane::UserId};
use std::collections::HashMap;
use std::time::Duration;

fn config_from(pairs: &[(&str, &str)]) -> SimConfig {
    let map: HashMap<String, String> =
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    SimConfig::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = SimConfig::default();
    assert_eq!(config.base_url, "http://localhost:3000/planes");
    assert_eq!(config.user, None);
    assert_eq!(config.poll_interval, Duration::from_secs(5));
    assert_eq!(config.sample_interval, Duration::from_millis(20));
    assert_eq!(config.rng_seed, None);
    assert_eq!(config.start_position, None);
}

#[test]
fn test_overrides_and_fallbacks() {
    let config = config_from(&[
        ("PLANES_BASE_URL", "https://planes.example/api/planes"),
        ("PLANES_USER", "alice"),
        ("PLANES_TOKEN", "tok"),
        ("PLANES_SPEED_KMPS", "1"),
        ("PLANES_NEARBY_KM", "not a number"),
        ("PLANES_POLL_MS", "250"),
        ("PLANES_SAMPLE_MS", "-3"),
        ("PLANES_SEED", "42"),
        ("PLANES_START_POS", "-100.5, 40"),
    ]);
    assert_eq!(config.base_url, "https://planes.example/api/planes");
    assert_eq!(config.user, Some(UserId::new("alice")));
    assert_eq!(config.token.as_deref(), Some("tok"));
    assert!((config.speed_km_per_sec - 1.0).abs() < f64::EPSILON);
    assert!((config.nearby_radius_km - 50.0).abs() < f64::EPSILON);
    assert_eq!(config.poll_interval, Duration::from_millis(250));
    assert_eq!(config.sample_interval, Duration::from_millis(20));
    assert_eq!(config.rng_seed, Some(42));
    assert_eq!(config.start_position, Some(GeoPoint::new(-100.5, 40.0)));
}

#[test]
fn test_parse_point() {
    assert_eq!(parse_point("1,2"), Some(GeoPoint::new(1.0, 2.0)));
    assert_eq!(parse_point("1;2"), None);
    assert_eq!(parse_point("0,91"), None);
    assert_eq!(parse_point("NaN,0"), None);
}
