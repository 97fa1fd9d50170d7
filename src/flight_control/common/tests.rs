use super::{EARTH_RADIUS_KM, GeoPoint, bearing, destination, distance, normalize_degrees};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::f64::consts::PI;

const SAMPLES: usize = 500;

fn rand_point(rng: &mut StdRng, max_lat: f64) -> GeoPoint {
    GeoPoint::new(rng.random_range(-180.0..180.0), rng.random_range(-max_lat..max_lat))
}

#[test]
fn test_destination_zero_distance_is_identity() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..SAMPLES {
        let p = rand_point(&mut rng, 90.0);
        let heading = rng.random_range(-180.0..=180.0);
        assert_eq!(destination(p, 0.0, heading), p);
    }
    let pole = GeoPoint::new(12.5, 90.0);
    assert_eq!(destination(pole, 0.0, 33.0), pole);
}

#[test]
fn test_destination_distance_round_trip() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..SAMPLES {
        let p = rand_point(&mut rng, 89.0);
        let d = rng.random_range(0.0..15_000.0);
        let h = rng.random_range(-180.0..180.0);
        let q = destination(p, d, h);
        let back = distance(p, q);
        assert!((back - d).abs() < 1e-6 * d.max(1.0), "p {p}, d {d}, h {h}: got {back}");
    }
}

#[test]
fn test_bearing_inverts_destination() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..SAMPLES {
        let p = rand_point(&mut rng, 80.0);
        let d = rng.random_range(1.0..5_000.0);
        let h = rng.random_range(-179.0..180.0);
        let b = bearing(p, destination(p, d, h));
        assert!(normalize_degrees(b - h).abs() < 1e-6, "p {p}, d {d}, h {h}: got {b}");
    }
}

#[test]
fn test_antipode_and_poles_stay_finite() {
    let half_circumference = PI * EARTH_RADIUS_KM;
    let origins = [
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(179.9, 45.0),
        GeoPoint::new(-120.0, 90.0),
        GeoPoint::new(60.0, -90.0),
    ];
    for origin in origins {
        for heading in [-180.0, -90.0, 0.0, 45.0, 90.0, 180.0] {
            for d in [half_circumference, 2.0 * half_circumference, 1e-9] {
                let q = destination(origin, d, heading);
                assert!(q.lon().is_finite() && q.lat().is_finite(), "{origin} {d} {heading}");
                assert!(q.lon() > -180.0 && q.lon() <= 180.0);
                assert!(bearing(origin, q).is_finite());
            }
        }
    }
    let antipode = destination(GeoPoint::new(0.0, 0.0), half_circumference, 90.0);
    assert!(antipode.approx_eq(&GeoPoint::new(180.0, 0.0), 1e-9));
}

#[test]
fn test_distance_symmetry_and_zero() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..SAMPLES {
        let a = rand_point(&mut rng, 90.0);
        let b = rand_point(&mut rng, 90.0);
        let ab = distance(a, b);
        assert!(ab >= 0.0);
        assert!((ab - distance(b, a)).abs() < 1e-9);
        assert!(distance(a, a).abs() < f64::EPSILON);
    }
}

#[test]
fn test_bearing_cardinal_directions() {
    let origin = GeoPoint::new(0.0, 0.0);
    assert!((bearing(origin, GeoPoint::new(0.0, 1.0))).abs() < 1e-9);
    assert!((bearing(origin, GeoPoint::new(1.0, 0.0)) - 90.0).abs() < 1e-9);
    assert!((bearing(origin, GeoPoint::new(0.0, -1.0)) - 180.0).abs() < 1e-9);
    assert!((bearing(origin, GeoPoint::new(-1.0, 0.0)) + 90.0).abs() < 1e-9);
    assert!(bearing(origin, origin).abs() < f64::EPSILON);
}

#[test]
fn test_normalize_degrees() {
    assert!((normalize_degrees(-180.0) - 180.0).abs() < f64::EPSILON);
    assert!((normalize_degrees(180.0) - 180.0).abs() < f64::EPSILON);
    assert!((normalize_degrees(190.0) + 170.0).abs() < 1e-9);
    assert!((normalize_degrees(-540.0) - 180.0).abs() < 1e-9);
    assert!((normalize_degrees(725.0) - 5.0).abs() < 1e-9);
}

#[test]
fn test_geo_point_wire_layout() {
    let p = GeoPoint::new(-100.5, 40.25);
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, "[-100.5,40.25]");
    let back: GeoPoint = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
}
