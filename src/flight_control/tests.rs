use super::Supervisor;
use super::common::GeoPoint;
use super::motion::MotionModel;
use super::nearby::nearby;
use super::plane::{LaunchBuilder, Plane, PlaneId};
use crate::config::SimConfig;
use crate::http_handler::{PlaneStore, StoreError};
use crate::mode_control::ClaimEngine;
use crate::test_support::FixedClock;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

fn t0() -> DateTime<Utc> { DateTime::from_timestamp_millis(1_700_000_000_000).unwrap() }

fn plane(id: &str, lon: f64, lat: f64) -> Plane {
    let launch = LaunchBuilder::new(GeoPoint::new(lon, lat), t0()).heading(90.0).build(None).unwrap();
    Plane::new(PlaneId::new(id), None, launch)
}

#[test]
fn test_eastward_flight_along_equator() {
    let motion = MotionModel::new(1.0);
    let plane = plane("p", 0.0, 0.0);
    let pose = motion.plane_pose(&plane, t0() + TimeDelta::seconds(10));
    assert!((pose.position().lon() - 0.089_932).abs() < 1e-5, "{}", pose.position());
    assert!(pose.position().lat().abs() < 1e-9);
    assert!((pose.heading() - 90.0).abs() < 1e-6);

    // before the launch the plane rests at its origin
    let early = motion.plane_pose(&plane, t0() - TimeDelta::seconds(10));
    assert!(early.position().approx_eq(&GeoPoint::new(0.0, 0.0), 1e-12));
}

#[test]
fn test_motion_is_deterministic() {
    let motion = MotionModel::new(0.25);
    let launch = LaunchBuilder::new(GeoPoint::new(13.4, 52.5), t0()).heading(37.0).build(None).unwrap();
    let at = t0() + TimeDelta::minutes(42);
    assert_eq!(motion.pose(&launch, at), motion.pose(&launch, at));
    assert_eq!(motion.position_at(&[], at), None);
    assert_eq!(motion.position_at(std::slice::from_ref(&launch), at), Some(motion.pose(&launch, at)));
}

/// Replays a queue of poll results, repeating the last one.
struct ScriptedStore {
    script: Mutex<Vec<Result<Vec<Plane>, StoreError>>>,
}

impl ScriptedStore {
    fn new(mut script: Vec<Result<Vec<Plane>, StoreError>>) -> Self {
        script.reverse();
        Self { script: Mutex::new(script) }
    }
}

#[async_trait]
impl PlaneStore for ScriptedStore {
    async fn fetch_planes(&self) -> Result<Vec<Plane>, StoreError> {
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 { script.pop().unwrap() } else { script[0].clone() }
    }

    async fn submit_launch(&self, _: Option<PlaneId>, _: super::plane::Launch) -> Result<PlaneId, StoreError> {
        Err(StoreError::Rejected("read only".into()))
    }
}

fn supervisor(store: ScriptedStore) -> (Supervisor, tokio::sync::watch::Receiver<Arc<Vec<super::motion::PlanePose>>>) {
    let config = SimConfig { rng_seed: Some(5), speed_km_per_sec: 1.0, ..SimConfig::default() };
    Supervisor::new(
        Arc::new(RwLock::new(ClaimEngine::new(&config))),
        Arc::new(store),
        Arc::new(FixedClock(t0() + TimeDelta::seconds(10))),
        Duration::from_millis(10),
        Duration::from_millis(5),
    )
}

#[test]
fn test_nearby_filters_by_distance() {
    let ids = ["x", "y", "z"];
    let positions = [GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, 0.0), GeoPoint::new(0.0, 0.1)];
    let found = nearby(GeoPoint::new(0.0, 0.0), 20.0, ids.iter().zip(positions));
    assert_eq!(found, vec!["x", "z"]);
    assert!(nearby(GeoPoint::new(0.0, 0.0), 20.0, Vec::<(&&str, GeoPoint)>::new()).is_empty());
    // the radius is inclusive
    assert_eq!(nearby(GeoPoint::new(0.0, 0.0), 0.0, ids.iter().zip(positions)), vec!["x"]);
}

#[tokio::test]
async fn test_failed_poll_keeps_previous_snapshot() {
    let (sv, _) = supervisor(ScriptedStore::new(vec![
        Ok(vec![plane("a", 0.0, 0.0), plane("b", 1.0, 0.0)]),
        Err(StoreError::Unreachable("down".into())),
        Ok(vec![plane("b", 1.0, 0.0)]),
    ]));
    assert_eq!(sv.poll_once().await, Ok(2));
    assert!(sv.poll_once().await.is_err());
    assert_eq!(sv.sample_once().await, 2);
    assert_eq!(sv.poll_once().await, Ok(1));
}

#[tokio::test]
async fn test_sample_publishes_poses() {
    let (sv, rx) = supervisor(ScriptedStore::new(vec![Ok(vec![plane("a", 0.0, 0.0)])]));
    assert_eq!(sv.sample_once().await, 0);
    sv.poll_once().await.unwrap();
    assert_eq!(sv.sample_once().await, 1);
    let poses = rx.borrow().clone();
    assert_eq!(poses[0].id, PlaneId::new("a"));
    assert!((poses[0].pose.position().lon() - 0.089_932).abs() < 1e-5);
}

#[tokio::test]
async fn test_loops_stop_on_cancel() {
    let (sv, mut rx) = supervisor(ScriptedStore::new(vec![Ok(vec![plane("a", 0.0, 0.0)])]));
    let sv = Arc::new(sv);
    let c_tok = CancellationToken::new();
    let poll = tokio::spawn({
        let (sv, c_tok) = (Arc::clone(&sv), c_tok.clone());
        async move { sv.run_poll_loop(c_tok).await }
    });
    let sample = tokio::spawn({
        let (sv, c_tok) = (Arc::clone(&sv), c_tok.clone());
        async move { sv.run_sample_loop(c_tok).await }
    });
    tokio::time::timeout(Duration::from_secs(5), async {
        while rx.borrow_and_update().is_empty() {
            rx.changed().await.unwrap();
        }
    })
    .await
    .unwrap();
    c_tok.cancel();
    poll.await.unwrap();
    sample.await.unwrap();
}
