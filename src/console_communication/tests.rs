use super::{ConsoleCommand, ConsoleError, ConsoleMessenger, ConsoleVerb, PositionUpdate};
use crate::config::SimConfig;
use crate::flight_control::common::GeoPoint;
use crate::flight_control::motion::{Pose, PlanePose};
use crate::flight_control::plane::{LaunchBuilder, Plane, PlaneId, Stamp, UserId};
use crate::identity::{Identity, StaticIdentity};
use crate::mode_control::{ClaimController, ClaimEngine, ClaimError};
use crate::sensor::PositionSensor;
use crate::test_support::{FixedClock, MemoryStore};
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use strum::IntoEnumIterator;
use tokio::sync::{RwLock, watch};

fn t0() -> DateTime<Utc> { DateTime::from_timestamp_millis(1_700_000_000_000).unwrap() }

fn parse(line: &str) -> Result<ConsoleCommand, ConsoleError> { line.parse() }

#[test]
fn test_parse_simple_commands() {
    assert_eq!(parse("catch"), Ok(ConsoleCommand::Catch));
    assert_eq!(parse("  SEND "), Ok(ConsoleCommand::Send));
    assert_eq!(parse("exit"), Ok(ConsoleCommand::Quit));
    assert_eq!(parse(""), Err(ConsoleError::Empty));
    assert_eq!(parse("fly"), Err(ConsoleError::UnknownCommand("fly".into())));
    for verb in ConsoleVerb::iter() {
        assert!(!matches!(parse(&verb.to_string()), Err(ConsoleError::UnknownCommand(_))));
    }
}

#[test]
fn test_parse_arguments() {
    assert_eq!(parse("heading -45.5"), Ok(ConsoleCommand::Heading(-45.5)));
    assert_eq!(parse("heading"), Err(ConsoleError::MissingArgument("heading")));
    assert_eq!(parse("heading east"), Err(ConsoleError::BadArgument("east".into())));

    assert_eq!(parse("pos"), Ok(ConsoleCommand::Position(PositionUpdate::Show)));
    assert_eq!(parse("pos none"), Ok(ConsoleCommand::Position(PositionUpdate::Lose)));
    assert_eq!(
        parse("pos 13.4, 52.5"),
        Ok(ConsoleCommand::Position(PositionUpdate::Report(GeoPoint::new(13.4, 52.5))))
    );
    assert!(matches!(parse("pos 0,95"), Err(ConsoleError::BadArgument(_))));

    assert_eq!(
        parse("stamp 10 20  -15 1 hello   world"),
        Ok(ConsoleCommand::Stamp(Stamp::new(10.0, 20.0, -15.0, "hello   world", 1)))
    );
    assert_eq!(parse("stamp 1 2 3 0"), Err(ConsoleError::MissingArgument("text")));
    assert_eq!(parse("stamp 1 2"), Err(ConsoleError::MissingArgument("angle")));
    assert!(matches!(parse("stamp 1 2 NaN 0 x"), Err(ConsoleError::BadArgument(_))));
}

fn messenger(
    store: Arc<MemoryStore>,
    sensor: Arc<PositionSensor>,
    poses: watch::Receiver<Arc<Vec<PlanePose>>>,
) -> ConsoleMessenger {
    let config = SimConfig { rng_seed: Some(9), ..SimConfig::default() };
    let mut engine = ClaimEngine::new(&config);
    let launch = LaunchBuilder::new(GeoPoint::new(0.0, 0.0), t0()).build(None).unwrap();
    engine.merge_snapshot(vec![Plane::new(PlaneId::new("a"), Some(UserId::new("bob")), launch)]);
    let identity: Arc<dyn Identity> =
        Arc::new(StaticIdentity::new(Some(UserId::new("alice")), Some("t".into())));
    let clock = Arc::new(FixedClock(t0() + TimeDelta::seconds(2)));
    let controller = ClaimController::new(
        Arc::new(RwLock::new(engine)),
        store,
        Arc::clone(&identity),
        clock.clone(),
        sensor.subscribe(),
    );
    ConsoleMessenger::new(controller, sensor, identity, clock, poses)
}

#[tokio::test]
async fn test_console_session() {
    let store = Arc::new(MemoryStore::default());
    let sensor = Arc::new(PositionSensor::new(None));
    let (_pose_tx, poses) = watch::channel(Arc::new(Vec::new()));
    let console = messenger(Arc::clone(&store), Arc::clone(&sensor), poses);

    assert_eq!(
        console.execute(ConsoleCommand::Catch).await,
        Err(ConsoleError::Claim(ClaimError::SensorUnavailable))
    );
    console.execute(parse("pos 0,0").unwrap()).await.unwrap();
    assert_eq!(sensor.current(), Some(GeoPoint::new(0.0, 0.0)));
    assert!(console.execute(ConsoleCommand::Nearby).await.unwrap().ends_with(": a"));
    assert!(console.execute(ConsoleCommand::Mine).await.unwrap().contains("No planes"));

    assert!(console.execute(ConsoleCommand::Catch).await.unwrap().contains("Caught a"));
    assert!(console.execute(ConsoleCommand::List).await.unwrap().contains("No planes"));
    console.execute(parse("heading 450").unwrap()).await.unwrap();
    console.execute(parse("stamp 1 1 0 1 hi").unwrap()).await.unwrap();
    let state = console.execute(ConsoleCommand::State).await.unwrap();
    assert!(state.contains("CAUGHT(a)"), "{state}");
    assert!(state.contains("heading 90.0"), "{state}");

    assert_eq!(console.execute(ConsoleCommand::Send).await, Ok("Sent a.".to_string()));
    assert_eq!(store.submissions.lock().unwrap().len(), 1);
    assert!(console.execute(ConsoleCommand::Mine).await.unwrap().starts_with('a'));

    let dump = console.execute(ConsoleCommand::Dump).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&dump).unwrap();
    assert_eq!(parsed[0]["launches"].as_array().unwrap().len(), 2);
    assert_eq!(parsed[0]["owner"], "alice");
}

#[tokio::test]
async fn test_list_shows_sampled_poses() {
    let sensor = Arc::new(PositionSensor::new(None));
    let sampled = PlanePose { id: PlaneId::new("a"), pose: Pose::new(GeoPoint::new(7.0, 8.0), 123.0) };
    let (pose_tx, poses) = watch::channel(Arc::new(vec![sampled]));
    let console = messenger(Arc::new(MemoryStore::default()), sensor, poses);

    let listed = console.execute(ConsoleCommand::List).await.unwrap();
    assert!(listed.starts_with('a'), "{listed}");
    assert!(listed.contains(&GeoPoint::new(7.0, 8.0).to_string()), "{listed}");
    assert!(listed.contains("heading  123.0"), "{listed}");

    // without a sample for the plane the pose is computed on the spot
    pose_tx.send_replace(Arc::new(Vec::new()));
    let listed = console.execute(ConsoleCommand::List).await.unwrap();
    assert!(!listed.contains(&GeoPoint::new(7.0, 8.0).to_string()), "{listed}");
    assert!(listed.contains("launches   1"), "{listed}");
}
