use super::common::{GeoPoint, bearing, destination};
use super::plane::{Launch, Plane, PlaneId};
use chrono::{DateTime, TimeDelta, Utc};

/// Position and forward heading of a plane at a given instant.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Pose {
    position: GeoPoint,
    heading: f64,
}

impl Pose {
    pub fn new(position: GeoPoint, heading: f64) -> Self { Self { position, heading } }
    pub fn position(&self) -> GeoPoint { self.position }
    pub fn heading(&self) -> f64 { self.heading }
}

/// A sampled pose tagged with the plane it belongs to.
#[derive(Debug, PartialEq, Clone)]
pub struct PlanePose {
    pub id: PlaneId,
    pub pose: Pose,
}

/// Constant speed great circle motion.
///
/// Only the latest launch of a plane is considered; earlier launches never influence the
/// trajectory.
#[derive(Debug, Clone, Copy)]
pub struct MotionModel {
    speed_km_per_sec: f64,
}

impl MotionModel {
    /// Offset used to sample the forward heading.
    const HEADING_PROBE: TimeDelta = TimeDelta::seconds(1);

    pub fn new(speed_km_per_sec: f64) -> Self { Self { speed_km_per_sec } }

    /// Computes the pose of an object driven by `launches` at `now`.
    ///
    /// # Arguments
    /// * `launches` – The launch history, oldest first.
    /// * `now` – The instant to evaluate.
    ///
    /// # Returns
    /// `None` for an empty history, the pose derived from the last launch otherwise.
    pub fn position_at(&self, launches: &[Launch], now: DateTime<Utc>) -> Option<Pose> {
        launches.last().map(|launch| self.pose(launch, now))
    }

    /// Current pose of `plane` at `now`.
    pub fn plane_pose(&self, plane: &Plane, now: DateTime<Utc>) -> Pose {
        self.pose(plane.latest(), now)
    }

    /// Evaluates a single launch at `now`.
    ///
    /// The heading is not the launch heading but the bearing towards the position one
    /// second later, which is the locally correct forward direction on the great circle.
    pub fn pose(&self, launch: &Launch, now: DateTime<Utc>) -> Pose {
        let position = self.position(launch, now);
        let ahead = self.position(launch, now + Self::HEADING_PROBE);
        let heading = if ahead == position { launch.heading() } else { bearing(position, ahead) };
        Pose { position, heading }
    }

    #[allow(clippy::cast_precision_loss)]
    fn position(&self, launch: &Launch, now: DateTime<Utc>) -> GeoPoint {
        let elapsed_ms = (now - launch.timestamp()).num_milliseconds().max(0);
        let elapsed_s = elapsed_ms as f64 / 1000.0;
        destination(launch.origin(), elapsed_s * self.speed_km_per_sec, launch.heading())
    }
}
