use super::claim::ClaimStatus;
use super::claim_engine::ClaimEngine;
use super::signal::ClaimError;
use crate::clock::Clock;
use crate::flight_control::{
    common::GeoPoint,
    plane::{PlaneId, Stamp},
};
use crate::http_handler::PlaneStore;
use crate::identity::Identity;
use crate::{log, plane};
use std::sync::Arc;
use tokio::sync::{RwLock, watch};

/// Async front of the [`ClaimEngine`] used by the user facing side.
///
/// Every transition takes the engine lock only for the synchronous state change. The store
/// write of [`ClaimController::send`] runs without the lock, so polls and samples keep
/// going while a launch is in flight.
pub struct ClaimController {
    engine: Arc<RwLock<ClaimEngine>>,
    store: Arc<dyn PlaneStore>,
    identity: Arc<dyn Identity>,
    clock: Arc<dyn Clock>,
    position: watch::Receiver<Option<GeoPoint>>,
}

impl ClaimController {
    pub fn new(
        engine: Arc<RwLock<ClaimEngine>>,
        store: Arc<dyn PlaneStore>,
        identity: Arc<dyn Identity>,
        clock: Arc<dyn Clock>,
        position: watch::Receiver<Option<GeoPoint>>,
    ) -> Self {
        Self { engine, store, identity, clock, position }
    }

    pub fn engine(&self) -> Arc<RwLock<ClaimEngine>> { Arc::clone(&self.engine) }

    fn position(&self) -> Option<GeoPoint> { *self.position.borrow() }

    pub async fn status(&self) -> ClaimStatus { self.engine.read().await.status() }

    /// Ids of the planes currently within catch range.
    pub async fn nearby(&self) -> Result<Vec<PlaneId>, ClaimError> {
        let center = self.position().ok_or(ClaimError::SensorUnavailable)?;
        Ok(self.engine.read().await.nearby(center, self.clock.now()))
    }

    pub async fn catch(&self) -> Result<PlaneId, ClaimError> {
        let now = self.clock.now();
        let center = self.position();
        self.engine.write().await.catch(center, now)
    }

    pub async fn create(&self) -> Result<(), ClaimError> { self.engine.write().await.create() }

    pub async fn cancel(&self) -> Result<Option<PlaneId>, ClaimError> {
        self.engine.write().await.cancel()
    }

    pub async fn set_heading(&self, heading: f64) -> Result<f64, ClaimError> {
        self.engine.write().await.set_heading(heading)
    }

    pub async fn place_stamp(&self, stamp: Stamp) -> Result<(), ClaimError> {
        self.engine.write().await.place_stamp(stamp)
    }

    /// Launches the held or newly composed plane from the current position.
    ///
    /// The submission is attempted exactly once. Whatever the outcome, the engine is FREE
    /// afterwards; on failure the attempted launch is carried by the returned error.
    pub async fn send(&self) -> Result<PlaneId, ClaimError> {
        let user = self.identity.user();
        let ticket = {
            let now = self.clock.now();
            let origin = self.position();
            self.engine.write().await.begin_commit(origin, now, user.clone())?
        };
        let target = ticket.target.clone();
        log!(
            "Submitting launch for {} heading {:.1}.",
            target.as_ref().map_or_else(|| "a new plane".to_string(), ToString::to_string),
            ticket.launch.heading()
        );
        let result = self.store.submit_launch(ticket.target, ticket.launch).await;
        let outcome = self.engine.write().await.finish_commit(result, user);
        if let Ok(id) = &outcome {
            plane!("Plane {id} is in the air.");
        }
        outcome
    }
}
