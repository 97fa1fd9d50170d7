use crate::clock::{Clock, SystemClock};
use crate::config::SimConfig;
use crate::http_handler::{PlaneStore, RemoteStore, http_client::HTTPClient};
use crate::identity::{Identity, StaticIdentity};
use crate::mode_control::{ClaimController, ClaimEngine};
use crate::sensor::PositionSensor;
use crate::log;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Struct holding the shared components of the client, providing access to the store,
/// the claim engine, the position sensor and the session identity.
#[derive(Clone)]
pub struct Keychain {
    /// The plane store used for polls and launches.
    store: Arc<dyn PlaneStore>,
    /// Who is logged in.
    identity: Arc<dyn Identity>,
    /// The wall clock driving motion and launch timestamps.
    clock: Arc<dyn Clock>,
    /// The device position source.
    sensor: Arc<PositionSensor>,
    /// The claim engine owning the visible plane set.
    engine: Arc<RwLock<ClaimEngine>>,
}

impl Keychain {
    /// Creates a new instance of `Keychain`.
    ///
    /// # Arguments
    /// - `config`: The settings to build the subsystems from.
    ///
    /// # Returns
    /// The initialized `Keychain`, or the error of building the HTTP client.
    pub fn new(config: SimConfig) -> Result<Self, reqwest::Error> {
        let client = Arc::new(HTTPClient::new(&config.base_url)?);
        let identity: Arc<dyn Identity> =
            Arc::new(StaticIdentity::new(config.user.clone(), config.token.clone()));
        let store: Arc<dyn PlaneStore> =
            Arc::new(RemoteStore::new(Arc::clone(&client), Arc::clone(&identity)));
        let sensor = Arc::new(PositionSensor::new(config.start_position));
        let engine = Arc::new(RwLock::new(ClaimEngine::new(&config)));
        log!(
            "Polling every {:?}, sampling every {:?}, nearby radius {} km.",
            config.poll_interval,
            config.sample_interval,
            config.nearby_radius_km
        );
        Ok(Self {
            store,
            identity,
            clock: Arc::new(SystemClock),
            sensor,
            engine,
        })
    }

    /// Provides a cloned reference to the plane store.
    pub fn store(&self) -> Arc<dyn PlaneStore> { Arc::clone(&self.store) }

    /// Provides a cloned reference to the identity.
    pub fn identity(&self) -> Arc<dyn Identity> { Arc::clone(&self.identity) }

    /// Provides a cloned reference to the clock.
    pub fn clock(&self) -> Arc<dyn Clock> { Arc::clone(&self.clock) }

    /// Provides a cloned reference to the position sensor.
    pub fn sensor(&self) -> Arc<PositionSensor> { Arc::clone(&self.sensor) }

    /// Provides a cloned reference to the claim engine.
    pub fn engine(&self) -> Arc<RwLock<ClaimEngine>> { Arc::clone(&self.engine) }

    /// Builds the user facing claim controller on top of the shared components.
    pub fn claim_controller(&self) -> ClaimController {
        ClaimController::new(
            self.engine(),
            self.store(),
            self.identity(),
            self.clock(),
            self.sensor.subscribe(),
        )
    }
}
