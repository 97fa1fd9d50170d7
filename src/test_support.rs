use crate::clock::Clock;
use crate::flight_control::plane::{Launch, Plane, PlaneId};
use crate::http_handler::{PlaneStore, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// In-memory `PlaneStore` that records submissions and can be switched to failing.
#[derive(Default)]
pub(crate) struct MemoryStore {
    pub planes: Mutex<Vec<Plane>>,
    pub failure: Mutex<Option<StoreError>>,
    pub submissions: Mutex<Vec<(Option<PlaneId>, Launch)>>,
}

#[async_trait]
impl PlaneStore for MemoryStore {
    async fn fetch_planes(&self) -> Result<Vec<Plane>, StoreError> {
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.planes.lock().unwrap().clone())
    }

    async fn submit_launch(&self, target: Option<PlaneId>, launch: Launch) -> Result<PlaneId, StoreError> {
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.submissions.lock().unwrap().push((target.clone(), launch));
        Ok(target.unwrap_or_else(|| PlaneId::new("created")))
    }
}

/// A clock frozen at one instant.
pub(crate) struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> { self.0 }
}
