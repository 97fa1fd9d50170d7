use super::common::StoreError;
use super::http_client::HTTPClient;
use super::http_request::{
    plane_launch_post::{PlaneLaunchBody, PlaneLaunchRequest},
    plane_list_get::PlaneListRequest,
    request_common::{JSONBodyHTTPRequestType, NoBodyHTTPRequestType},
};
use crate::flight_control::plane::{Launch, Plane, PlaneId};
use crate::identity::Identity;
use crate::warn;
use async_trait::async_trait;
use std::sync::Arc;

/// The authoritative collection of planes.
///
/// Reads are full snapshots and side effect free. Writes append a single launch and are
/// never retried by the caller.
#[async_trait]
pub trait PlaneStore: Send + Sync {
    /// Fetches the complete current set of planes.
    async fn fetch_planes(&self) -> Result<Vec<Plane>, StoreError>;

    /// Appends `launch` to the plane `target`, or creates a new plane if `target` is `None`.
    ///
    /// # Returns
    /// The id of the plane the launch now belongs to.
    async fn submit_launch(
        &self,
        target: Option<PlaneId>,
        launch: Launch,
    ) -> Result<PlaneId, StoreError>;
}

/// `PlaneStore` backed by the REST endpoint at the client's base URL.
pub struct RemoteStore {
    client: Arc<HTTPClient>,
    identity: Arc<dyn Identity>,
}

impl RemoteStore {
    pub(crate) fn new(client: Arc<HTTPClient>, identity: Arc<dyn Identity>) -> Self {
        Self { client, identity }
    }
}

#[async_trait]
impl PlaneStore for RemoteStore {
    async fn fetch_planes(&self) -> Result<Vec<Plane>, StoreError> {
        let snapshot = PlaneListRequest {}.send_request(&self.client).await?;
        let planes = snapshot
            .into_planes()
            .into_iter()
            .filter_map(|wire| {
                let id = wire.id.clone();
                Plane::try_from(wire)
                    .inspect_err(|e| warn!("Dropping malformed plane {id} from snapshot: {e:?}"))
                    .ok()
            })
            .collect();
        Ok(planes)
    }

    async fn submit_launch(
        &self,
        target: Option<PlaneId>,
        launch: Launch,
    ) -> Result<PlaneId, StoreError> {
        let token = self.identity.token().await;
        let body = PlaneLaunchBody { id: target, launch };
        let request = PlaneLaunchRequest::new(body, token.as_deref())
            .map_err(|e| StoreError::Rejected(format!("{e:?}")))?;
        let ack = request.send_request(&self.client).await?;
        Ok(ack.into_id())
    }
}
