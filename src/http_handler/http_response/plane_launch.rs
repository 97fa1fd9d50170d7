use crate::flight_control::plane::PlaneId;
use crate::http_handler::http_response::response_common::JsonResponse;

/// Response type for `POST <base>`: the acknowledged plane id.
#[derive(serde::Deserialize, Debug)]
pub(crate) struct PlaneLaunchResponse {
    /// The id of the plane the launch was appended to, freshly assigned for new planes.
    id: PlaneId,
}

impl JsonResponse for PlaneLaunchResponse {}

impl PlaneLaunchResponse {
    pub(crate) fn id(&self) -> &PlaneId { &self.id }
    pub(crate) fn into_id(self) -> PlaneId { self.id }
}
