use crate::flight_control::plane::PlaneWire;
use crate::http_handler::http_response::response_common::JsonResponse;

/// Response type for `GET <base>`: the full snapshot of all planes.
///
/// Entries are kept in their persisted shape; turning them into validated planes is left to
/// the caller so a single broken entry does not void the whole snapshot.
#[derive(serde::Deserialize, Debug)]
#[serde(transparent)]
pub(crate) struct PlaneListResponse(Vec<PlaneWire>);

impl JsonResponse for PlaneListResponse {}

impl PlaneListResponse {
    pub(crate) fn into_planes(self) -> Vec<PlaneWire> { self.0 }
}
