use super::plane_list::PlaneListResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

/// Request type for fetching the full plane snapshot.
#[derive(Debug)]
pub(crate) struct PlaneListRequest {}

impl NoBodyHTTPRequestType for PlaneListRequest {}

impl HTTPRequestType for PlaneListRequest {
    type Response = PlaneListResponse;
    fn endpoint(&self) -> &'static str { "" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
