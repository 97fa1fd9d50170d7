use super::plane_launch::PlaneLaunchResponse;
use super::request_common::{
    HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType, RequestError,
};
use crate::flight_control::plane::{Launch, PlaneId};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

/// JSON body of a launch submission.
///
/// With an `id` the launch is appended to that plane, without one the store creates a new
/// plane and returns its id.
#[derive(serde::Serialize, Debug, Clone)]
pub(crate) struct PlaneLaunchBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<PlaneId>,
    #[serde(flatten)]
    pub(crate) launch: Launch,
}

/// Authenticated request appending a launch to the store.
#[derive(Debug)]
pub(crate) struct PlaneLaunchRequest {
    body: PlaneLaunchBody,
    auth: HeaderValue,
}

impl PlaneLaunchRequest {
    /// Creates the request.
    ///
    /// # Arguments
    /// * `body` – The launch to submit.
    /// * `token` – The bearer token of the current session.
    ///
    /// # Returns
    /// The request, or a `RequestError` if no usable token is available.
    pub(crate) fn new(body: PlaneLaunchBody, token: Option<&str>) -> Result<Self, RequestError> {
        let token = token.filter(|t| !t.is_empty()).ok_or(RequestError::MissingToken)?;
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| RequestError::InvalidToken)?;
        auth.set_sensitive(true);
        Ok(Self { body, auth })
    }
}

impl JSONBodyHTTPRequestType for PlaneLaunchRequest {
    type Body = PlaneLaunchBody;
    fn body(&self) -> &Self::Body { &self.body }
}

impl HTTPRequestType for PlaneLaunchRequest {
    type Response = PlaneLaunchResponse;
    fn endpoint(&self) -> &'static str { "" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
    fn header_params(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth.clone());
        headers
    }
}
