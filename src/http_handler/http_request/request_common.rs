use super::super::common::HTTPError;
use super::super::http_client::HTTPClient;
use super::super::http_response::response_common::{HTTPResponseType, ResponseError};
use strum_macros::Display;

/// The HTTP verbs used against the plane store.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HTTPRequestMethod {
    Get,
    Post,
}

/// Errors raised while assembling a request, before anything is sent.
#[derive(Debug, Display)]
pub enum RequestError {
    /// A write was attempted without a session token.
    MissingToken,
    /// The session token can not be encoded as a header value.
    InvalidToken,
}

impl std::error::Error for RequestError {}

/// Common description of every request type: where it goes and how.
pub(crate) trait HTTPRequestType {
    /// Type of the expected response.
    type Response: HTTPResponseType;
    /// Path relative to the base URL; empty for the collection itself.
    fn endpoint(&self) -> &str;
    /// The corresponding HTTP Request Method.
    fn request_method(&self) -> HTTPRequestMethod;
    /// Additional headers, e.g. authorization.
    fn header_params(&self) -> reqwest::header::HeaderMap { reqwest::header::HeaderMap::new() }

    /// Builds the method and URL part of the request.
    fn compose(&self, client: &HTTPClient) -> reqwest::RequestBuilder {
        let url = format!("{}{}", client.url(), self.endpoint());
        let builder = match self.request_method() {
            HTTPRequestMethod::Get => client.client().get(url),
            HTTPRequestMethod::Post => client.client().post(url),
        };
        builder.headers(self.header_params())
    }
}

/// Requests that carry no body.
pub(crate) trait NoBodyHTTPRequestType: HTTPRequestType {
    async fn send_request(
        &self,
        client: &HTTPClient,
    ) -> Result<<Self::Response as HTTPResponseType>::ParsedResponseType, HTTPError> {
        let response = self.compose(client).send().await.map_err(ResponseError::from)?;
        Ok(Self::Response::read_response(response).await?)
    }
}

/// Requests that carry a JSON body.
pub(crate) trait JSONBodyHTTPRequestType: HTTPRequestType {
    /// The type of the json body.
    type Body: serde::Serialize + Sync;
    /// Returns the serializable object.
    fn body(&self) -> &Self::Body;

    async fn send_request(
        &self,
        client: &HTTPClient,
    ) -> Result<<Self::Response as HTTPResponseType>::ParsedResponseType, HTTPError> {
        let response =
            self.compose(client).json(self.body()).send().await.map_err(ResponseError::from)?;
        Ok(Self::Response::read_response(response).await?)
    }
}
