use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use strum_macros::Display;

/// Marks a response whose body is a single JSON document deserializing into `Self`.
pub(crate) trait JsonResponse: DeserializeOwned {}

pub(crate) trait HTTPResponseType {
    type ParsedResponseType;
    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>;
}

impl<T: JsonResponse> HTTPResponseType for T {
    type ParsedResponseType = T;

    async fn read_response(response: reqwest::Response) -> Result<T, ResponseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        // the body of a refusal is only kept as a human readable reason
        let body = response.text().await.unwrap_or_default();
        Err(ResponseError::from_status(status, body))
    }
}

#[derive(Debug, Display)]
pub enum ResponseError {
    InternalServer,
    BadRequest(String),
    Unauthorized,
    NotFound,
    Conflict(String),
    NoConnection,
    Timeout,
    Decode,
    Unknown,
}

impl ResponseError {
    /// Classifies a non-success status; `body` is the response text, kept where it explains
    /// the refusal.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ResponseError::Unauthorized,
            StatusCode::NOT_FOUND => ResponseError::NotFound,
            StatusCode::CONFLICT => ResponseError::Conflict(body),
            s if s.is_server_error() => ResponseError::InternalServer,
            s if s.is_client_error() => ResponseError::BadRequest(body),
            _ => ResponseError::Unknown,
        }
    }

    /// Whether the store could not be reached or did not answer sensibly, as opposed to a
    /// deliberate refusal of the request.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ResponseError::InternalServer
                | ResponseError::NoConnection
                | ResponseError::Timeout
                | ResponseError::Decode
                | ResponseError::Unknown
        )
    }
}

impl std::error::Error for ResponseError {}
impl From<reqwest::Error> for ResponseError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            ResponseError::Timeout
        } else if value.is_connect() || value.is_request() {
            ResponseError::NoConnection
        } else if value.is_decode() {
            ResponseError::Decode
        } else if value.is_redirect() {
            ResponseError::InternalServer
        } else {
            ResponseError::Unknown
        }
    }
}
