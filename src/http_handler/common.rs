use super::http_request::request_common::RequestError;
use super::http_response::response_common::ResponseError;
use strum_macros::Display;

#[derive(Debug, Display)]
pub enum HTTPError {
    HTTPRequestError(RequestError),
    HTTPResponseError(ResponseError),
}

impl std::error::Error for HTTPError {}

impl From<RequestError> for HTTPError {
    fn from(value: RequestError) -> Self { HTTPError::HTTPRequestError(value) }
}

impl From<ResponseError> for HTTPError {
    fn from(value: ResponseError) -> Self { HTTPError::HTTPResponseError(value) }
}

/// Failure of a store operation as seen by the claim engine.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or answered with garbage; retrying later may help.
    Unreachable(String),
    /// The store refused the operation, e.g. because the plane was taken in the meantime.
    Rejected(String),
}

impl std::error::Error for StoreError {}

impl From<HTTPError> for StoreError {
    fn from(value: HTTPError) -> Self {
        match value {
            HTTPError::HTTPResponseError(err) if err.is_transport() => {
                StoreError::Unreachable(format!("{err:?}"))
            }
            HTTPError::HTTPResponseError(err) => StoreError::Rejected(format!("{err:?}")),
            HTTPError::HTTPRequestError(err) => StoreError::Rejected(format!("{err:?}")),
        }
    }
}
