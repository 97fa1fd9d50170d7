pub mod common;
pub(crate) mod http_client;
pub(crate) mod http_request;
pub(crate) mod http_response;
pub mod plane_store;

pub use common::{HTTPError, StoreError};
pub use plane_store::{PlaneStore, RemoteStore};
