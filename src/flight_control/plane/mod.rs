mod launch;
#[allow(clippy::module_inception)]
mod plane;
mod stamp;

use std::fmt::{Display, Formatter};

pub use launch::{Launch, LaunchBuilder, LaunchError};
pub use plane::{Plane, PlaneDecodeError, PlaneWire};
pub use stamp::{Stamp, StampStyle, StampVariant};

/// Opaque plane identifier assigned by the store.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PlaneId(String);

impl PlaneId {
    pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl Display for PlaneId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.pad(&self.0) }
}

/// Identifier of a logged in user.
#[derive(Debug, PartialEq, Eq, Clone, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.pad(&self.0) }
}
