use super::{UserId, stamp::Stamp};
use crate::flight_control::common::{GeoPoint, normalize_degrees};
use chrono::{DateTime, Utc};
use strum_macros::Display;

/// One discrete propulsion event of a plane.
///
/// Launches are immutable once built; positions are always derived relative to
/// `timestamp`, so the same record reproduces the same past trajectory.
#[derive(Debug, PartialEq, Clone, serde::Serialize, serde::Deserialize)]
pub struct Launch {
    /// The identity that sent this launch, if known.
    user: Option<UserId>,
    /// Where the launch happened.
    origin: GeoPoint,
    /// Initial heading in degrees, clockwise from true north, within `(-180, 180]`.
    heading: f64,
    /// Start of the launch, serialized as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
    /// Descriptive provenance, never used for motion.
    stamp: Stamp,
}

impl Launch {
    pub fn user(&self) -> Option<&UserId> { self.user.as_ref() }
    pub fn origin(&self) -> GeoPoint { self.origin }
    pub fn heading(&self) -> f64 { self.heading }
    pub fn timestamp(&self) -> DateTime<Utc> { self.timestamp }
    pub fn stamp(&self) -> &Stamp { &self.stamp }

    /// Re-validates a launch received from the store against its predecessor.
    pub(super) fn validated(mut self, previous: Option<&Launch>) -> Result<Launch, LaunchError> {
        if !self.heading.is_finite() {
            return Err(LaunchError::InvalidHeading);
        }
        if let Some(prev) = previous {
            if self.timestamp < prev.timestamp {
                return Err(LaunchError::OutOfOrder {
                    previous: prev.timestamp,
                    attempted: self.timestamp,
                });
            }
        }
        self.heading = normalize_degrees(self.heading);
        Ok(self)
    }
}

/// Reasons a launch can not be built.
#[derive(Debug, Display, PartialEq)]
pub enum LaunchError {
    /// The heading is NaN or infinite.
    InvalidHeading,
    /// The new launch would start before the last launch of the same plane.
    OutOfOrder { previous: DateTime<Utc>, attempted: DateTime<Utc> },
}

impl std::error::Error for LaunchError {}

/// Assembles and validates a new [`Launch`].
#[derive(Debug, Clone)]
pub struct LaunchBuilder {
    origin: GeoPoint,
    timestamp: DateTime<Utc>,
    heading: f64,
    stamp: Stamp,
    user: Option<UserId>,
}

impl LaunchBuilder {
    /// Starts a launch at `origin` beginning at `timestamp`, heading north with a blank stamp.
    pub fn new(origin: GeoPoint, timestamp: DateTime<Utc>) -> Self {
        Self { origin, timestamp, heading: 0.0, stamp: Stamp::default(), user: None }
    }

    #[must_use]
    pub fn heading(mut self, heading: f64) -> Self {
        self.heading = heading;
        self
    }

    #[must_use]
    pub fn stamp(mut self, stamp: Stamp) -> Self {
        self.stamp = stamp;
        self
    }

    #[must_use]
    pub fn user(mut self, user: Option<UserId>) -> Self {
        self.user = user;
        self
    }

    /// Builds the launch.
    ///
    /// # Arguments
    /// * `previous` – The current last launch of the plane this launch is appended to, if any.
    ///
    /// # Returns
    /// The immutable `Launch`, or a `LaunchError` if the heading is not finite or the
    /// timestamp lies before `previous`.
    pub fn build(self, previous: Option<&Launch>) -> Result<Launch, LaunchError> {
        if !self.heading.is_finite() {
            return Err(LaunchError::InvalidHeading);
        }
        if let Some(prev) = previous {
            if self.timestamp < prev.timestamp {
                return Err(LaunchError::OutOfOrder {
                    previous: prev.timestamp,
                    attempted: self.timestamp,
                });
            }
        }
        Ok(Launch {
            user: self.user,
            origin: self.origin,
            heading: normalize_degrees(self.heading),
            timestamp: self.timestamp,
            stamp: self.stamp,
        })
    }
}
