use crate::flight_control::plane::{Launch, PlaneId};
use chrono::{DateTime, Utc};
use strum_macros::Display;

/// Why a claim transition was refused or failed.
///
/// Every variant is recoverable: after any of them the engine is in a consistent state and
/// the user may simply retry.
#[derive(Debug, Display, PartialEq)]
pub enum ClaimError {
    /// No sensor position is known yet.
    SensorUnavailable,
    /// No free plane lies within the catch radius.
    NoEligibleTarget,
    /// A claim is already held.
    NotFree,
    /// The operation needs a claim but none is held.
    NoClaim,
    /// A launch submission is still in flight.
    CommitPending,
    /// The heading draft was not a finite number.
    InvalidHeading,
    /// The launch would start before the plane's last launch. The claim was released.
    OutOfOrderLaunch { previous: DateTime<Utc>, attempted: DateTime<Utc> },
    /// The store could not be reached; the attempted launch is handed back.
    StoreUnreachable { launch: Box<Launch>, reason: String },
    /// The store refused the launch; the attempted launch is handed back.
    StoreRejected { launch: Box<Launch>, reason: String },
}

impl std::error::Error for ClaimError {}

impl ClaimError {
    /// The launch that was lost with a failed submission, if any.
    pub fn unsent_launch(&self) -> Option<&Launch> {
        match self {
            ClaimError::StoreUnreachable { launch, .. } | ClaimError::StoreRejected { launch, .. } => {
                Some(launch.as_ref())
            }
            _ => None,
        }
    }
}

/// Everything needed to submit a claim's launch to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitTicket {
    /// The plane to append to, `None` for a brand new plane.
    pub target: Option<PlaneId>,
    pub launch: Launch,
}
