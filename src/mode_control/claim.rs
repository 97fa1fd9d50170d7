use crate::flight_control::common::normalize_degrees;
use crate::flight_control::plane::{Launch, Plane, PlaneId, Stamp};
use std::fmt::{Display, Formatter};

/// What a local claim holds.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimKind {
    /// Composing a brand new plane; no id exists yet.
    Creating,
    /// Holding a plane taken out of the visible set.
    Caught(Plane),
}

/// The user's editable launch parameters while a claim is held.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaunchDraft {
    heading: f64,
    stamp: Stamp,
}

impl LaunchDraft {
    pub fn heading(&self) -> f64 { self.heading }
    pub fn stamp(&self) -> &Stamp { &self.stamp }

    /// Sets the heading, wrapped into `(-180, 180]`. Returns the stored value.
    pub(super) fn set_heading(&mut self, heading: f64) -> f64 {
        self.heading = normalize_degrees(heading);
        self.heading
    }

    pub(super) fn set_stamp(&mut self, stamp: Stamp) { self.stamp = stamp; }
}

/// The single client local claim.
///
/// A fresh claim always starts with a blank draft, so nothing typed for a previous claim
/// leaks into the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    kind: ClaimKind,
    draft: LaunchDraft,
    /// The launch currently being submitted, if any.
    committing: Option<Launch>,
}

impl Claim {
    pub(super) fn new(kind: ClaimKind) -> Self {
        Self { kind, draft: LaunchDraft::default(), committing: None }
    }

    pub fn kind(&self) -> &ClaimKind { &self.kind }
    pub fn draft(&self) -> &LaunchDraft { &self.draft }
    pub fn is_committing(&self) -> bool { self.committing.is_some() }

    pub(super) fn draft_mut(&mut self) -> &mut LaunchDraft { &mut self.draft }
    pub(super) fn set_committing(&mut self, launch: Launch) { self.committing = Some(launch); }

    /// The plane held by a catch.
    pub fn held(&self) -> Option<&Plane> {
        match &self.kind {
            ClaimKind::Caught(plane) => Some(plane),
            ClaimKind::Creating => None,
        }
    }

    pub fn held_id(&self) -> Option<&PlaneId> { self.held().map(Plane::id) }

    pub(super) fn into_kind(self) -> ClaimKind { self.kind }

    /// Splits a committing claim into what it held and the launch being submitted.
    /// A claim that is not committing is handed back unchanged.
    pub(super) fn into_commit(self) -> Result<(ClaimKind, Launch), Claim> {
        match self.committing {
            Some(launch) => Ok((self.kind, launch)),
            None => Err(self),
        }
    }
}

/// Compact view of the engine state for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimStatus {
    Free,
    Creating { committing: bool },
    Caught { id: PlaneId, committing: bool },
}

impl Display for ClaimStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sending = |c: &bool| if *c { " (sending)" } else { "" };
        match self {
            ClaimStatus::Free => write!(f, "FREE"),
            ClaimStatus::Creating { committing } => write!(f, "CREATING{}", sending(committing)),
            ClaimStatus::Caught { id, committing } => {
                write!(f, "CAUGHT({id}){}", sending(committing))
            }
        }
    }
}

impl From<Option<&Claim>> for ClaimStatus {
    fn from(value: Option<&Claim>) -> Self {
        match value {
            None => ClaimStatus::Free,
            Some(claim) => match &claim.kind {
                ClaimKind::Creating => ClaimStatus::Creating { committing: claim.is_committing() },
                ClaimKind::Caught(plane) => ClaimStatus::Caught {
                    id: plane.id().clone(),
                    committing: claim.is_committing(),
                },
            },
        }
    }
}
