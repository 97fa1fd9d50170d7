use super::{PlaneId, UserId, launch::{Launch, LaunchError}};
use crate::flight_control::common::GeoPoint;
use strum_macros::Display;

/// A plane as known to the store: an id, an optional owner and its launch history.
///
/// The history is never empty. Only the latest launch drives motion, all earlier launches
/// are kept as an append-only trail.
#[derive(Debug, PartialEq, Clone, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "PlaneWire", into = "PlaneWire")]
pub struct Plane {
    id: PlaneId,
    owner: Option<UserId>,
    /// All launches before `latest`, oldest first.
    history: Vec<Launch>,
    latest: Launch,
}

/// Persisted shape of a plane.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlaneWire {
    pub id: PlaneId,
    pub owner: Option<UserId>,
    pub launches: Vec<Launch>,
}

#[derive(Debug, Display, PartialEq)]
pub enum PlaneDecodeError {
    NoLaunches,
    BadLaunch(LaunchError),
}

impl std::error::Error for PlaneDecodeError {}

impl Plane {
    /// Creates a plane from its very first launch.
    pub fn new(id: PlaneId, owner: Option<UserId>, first: Launch) -> Self {
        Self { id, owner, history: Vec::new(), latest: first }
    }

    pub fn id(&self) -> &PlaneId { &self.id }
    pub fn owner(&self) -> Option<&UserId> { self.owner.as_ref() }
    pub fn latest(&self) -> &Launch { &self.latest }
    pub fn launch_count(&self) -> usize { self.history.len() + 1 }

    /// Iterates all launches in chronological order.
    pub fn launches(&self) -> impl Iterator<Item = &Launch> {
        self.history.iter().chain(std::iter::once(&self.latest))
    }

    /// Origins of every launch, oldest first, for drawing the trail.
    pub fn trail(&self) -> Vec<GeoPoint> { self.launches().map(Launch::origin).collect() }

    pub fn is_owned_by(&self, user: &UserId) -> bool { self.owner.as_ref() == Some(user) }

    /// Appends `launch` and hands the plane over to `owner`.
    ///
    /// The launch has to be built against `self.latest()` so ordering already holds.
    #[must_use]
    pub fn relaunched(mut self, launch: Launch, owner: Option<UserId>) -> Self {
        let previous = std::mem::replace(&mut self.latest, launch);
        self.history.push(previous);
        self.owner = owner;
        self
    }
}

impl TryFrom<PlaneWire> for Plane {
    type Error = PlaneDecodeError;

    fn try_from(value: PlaneWire) -> Result<Self, Self::Error> {
        let mut launches = value.launches.into_iter();
        let first = launches.next().ok_or(PlaneDecodeError::NoLaunches)?;
        let mut latest = first.validated(None).map_err(PlaneDecodeError::BadLaunch)?;
        let mut history = Vec::new();
        for launch in launches {
            let checked = launch.validated(Some(&latest)).map_err(PlaneDecodeError::BadLaunch)?;
            history.push(std::mem::replace(&mut latest, checked));
        }
        Ok(Self { id: value.id, owner: value.owner, history, latest })
    }
}

impl From<Plane> for PlaneWire {
    fn from(value: Plane) -> Self {
        let mut launches = value.history;
        launches.push(value.latest);
        PlaneWire { id: value.id, owner: value.owner, launches }
    }
}
