use super::claim::{Claim, ClaimKind, ClaimStatus};
use super::signal::{ClaimError, CommitTicket};
use crate::config::SimConfig;
use crate::flight_control::{
    common::GeoPoint,
    motion::{MotionModel, PlanePose},
    nearby::nearby,
    plane::{LaunchBuilder, LaunchError, Plane, PlaneId, Stamp, UserId},
};
use crate::http_handler::StoreError;
use crate::{event, plane, warn};
use chrono::{DateTime, Utc};
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use std::collections::{BTreeMap, HashSet};

/// A plane this client successfully launched, kept until the store's snapshots reflect it.
#[derive(Debug)]
struct CommitEcho {
    plane: Plane,
    /// Snapshots merged since the launch was acknowledged.
    misses: u8,
}

/// The client side ownership state machine.
///
/// It owns the externally visible plane set and at most one local claim. The visible set is
/// replaced wholesale by store snapshots, except that a plane held by the claim is never
/// reintroduced by a snapshot while the claim lasts. All methods are synchronous and free of
/// I/O; the network write of a commit happens between [`ClaimEngine::begin_commit`] and
/// [`ClaimEngine::finish_commit`].
#[derive(Debug)]
pub struct ClaimEngine {
    motion: MotionModel,
    nearby_radius_km: f64,
    rng: StdRng,
    visible: Vec<Plane>,
    claim: Option<Claim>,
    echoes: BTreeMap<PlaneId, CommitEcho>,
}

impl ClaimEngine {
    /// Number of snapshots allowed to lag behind an acknowledged launch before the local
    /// version is given up.
    const ECHO_TOLERANCE: u8 = 3;

    pub fn new(config: &SimConfig) -> Self {
        let rng = config.rng_seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            motion: config.motion(),
            nearby_radius_km: config.nearby_radius_km,
            rng,
            visible: Vec::new(),
            claim: None,
            echoes: BTreeMap::new(),
        }
    }

    pub fn visible(&self) -> &[Plane] { &self.visible }
    pub fn claim(&self) -> Option<&Claim> { self.claim.as_ref() }
    pub fn status(&self) -> ClaimStatus { ClaimStatus::from(self.claim.as_ref()) }
    pub fn motion(&self) -> MotionModel { self.motion }

    /// Poses of all visible planes at `now`, in visible order.
    pub fn poses(&self, now: DateTime<Utc>) -> Vec<PlanePose> {
        self.visible
            .iter()
            .map(|p| PlanePose { id: p.id().clone(), pose: self.motion.plane_pose(p, now) })
            .collect()
    }

    /// Ids of the visible planes within the catch radius of `center` at `now`.
    pub fn nearby(&self, center: GeoPoint, now: DateTime<Utc>) -> Vec<PlaneId> {
        let positions =
            self.visible.iter().map(|p| (p.id(), self.motion.plane_pose(p, now).position()));
        nearby(center, self.nearby_radius_km, positions)
    }

    /// Visible planes last sent by `user`, for highlighting.
    pub fn owned_planes(&self, user: &UserId) -> Vec<&Plane> {
        self.visible.iter().filter(|p| p.is_owned_by(user)).collect()
    }

    /// Catches a random plane near `center`.
    ///
    /// # Arguments
    /// * `center` – The current sensor position, `None` if there is no fix yet.
    /// * `now` – The instant used to evaluate plane positions.
    ///
    /// # Returns
    /// The id of the caught plane. The plane leaves the visible set until the claim ends.
    pub fn catch(
        &mut self,
        center: Option<GeoPoint>,
        now: DateTime<Utc>,
    ) -> Result<PlaneId, ClaimError> {
        self.ensure_free()?;
        let center = center.ok_or(ClaimError::SensorUnavailable)?;
        let candidates = self.nearby(center, now);
        let chosen = candidates.choose(&mut self.rng).cloned().ok_or(ClaimError::NoEligibleTarget)?;
        let idx = self
            .visible
            .iter()
            .position(|p| p.id() == &chosen)
            .ok_or(ClaimError::NoEligibleTarget)?;
        let caught = self.visible.remove(idx);
        plane!("Caught plane {chosen} out of {} nearby.", candidates.len());
        self.claim = Some(Claim::new(ClaimKind::Caught(caught)));
        Ok(chosen)
    }

    /// Starts composing a new plane with a blank draft.
    pub fn create(&mut self) -> Result<(), ClaimError> {
        self.ensure_free()?;
        self.claim = Some(Claim::new(ClaimKind::Creating));
        plane!("Composing a new plane.");
        Ok(())
    }

    /// Drops the claim without any write. A caught plane returns to the visible set as is.
    ///
    /// # Returns
    /// The id of the released plane, `None` if a new plane was being composed.
    pub fn cancel(&mut self) -> Result<Option<PlaneId>, ClaimError> {
        self.claim_mut()?;
        Ok(self.release_claim())
    }

    /// Updates the heading draft. Returns the normalized heading.
    pub fn set_heading(&mut self, heading: f64) -> Result<f64, ClaimError> {
        let claim = self.claim_mut()?;
        if !heading.is_finite() {
            return Err(ClaimError::InvalidHeading);
        }
        Ok(claim.draft_mut().set_heading(heading))
    }

    /// Places (or replaces) the stamp of the draft.
    pub fn place_stamp(&mut self, stamp: Stamp) -> Result<(), ClaimError> {
        self.claim_mut()?.draft_mut().set_stamp(stamp);
        Ok(())
    }

    /// Freezes the draft into a launch and marks the claim as committing.
    ///
    /// While committing, every other transition is refused with
    /// [`ClaimError::CommitPending`], and snapshots keep excluding the held plane.
    ///
    /// # Arguments
    /// * `origin` – The launch position, `None` without sensor fix.
    /// * `now` – The launch timestamp.
    /// * `user` – The sending user.
    ///
    /// # Returns
    /// The ticket to submit to the store.
    pub fn begin_commit(
        &mut self,
        origin: Option<GeoPoint>,
        now: DateTime<Utc>,
        user: Option<UserId>,
    ) -> Result<CommitTicket, ClaimError> {
        let claim = self.claim_mut()?;
        let origin = origin.ok_or(ClaimError::SensorUnavailable)?;
        let built = LaunchBuilder::new(origin, now)
            .heading(claim.draft().heading())
            .stamp(claim.draft().stamp().clone())
            .user(user)
            .build(claim.held().map(Plane::latest));
        match built {
            Ok(launch) => {
                let target = claim.held_id().cloned();
                claim.set_committing(launch.clone());
                Ok(CommitTicket { target, launch })
            }
            Err(LaunchError::InvalidHeading) => Err(ClaimError::InvalidHeading),
            Err(LaunchError::OutOfOrder { previous, attempted }) => {
                warn!("Launch at {attempted} predates last launch at {previous}. Releasing claim.");
                self.release_claim();
                Err(ClaimError::OutOfOrderLaunch { previous, attempted })
            }
        }
    }

    /// Completes a commit with the store's answer and returns to FREE.
    ///
    /// # Arguments
    /// * `result` – The acknowledged plane id, or the store failure.
    /// * `owner` – The new owner of the plane on success.
    ///
    /// # Returns
    /// The id of the launched plane. On failure the attempted launch is carried in the
    /// error and the plane is left to the next snapshot.
    pub fn finish_commit(
        &mut self,
        result: Result<PlaneId, StoreError>,
        owner: Option<UserId>,
    ) -> Result<PlaneId, ClaimError> {
        let Some(claim) = self.claim.take() else {
            return Err(ClaimError::NoClaim);
        };
        let (kind, launch) = match claim.into_commit() {
            Ok(parts) => parts,
            Err(claim) => {
                self.claim = Some(claim);
                return Err(ClaimError::NoClaim);
            }
        };
        match result {
            Ok(ack_id) => {
                let launched = match kind {
                    ClaimKind::Caught(held) => {
                        if held.id() != &ack_id {
                            warn!("Store acknowledged plane {ack_id} for held plane {}.", held.id());
                        }
                        held.relaunched(launch, owner)
                    }
                    ClaimKind::Creating => Plane::new(ack_id, owner, launch),
                };
                let id = launched.id().clone();
                plane!("Launched plane {id} ({} launches).", launched.launch_count());
                self.echoes.insert(id.clone(), CommitEcho { plane: launched.clone(), misses: 0 });
                self.upsert_visible(launched);
                Ok(id)
            }
            Err(err) => {
                // an older local launch of this plane must not outlive the store's refusal
                if let ClaimKind::Caught(held) = &kind {
                    self.echoes.remove(held.id());
                }
                match err {
                    StoreError::Unreachable(reason) => {
                        warn!("Launch could not be delivered: {reason}");
                        Err(ClaimError::StoreUnreachable { launch: Box::new(launch), reason })
                    }
                    StoreError::Rejected(reason) => {
                        warn!("Launch was rejected: {reason}");
                        Err(ClaimError::StoreRejected { launch: Box::new(launch), reason })
                    }
                }
            }
        }
    }

    /// Replaces the visible set with a store snapshot.
    ///
    /// The plane held by the claim is filtered out. Planes this client launched recently
    /// keep their local version while the snapshot still shows fewer launches for them, and
    /// stay visible for a few merges even if the snapshot predates their creation.
    ///
    /// Merging the same snapshot again yields the same visible set, except while such a
    /// local launch is pending: once it has lagged for more than `ECHO_TOLERANCE` merges the
    /// snapshot's version takes over.
    pub fn merge_snapshot(&mut self, snapshot: Vec<Plane>) {
        let held = self.claim.as_ref().and_then(Claim::held_id).cloned();
        let mut seen = HashSet::new();
        let mut merged: Vec<Plane> = snapshot
            .into_iter()
            .filter(|p| held.as_ref() != Some(p.id()) && seen.insert(p.id().clone()))
            .collect();

        self.echoes.retain(|id, echo| {
            let caught_up = merged
                .iter()
                .find(|p| p.id() == id)
                .is_some_and(|p| p.launch_count() >= echo.plane.launch_count());
            echo.misses += 1;
            !caught_up && echo.misses <= Self::ECHO_TOLERANCE
        });
        for (id, echo) in &self.echoes {
            if held.as_ref() == Some(id) {
                continue;
            }
            match merged.iter_mut().find(|p| p.id() == id) {
                Some(slot) => *slot = echo.plane.clone(),
                None => merged.push(echo.plane.clone()),
            }
        }

        event!("Merged snapshot: {} visible, {} pending echoes.", merged.len(), self.echoes.len());
        self.visible = merged;
    }

    fn ensure_free(&self) -> Result<(), ClaimError> {
        match &self.claim {
            None => Ok(()),
            Some(claim) if claim.is_committing() => Err(ClaimError::CommitPending),
            Some(_) => Err(ClaimError::NotFree),
        }
    }

    fn claim_mut(&mut self) -> Result<&mut Claim, ClaimError> {
        match self.claim.as_mut() {
            None => Err(ClaimError::NoClaim),
            Some(claim) if claim.is_committing() => Err(ClaimError::CommitPending),
            Some(claim) => Ok(claim),
        }
    }

    fn release_claim(&mut self) -> Option<PlaneId> {
        match self.claim.take().map(Claim::into_kind) {
            Some(ClaimKind::Caught(plane)) => {
                let id = plane.id().clone();
                plane!("Released plane {id}.");
                self.upsert_visible(plane);
                Some(id)
            }
            Some(ClaimKind::Creating) => {
                plane!("Discarded new plane draft.");
                None
            }
            None => None,
        }
    }

    fn upsert_visible(&mut self, plane: Plane) {
        if let Some(slot) = self.visible.iter_mut().find(|p| p.id() == plane.id()) {
            *slot = plane;
        } else {
            self.visible.push(plane);
        }
    }
}
