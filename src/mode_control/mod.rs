//! Client side ownership of planes: the single local claim, its launch draft, and the
//! reconciliation of the visible plane set with store snapshots.

mod claim;
mod claim_controller;
mod claim_engine;
mod signal;

pub use claim::{Claim, ClaimKind, ClaimStatus, LaunchDraft};
pub use claim_controller::ClaimController;
pub use claim_engine::ClaimEngine;
pub use signal::{ClaimError, CommitTicket};
