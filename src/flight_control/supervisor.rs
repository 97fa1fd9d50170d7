use super::motion::PlanePose;
use crate::clock::Clock;
use crate::http_handler::{PlaneStore, StoreError};
use crate::mode_control::ClaimEngine;
use crate::{event, info, log, warn};
use std::sync::Arc;
use tokio::sync::{RwLock, watch};
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Drives the two periodic activities of the client: polling the store for snapshots and
/// sampling plane poses for display.
///
/// Polls never overlap since each one is awaited before the next tick is taken. The sampler
/// performs no I/O and only holds the engine's read lock for the duration of one sample.
pub struct Supervisor {
    engine: Arc<RwLock<ClaimEngine>>,
    store: Arc<dyn PlaneStore>,
    clock: Arc<dyn Clock>,
    poll_interval: std::time::Duration,
    sample_interval: std::time::Duration,
    pose_tx: watch::Sender<Arc<Vec<PlanePose>>>,
}

impl Supervisor {
    /// Creates a new `Supervisor` together with the receiving end of the pose feed.
    pub fn new(
        engine: Arc<RwLock<ClaimEngine>>,
        store: Arc<dyn PlaneStore>,
        clock: Arc<dyn Clock>,
        poll_interval: std::time::Duration,
        sample_interval: std::time::Duration,
    ) -> (Supervisor, watch::Receiver<Arc<Vec<PlanePose>>>) {
        let (pose_tx, pose_rx) = watch::channel(Arc::new(Vec::new()));
        let supervisor =
            Self { engine, store, clock, poll_interval, sample_interval, pose_tx };
        (supervisor, pose_rx)
    }

    /// Fetches one snapshot and merges it into the engine.
    ///
    /// # Returns
    /// The number of planes visible after the merge. On failure the engine keeps its
    /// previous visible set.
    pub async fn poll_once(&self) -> Result<usize, StoreError> {
        let snapshot = self.store.fetch_planes().await?;
        let mut engine = self.engine.write().await;
        engine.merge_snapshot(snapshot);
        Ok(engine.visible().len())
    }

    /// Samples the poses of all visible planes and publishes them.
    pub async fn sample_once(&self) -> usize {
        let now = self.clock.now();
        let poses = self.engine.read().await.poses(now);
        let count = poses.len();
        self.pose_tx.send_replace(Arc::new(poses));
        count
    }

    /// Polls the store every `poll_interval` until `c_tok` is cancelled.
    pub async fn run_poll_loop(&self, c_tok: CancellationToken) {
        let mut interval = time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut failing = false;
        loop {
            tokio::select! {
                () = c_tok.cancelled() => break,
                _ = interval.tick() => {}
            }
            match self.poll_once().await {
                Ok(count) => {
                    if failing {
                        log!("Store reachable again, {count} planes visible.");
                    }
                    failing = false;
                    event!("Polled {count} planes.");
                }
                Err(e) => {
                    if !failing {
                        warn!("Polling planes failed, keeping last snapshot: {e:?}");
                    }
                    failing = true;
                }
            }
        }
        info!("Poll loop stopped.");
    }

    /// Republishes plane poses every `sample_interval` until `c_tok` is cancelled.
    pub async fn run_sample_loop(&self, c_tok: CancellationToken) {
        let mut interval = time::interval(self.sample_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                () = c_tok.cancelled() => break,
                _ = interval.tick() => {}
            }
            self.sample_once().await;
        }
        info!("Sample loop stopped.");
    }
}
