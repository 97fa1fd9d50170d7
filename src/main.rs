#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod clock;
mod config;
mod console_communication;
mod flight_control;
mod http_handler;
mod identity;
mod keychain;
mod logger;
mod mode_control;
mod sensor;
#[cfg(test)]
mod test_support;

use crate::config::SimConfig;
use crate::console_communication::ConsoleMessenger;
use crate::flight_control::{Supervisor, motion::PlanePose};
use crate::keychain::Keychain;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let config = SimConfig::from_env();
    info!(
        "Starting paper planes against {} as {}.",
        config.base_url,
        config.user.as_ref().map_or_else(|| "guest".to_string(), ToString::to_string)
    );
    let c_tok = CancellationToken::new();
    let (keychain, supervisor, poses) = init(config);

    let poll_sv = Arc::clone(&supervisor);
    let poll_tok = c_tok.clone();
    let poll = tokio::spawn(async move { poll_sv.run_poll_loop(poll_tok).await });
    let sample_sv = Arc::clone(&supervisor);
    let sample_tok = c_tok.clone();
    let sample = tokio::spawn(async move { sample_sv.run_sample_loop(sample_tok).await });

    let console = ConsoleMessenger::new(
        keychain.claim_controller(),
        keychain.sensor(),
        keychain.identity(),
        keychain.clock(),
        poses,
    );
    console.run(c_tok.clone()).await;

    c_tok.cancel();
    for (name, handle) in [("poll", poll), ("sample", sample)] {
        if let Err(e) = handle.await {
            error!("The {name} loop ended abnormally: {e}");
        }
    }
    info!("Shut down.");
}

fn init(config: SimConfig) -> (Keychain, Arc<Supervisor>, watch::Receiver<Arc<Vec<PlanePose>>>) {
    let poll_interval = config.poll_interval;
    let sample_interval = config.sample_interval;
    let keychain = Keychain::new(config)
        .unwrap_or_else(|e| fatal!("Could not build the HTTP client: {e}"));
    let (supervisor, poses) = Supervisor::new(
        keychain.engine(),
        keychain.store(),
        keychain.clock(),
        poll_interval,
        sample_interval,
    );
    (keychain, Arc::new(supervisor), poses)
}
