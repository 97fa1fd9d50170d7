use super::console_command::{ConsoleCommand, ConsoleError, PositionUpdate};
use crate::clock::Clock;
use crate::flight_control::motion::{MotionModel, PlanePose};
use crate::flight_control::plane::{Plane, PlaneWire};
use crate::identity::Identity;
use crate::mode_control::{ClaimController, ClaimError, ClaimKind};
use crate::sensor::PositionSensor;
use crate::{error, info, log};
use std::fmt::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Line based front end standing in for the map and the dialogs.
pub(crate) struct ConsoleMessenger {
    controller: ClaimController,
    sensor: Arc<PositionSensor>,
    identity: Arc<dyn Identity>,
    clock: Arc<dyn Clock>,
    /// Latest poses published by the sampling loop.
    poses: watch::Receiver<Arc<Vec<PlanePose>>>,
}

impl ConsoleMessenger {
    pub(crate) fn new(
        controller: ClaimController,
        sensor: Arc<PositionSensor>,
        identity: Arc<dyn Identity>,
        clock: Arc<dyn Clock>,
        poses: watch::Receiver<Arc<Vec<PlanePose>>>,
    ) -> Self {
        Self { controller, sensor, identity, clock, poses }
    }

    /// Reads commands from stdin until `quit`, end of input or cancellation.
    pub(crate) async fn run(&self, c_tok: CancellationToken) {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        info!("Console ready. Commands: pos, nearby, list, mine, catch, create, heading, stamp, send, cancel, state, dump, quit");
        loop {
            let line = tokio::select! {
                () = c_tok.cancelled() => break,
                line = lines.next_line() => line,
            };
            let line = match line {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    error!("Reading console input failed: {e}");
                    break;
                }
            };
            match line.parse::<ConsoleCommand>() {
                Ok(ConsoleCommand::Quit) => break,
                Ok(command) => match self.execute(command.clone()).await {
                    Ok(output) => println!("{output}"),
                    Err(e) => {
                        log!("Command {command:?} failed: {e:?}");
                        println!("{}", Self::explain(&e));
                    }
                },
                Err(ConsoleError::Empty) => {}
                Err(e) => println!("{}", Self::explain(&e)),
            }
        }
        log!("Console closed.");
    }

    /// Executes a single command and renders its result.
    pub(crate) async fn execute(&self, command: ConsoleCommand) -> Result<String, ConsoleError> {
        let output = match command {
            ConsoleCommand::Position(PositionUpdate::Show) => match self.sensor.current() {
                Some(pos) => format!("Position {pos}"),
                None => "No position fix.".to_string(),
            },
            ConsoleCommand::Position(PositionUpdate::Report(pos)) => {
                self.sensor.report(pos);
                format!("Position set to {pos}")
            }
            ConsoleCommand::Position(PositionUpdate::Lose) => {
                self.sensor.lose();
                "Position cleared.".to_string()
            }
            ConsoleCommand::Nearby => {
                let ids = self.controller.nearby().await?;
                if ids.is_empty() {
                    "No planes in reach.".to_string()
                } else {
                    let listed: Vec<_> = ids.iter().map(ToString::to_string).collect();
                    format!("{} in reach: {}", ids.len(), listed.join(", "))
                }
            }
            ConsoleCommand::List => {
                let engine = self.controller.engine();
                let engine = engine.read().await;
                self.render_planes(engine.visible().iter(), &engine.motion())
            }
            ConsoleCommand::Mine => {
                let Some(user) = self.identity.user() else {
                    return Err(ConsoleError::BadArgument("not logged in".to_string()));
                };
                let engine = self.controller.engine();
                let engine = engine.read().await;
                self.render_planes(engine.owned_planes(&user).into_iter(), &engine.motion())
            }
            ConsoleCommand::Catch => {
                let id = self.controller.catch().await?;
                format!("Caught {id}. Set a heading and send it on.")
            }
            ConsoleCommand::Create => {
                self.controller.create().await?;
                "New plane ready. Set a heading and send it.".to_string()
            }
            ConsoleCommand::Heading(heading) => {
                let stored = self.controller.set_heading(heading).await?;
                format!("Heading {stored:.1}")
            }
            ConsoleCommand::Stamp(stamp) => {
                let described = stamp.describe();
                self.controller.place_stamp(stamp).await?;
                format!("Stamped {described}")
            }
            ConsoleCommand::Send => {
                let id = self.controller.send().await?;
                format!("Sent {id}.")
            }
            ConsoleCommand::Cancel => match self.controller.cancel().await? {
                Some(id) => format!("Let go of {id}."),
                None => "Discarded the new plane.".to_string(),
            },
            ConsoleCommand::State => self.render_state().await,
            ConsoleCommand::Dump => {
                let engine = self.controller.engine();
                let wires: Vec<PlaneWire> =
                    engine.read().await.visible().iter().cloned().map(PlaneWire::from).collect();
                serde_json::to_string_pretty(&wires).map_err(|e| ConsoleError::Dump(e.to_string()))?
            }
            ConsoleCommand::Quit => "Bye.".to_string(),
        };
        Ok(output)
    }

    fn render_planes<'a>(
        &self,
        planes: impl Iterator<Item = &'a Plane>,
        motion: &MotionModel,
    ) -> String {
        let now = self.clock.now();
        let sampled = Arc::clone(&self.poses.borrow());
        let mut out = String::new();
        for plane in planes {
            // planes merged after the last sample are not in the feed yet
            let pose = sampled
                .iter()
                .find(|p| p.id == *plane.id())
                .map_or_else(|| motion.plane_pose(plane, now), |p| p.pose);
            let owner = plane.owner().map_or_else(|| "-".to_string(), ToString::to_string);
            let _ = writeln!(
                out,
                "{:<12} {} heading {:>6.1} launches {:>3} owner {owner}",
                plane.id(),
                pose.position(),
                pose.heading(),
                plane.launch_count(),
            );
        }
        if out.is_empty() { "No planes.".to_string() } else { out.trim_end().to_string() }
    }

    async fn render_state(&self) -> String {
        let engine = self.controller.engine();
        let engine = engine.read().await;
        let mut out = format!("State {}, {} planes visible", engine.status(), engine.visible().len());
        if let Some(claim) = engine.claim() {
            let draft = claim.draft();
            let _ = write!(out, ", heading {:.1}", draft.heading());
            if !draft.stamp().is_blank() {
                let _ = write!(out, ", stamp {}", draft.stamp().describe());
            }
            if let ClaimKind::Caught(plane) = claim.kind() {
                let trail: Vec<_> = plane.trail().iter().map(ToString::to_string).collect();
                let _ = write!(out, ", trail {}", trail.join(" -> "));
            }
        }
        out
    }

    fn explain(error: &ConsoleError) -> String {
        match error {
            ConsoleError::Claim(ClaimError::SensorUnavailable) => "Need your location first.".to_string(),
            ConsoleError::Claim(ClaimError::NoEligibleTarget) => "No plane in reach.".to_string(),
            ConsoleError::Claim(ClaimError::NotFree) => "You are already holding a plane.".to_string(),
            ConsoleError::Claim(ClaimError::NoClaim) => "You are not holding a plane.".to_string(),
            ConsoleError::Claim(ClaimError::CommitPending) => "Still sending, hold on.".to_string(),
            ConsoleError::Claim(err @ (ClaimError::StoreUnreachable { reason, .. }
            | ClaimError::StoreRejected { reason, .. })) => {
                let lost = err.unsent_launch().map_or_else(String::new, |l| {
                    format!(" The launch heading {:.1} from {} was not sent.", l.heading(), l.origin())
                });
                format!("Sending failed: {reason}.{lost}")
            }
            other => format!("{other:?}"),
        }
    }
}
