use crate::flight_control::common::GeoPoint;
use crate::{event, warn};
use tokio::sync::watch;

/// The device position source.
///
/// Readers always see the latest fix; intermediate fixes are dropped. `None` means there
/// is no usable position, which blocks catching and sending.
#[derive(Debug)]
pub struct PositionSensor {
    tx: watch::Sender<Option<GeoPoint>>,
}

impl PositionSensor {
    pub fn new(initial: Option<GeoPoint>) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Publishes a new fix.
    pub fn report(&self, position: GeoPoint) {
        if !position.lon().is_finite() || !position.lat().is_finite() {
            warn!("Discarding non finite position fix {position}");
            return;
        }
        event!("Position fix {position}");
        self.tx.send_replace(Some(position));
    }

    /// Marks the position as unknown.
    pub fn lose(&self) {
        if self.tx.send_replace(None).is_some() {
            warn!("Position fix lost.");
        }
    }

    pub fn current(&self) -> Option<GeoPoint> { *self.tx.borrow() }

    pub fn subscribe(&self) -> watch::Receiver<Option<GeoPoint>> { self.tx.subscribe() }
}
