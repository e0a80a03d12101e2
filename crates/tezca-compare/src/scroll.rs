use tokio::sync::watch;

/// Scroll position of one pane, observable by other parties.
///
/// Panes scroll independently. A caller wanting synchronized scrolling
/// subscribes to one region and drives the other with whatever mapping suits
/// it; matched articles rarely have equal heights, so no policy is built in.
pub struct ScrollRegion {
    tx: watch::Sender<f64>,
}

/// A stream of scroll positions.
pub type ScrollStream = watch::Receiver<f64>;

impl ScrollRegion {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0.0);
        Self { tx }
    }

    pub fn position(&self) -> f64 {
        *self.tx.borrow()
    }

    /// Move to `position`. Negative and non-finite positions clamp to the top.
    ///
    /// Subscribers are notified only when the position actually changes.
    pub fn set_position(&self, position: f64) {
        let position = if position.is_finite() && position > 0.0 {
            position
        } else {
            0.0
        };
        self.tx.send_if_modified(|current| {
            if *current == position {
                false
            } else {
                *current = position;
                true
            }
        });
    }

    /// Back to the top.
    pub fn reset(&self) {
        self.set_position(0.0);
    }

    pub fn subscribe(&self) -> ScrollStream {
        self.tx.subscribe()
    }
}

impl Default for ScrollRegion {
    fn default() -> Self {
        Self::new()
    }
}
