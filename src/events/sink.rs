//! Event delivery.

use serde::{Deserialize, Serialize};

use super::GameEvent;

/// Receiver for engine events.
///
/// Sowing sequences and the race coordinator write through this trait so
/// they can be driven against any observer, not just the engine's own log.
pub trait EventSink {
    /// Deliver one event.
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Buffered events waiting for the presentation layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    pending: Vec<GameEvent>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events not yet drained.
    #[must_use]
    pub fn pending(&self) -> &[GameEvent] {
        &self.pending
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Drop every pending event.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: GameEvent) {
        tracing::trace!(?event, "event");
        self.pending.push(event);
    }
}
