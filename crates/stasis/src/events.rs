//! # Host Event Bus
//!
//! Player-facing events queued by producers (network, scripts, tests) and
//! drained by the simulation at the start of each tick.
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌──────────────┐
//! │  Producer   │─────>│   Bounded   │─────>│  Simulation  │
//! │ (any thread)│      │   Channel   │      │ (tick thread)│
//! └─────────────┘      └─────────────┘      └──────────────┘
//! ```
//!
//! Sending never blocks the producer; a full queue drops the event.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use stasis_core::{EntityId, Location};

/// Events the host raises on behalf of its entities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// An entity (re)joined the session.
    Join {
        /// Who joined.
        entity: EntityId,
    },

    /// An entity wants to move or turn.
    Move {
        /// Who is moving.
        entity: EntityId,
        /// Requested location, including orientation.
        to: Location,
    },

    /// An entity wants to start or stop flying.
    ToggleFlight {
        /// Who is toggling.
        entity: EntityId,
        /// Requested flight state.
        flying: bool,
    },

    /// An entity left the session.
    Disconnect {
        /// Who left.
        entity: EntityId,
    },
}

impl HostEvent {
    /// Entity the event is about.
    #[must_use]
    pub const fn entity(&self) -> EntityId {
        match *self {
            Self::Join { entity }
            | Self::Move { entity, .. }
            | Self::ToggleFlight { entity, .. }
            | Self::Disconnect { entity } => entity,
        }
    }
}

/// Bounded host event queue.
pub struct EventBus {
    sender: Sender<HostEvent>,
    receiver: Receiver<HostEvent>,
}

impl EventBus {
    /// Creates a bus holding at most `capacity` pending events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a producer handle.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a consumer handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a connected sender/receiver pair.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

/// Handle for queueing events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<HostEvent>,
}

impl EventSender {
    /// Queues an event without blocking.
    ///
    /// Returns `false` if the queue is full or the simulation is gone.
    #[inline]
    pub fn send(&self, event: HostEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!(entity = %event.entity(), "host event queue full, event dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Queues an event, waiting for room if the queue is full.
    #[inline]
    pub fn send_blocking(&self, event: HostEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}

/// Handle for draining events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<HostEvent>,
}

impl EventReceiver {
    /// Takes every pending event, oldest first.
    #[inline]
    pub fn drain(&self) -> Vec<HostEvent> {
        self.receiver.try_iter().collect()
    }

    /// Takes one pending event, if any.
    #[inline]
    pub fn try_recv(&self) -> Option<HostEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// True if at least one event is pending.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}
