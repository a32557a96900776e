//! # Interaction Guard
//!
//! Host events that could let a frozen entity escape. Each handler reads an
//! immutable event and returns what the host must do with it.
//!
//! ```text
//! host event ──> guard ──> Allow / Continue        host commits the change
//!                     └──> Revert / Cancel         host drops the change
//! ```

use std::collections::HashMap;

use stasis_core::{EntityId, Location};

use crate::snapshot::EntitySnapshot;

/// An entity is about to move. Raised before the move is committed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveAttempt {
    /// Who is moving.
    pub entity: EntityId,
    /// Where it stands now.
    pub from: Location,
    /// Where it wants to be.
    pub to: Location,
}

/// An entity is about to start or stop flying.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlightToggle {
    /// Who is toggling.
    pub entity: EntityId,
    /// Requested flight state.
    pub flying: bool,
    /// Already cancelled by an earlier handler.
    pub cancelled: bool,
}

/// An entity left the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Disconnect {
    /// Who left.
    pub entity: EntityId,
}

/// Decision on a movement attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveVerdict {
    /// Commit the move.
    Allow,
    /// Drop the move and put the entity back here.
    Revert {
        /// Last known position.
        to: Location,
    },
}

/// Decision on a cancellable event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    /// Let the event through.
    Continue,
    /// Cancel the event.
    Cancel,
}

/// Event enforcement for frozen entities.
///
/// Only answers while registered with the host's dispatch; otherwise
/// every event passes through.
#[derive(Debug, Default)]
pub struct InteractionGuard {
    registered: bool,
}

impl InteractionGuard {
    /// Creates an unregistered guard.
    #[must_use]
    pub const fn new() -> Self {
        Self { registered: false }
    }

    /// Registers with (or leaves) the host's event dispatch.
    pub fn set_registered(&mut self, registered: bool) {
        self.registered = registered;
    }

    /// True while receiving events.
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        self.registered
    }

    /// Movement check.
    ///
    /// Frozen entities without turning permission are always put back.
    /// With turning permission only coordinate changes are put back.
    #[must_use]
    pub fn on_move(
        &self,
        snapshots: &HashMap<EntityId, EntitySnapshot>,
        event: &MoveAttempt,
    ) -> MoveVerdict {
        if !self.registered {
            return MoveVerdict::Allow;
        }
        match snapshots.get(&event.entity) {
            Some(snapshot)
                if !snapshot.turning_allowed() || !event.from.same_coordinates(&event.to) =>
            {
                MoveVerdict::Revert { to: event.from }
            }
            _ => MoveVerdict::Allow,
        }
    }

    /// Flight check: frozen entities may not stop flying.
    ///
    /// Events cancelled by earlier handlers are ignored.
    #[must_use]
    pub fn on_flight_toggle(
        &self,
        snapshots: &HashMap<EntityId, EntitySnapshot>,
        event: &FlightToggle,
    ) -> EventOutcome {
        if !self.registered || event.cancelled || event.flying {
            return EventOutcome::Continue;
        }
        if snapshots.contains_key(&event.entity) {
            EventOutcome::Cancel
        } else {
            EventOutcome::Continue
        }
    }

    /// Disconnect check: true if the entity's freeze must be released now.
    #[must_use]
    pub fn on_disconnect(
        &self,
        snapshots: &HashMap<EntityId, EntitySnapshot>,
        event: &Disconnect,
    ) -> bool {
        self.registered && snapshots.contains_key(&event.entity)
    }
}
