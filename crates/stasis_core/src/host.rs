//! # Host Contract
//!
//! Effect modules do not own entities. The host simulation implements
//! [`MotionHost`] and passes itself into every operation that needs to read
//! or write entity state.
//!
//! ```text
//! stasis_core defines:     host implements:
//! ┌──────────────────┐     ┌──────────────────┐
//! │ trait MotionHost │ ←── │ impl MotionHost  │
//! └──────────────────┘     └──────────────────┘
//! ```

use std::collections::HashMap;

use crate::entity::{EntityId, Location};
use crate::motion::MotionAttributes;
use crate::Tick;

/// What an effect module may see and change on the host.
pub trait MotionHost {
    /// Current simulation tick.
    fn current_tick(&self) -> Tick;

    /// Reads an entity's motion attributes. `None` if it does not exist.
    fn motion(&self, entity: EntityId) -> Option<MotionAttributes>;

    /// Overwrites an entity's motion attributes. Unknown entities are ignored.
    fn set_motion(&mut self, entity: EntityId, motion: MotionAttributes);

    /// Reads an entity's location. `None` if it does not exist.
    fn location(&self, entity: EntityId) -> Option<Location>;

    /// Moves an entity, bypassing movement checks. Unknown entities are ignored.
    fn teleport(&mut self, entity: EntityId, to: Location);
}

// ============================================================================
// MOCK IMPLEMENTATION (For Testing)
// ============================================================================

/// Map-backed host with a hand-driven clock.
#[derive(Debug, Default)]
pub struct MockMotionHost {
    tick: Tick,
    motions: HashMap<EntityId, MotionAttributes>,
    locations: HashMap<EntityId, Location>,
    next_index: u32,
    teleports: u32,
}

impl MockMotionHost {
    /// Creates an empty host at tick 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity and returns its id.
    pub fn spawn(&mut self, motion: MotionAttributes, location: Location) -> EntityId {
        let id = EntityId::new(self.next_index, 0);
        self.next_index += 1;
        self.motions.insert(id, motion);
        self.locations.insert(id, location);
        id
    }

    /// Removes an entity.
    pub fn despawn(&mut self, entity: EntityId) {
        self.motions.remove(&entity);
        self.locations.remove(&entity);
    }

    /// Advances the clock by `ticks`.
    pub fn advance(&mut self, ticks: Tick) {
        self.tick += ticks;
    }

    /// Sets the clock.
    pub fn set_tick(&mut self, tick: Tick) {
        self.tick = tick;
    }

    /// Number of teleports performed so far.
    #[must_use]
    pub const fn teleports(&self) -> u32 {
        self.teleports
    }
}

impl MotionHost for MockMotionHost {
    fn current_tick(&self) -> Tick {
        self.tick
    }

    fn motion(&self, entity: EntityId) -> Option<MotionAttributes> {
        self.motions.get(&entity).copied()
    }

    fn set_motion(&mut self, entity: EntityId, motion: MotionAttributes) {
        if let Some(slot) = self.motions.get_mut(&entity) {
            *slot = motion;
        }
    }

    fn location(&self, entity: EntityId) -> Option<Location> {
        self.locations.get(&entity).copied()
    }

    fn teleport(&mut self, entity: EntityId, to: Location) {
        if let Some(slot) = self.locations.get_mut(&entity) {
            *slot = to;
            self.teleports += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_host_ignores_unknown_entities() {
        let mut host = MockMotionHost::new();
        let ghost = EntityId::new(99, 0);

        host.set_motion(ghost, MotionAttributes::FROZEN);
        host.teleport(ghost, Location::new(1.0, 2.0, 3.0));

        assert!(host.motion(ghost).is_none());
        assert_eq!(host.teleports(), 0);
    }

    #[test]
    fn test_mock_host_roundtrip() {
        let mut host = MockMotionHost::new();
        let id = host.spawn(MotionAttributes::DEFAULT, Location::new(0.0, 64.0, 0.0));

        host.set_motion(id, MotionAttributes::FROZEN);
        assert_eq!(host.motion(id), Some(MotionAttributes::FROZEN));

        host.advance(5);
        assert_eq!(host.current_tick(), 5);
    }
}
