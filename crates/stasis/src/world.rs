//! # Host World
//!
//! Entity storage for the host simulation: one slot per entity, recycled
//! through a free list with a generation bump so stale ids never resolve.

use stasis_core::{EntityId, Location, MotionAttributes, MotionHost, Tick};

/// One entity as the host sees it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Current id of this slot.
    pub id: EntityId,
    /// Slot holds a live entity.
    pub alive: bool,
    /// Entity is connected to the session.
    pub online: bool,
    /// Locomotion settings.
    pub motion: MotionAttributes,
    /// Position and orientation.
    pub location: Location,
}

impl Body {
    fn dead() -> Self {
        Self {
            id: EntityId::NULL,
            alive: false,
            online: false,
            motion: MotionAttributes::DEFAULT,
            location: Location::default(),
        }
    }
}

/// Entity storage and tick clock of the host.
#[derive(Debug, Default)]
pub struct World {
    tick: Tick,
    bodies: Vec<Body>,
    free_indices: Vec<u32>,
    alive_count: usize,
    teleports: u64,
}

impl World {
    /// Creates an empty world at tick 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns an online entity with stock motion attributes.
    pub fn spawn(&mut self, location: Location) -> EntityId {
        self.spawn_with(MotionAttributes::DEFAULT, location)
    }

    /// Spawns an online entity.
    ///
    /// Returns `EntityId::NULL` once every `u32` index is taken.
    pub fn spawn_with(&mut self, motion: MotionAttributes, location: Location) -> EntityId {
        let (index, generation) = match self.free_indices.pop() {
            Some(index) => {
                let previous = self.bodies[index as usize].id;
                (index, previous.generation().wrapping_add(1))
            }
            None => {
                let Ok(index) = u32::try_from(self.bodies.len()) else {
                    return EntityId::NULL;
                };
                self.bodies.push(Body::dead());
                (index, 0)
            }
        };

        let id = EntityId::new(index, generation);
        self.bodies[index as usize] = Body {
            id,
            alive: true,
            online: true,
            motion,
            location,
        };
        self.alive_count += 1;
        id
    }

    /// Removes an entity. Returns false for dead or stale ids.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some(body) = self.get_mut(id) else {
            return false;
        };
        body.alive = false;
        body.online = false;
        self.alive_count -= 1;
        self.free_indices.push(id.index());
        true
    }

    /// True if `id` names a live entity.
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// True if `id` names a live entity that is currently connected.
    #[must_use]
    pub fn is_online(&self, id: EntityId) -> bool {
        self.get(id).is_some_and(|body| body.online)
    }

    /// Live entity by id.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Body> {
        if id.is_null() {
            return None;
        }
        self.bodies
            .get(id.index() as usize)
            .filter(|body| body.alive && body.id == id)
    }

    /// Live entity by id, mutably.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        if id.is_null() {
            return None;
        }
        self.bodies
            .get_mut(id.index() as usize)
            .filter(|body| body.alive && body.id == id)
    }

    /// Marks an entity connected or disconnected. Returns false if unknown.
    pub fn set_online(&mut self, id: EntityId, online: bool) -> bool {
        match self.get_mut(id) {
            Some(body) => {
                body.online = online;
                true
            }
            None => false,
        }
    }

    /// Commits a regular move. Unknown entities are ignored.
    pub fn commit_move(&mut self, id: EntityId, to: Location) {
        if let Some(body) = self.get_mut(id) {
            body.location = to;
        }
    }

    /// Number of live entities.
    #[must_use]
    pub const fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// Advances the clock by one tick and returns the new tick.
    pub fn advance(&mut self) -> Tick {
        self.tick += 1;
        self.tick
    }

    /// Forced relocations performed so far.
    #[must_use]
    pub const fn teleports(&self) -> u64 {
        self.teleports
    }
}

impl MotionHost for World {
    fn current_tick(&self) -> Tick {
        self.tick
    }

    fn motion(&self, entity: EntityId) -> Option<MotionAttributes> {
        self.get(entity).map(|body| body.motion)
    }

    fn set_motion(&mut self, entity: EntityId, motion: MotionAttributes) {
        if let Some(body) = self.get_mut(entity) {
            body.motion = motion;
        }
    }

    fn location(&self, entity: EntityId) -> Option<Location> {
        self.get(entity).map(|body| body.location)
    }

    fn teleport(&mut self, entity: EntityId, to: Location) {
        if let Some(body) = self.get_mut(entity) {
            body.location = to;
            self.teleports += 1;
        }
    }
}
