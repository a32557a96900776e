//! # Entity Identity & Location
//!
//! Effect modules never hold live entity handles. They key everything by
//! [`EntityId`], which stays stable for the lifetime of a session:
//! - Lower 32 bits: slot index in the host's entity storage
//! - Upper 32 bits: generation counter so a reused slot is a different entity

use bytemuck::{Pod, Zeroable};

/// Stable identifier of an entity inside a host simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Null/absent entity. Passing it to an effect module is a contract
    /// violation.
    pub const NULL: Self = Self(u64::MAX);

    /// Creates an entity ID from slot index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation of the slot.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Checks if this is the null ID.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::NULL
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            f.write_str("entity#null")
        } else {
            write!(f, "entity#{}v{}", self.index(), self.generation())
        }
    }
}

/// Where an entity stands and where it is looking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Location {
    /// X coordinate in world space.
    pub x: f32,
    /// Y coordinate in world space.
    pub y: f32,
    /// Z coordinate in world space.
    pub z: f32,
    /// Horizontal look angle in degrees.
    pub yaw: f32,
    /// Vertical look angle in degrees.
    pub pitch: f32,
}

impl Location {
    /// Creates a location facing yaw 0, pitch 0.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Returns a copy looking in the given direction.
    #[inline]
    #[must_use]
    pub const fn looking(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// True if both locations share the exact same coordinates.
    ///
    /// Orientation is ignored.
    #[inline]
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn same_coordinates(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}
