//! # Motion Attributes
//!
//! The four per-entity values that decide how an entity gets around.
//! Effects that override them must put them back exactly as they found them.

/// Locomotion settings of one entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionAttributes {
    /// Ground speed.
    pub walk_speed: f32,
    /// Air speed.
    pub fly_speed: f32,
    /// Whether the entity may fly at all.
    pub allow_flight: bool,
    /// Whether the entity is flying right now.
    pub flying: bool,
}

impl MotionAttributes {
    /// Stock speeds the host hands out to freshly joined entities.
    pub const DEFAULT: Self = Self {
        walk_speed: 0.2,
        fly_speed: 0.1,
        allow_flight: false,
        flying: false,
    };

    /// Immobilized state: no speed, hovering in place.
    ///
    /// Flight is forced on so gravity and fall damage do not apply.
    pub const FROZEN: Self = Self {
        walk_speed: 0.0,
        fly_speed: 0.0,
        allow_flight: true,
        flying: true,
    };

    /// True if the entity can neither walk nor fly anywhere.
    #[inline]
    #[must_use]
    pub fn is_immobile(&self) -> bool {
        self.walk_speed == 0.0 && self.fly_speed == 0.0 && self.flying
    }
}

impl Default for MotionAttributes {
    fn default() -> Self {
        Self::DEFAULT
    }
}
