//! # Entity Snapshots
//!
//! What an entity looked like before it was frozen, plus when the freeze
//! ends and whether the entity may look around meanwhile.

use stasis_core::{EntityId, MotionAttributes, MotionHost, Tick};

/// How long a freeze lasts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FreezeDuration {
    /// Released after this many ticks.
    Ticks(Tick),
    /// Released only explicitly or on disconnect.
    Infinite,
}

impl FreezeDuration {
    /// Designated "max" sentinel of signed durations; treated as infinite.
    pub const MAX_SENTINEL: i64 = i32::MAX as i64;

    /// Interprets a signed tick count: negative values,
    /// [`Self::MAX_SENTINEL`] and `i64::MAX` are infinite. Every other
    /// non-negative count is a finite freeze.
    #[must_use]
    pub fn from_ticks(ticks: i64) -> Self {
        if ticks < 0 || ticks == Self::MAX_SENTINEL || ticks == i64::MAX {
            Self::Infinite
        } else {
            Self::Ticks(ticks.unsigned_abs())
        }
    }

    /// Tick count, `None` when infinite.
    #[must_use]
    pub const fn ticks(self) -> Option<Tick> {
        match self {
            Self::Ticks(ticks) => Some(ticks),
            Self::Infinite => None,
        }
    }
}

impl From<i32> for FreezeDuration {
    fn from(ticks: i32) -> Self {
        Self::from_ticks(i64::from(ticks))
    }
}

impl From<i64> for FreezeDuration {
    fn from(ticks: i64) -> Self {
        Self::from_ticks(ticks)
    }
}

/// When a freeze ends, on the registry's effect clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Expiry {
    /// Never on its own.
    Never,
    /// At (or after) this effect-clock tick.
    At(Tick),
}

impl Expiry {
    /// Expiry of a freeze of `duration` starting at `now`.
    #[must_use]
    pub fn after(now: Tick, duration: FreezeDuration) -> Self {
        match duration {
            FreezeDuration::Ticks(ticks) => Self::At(now.saturating_add(ticks)),
            FreezeDuration::Infinite => Self::Never,
        }
    }

    /// True once `now` has reached the expiry.
    #[inline]
    #[must_use]
    pub const fn has_passed(self, now: Tick) -> bool {
        match self {
            Self::Never => false,
            Self::At(at) => now >= at,
        }
    }
}

/// Pre-freeze state of one entity.
///
/// `pre_freeze` is written once when the snapshot is taken; only the
/// expiry and turning permission change on a re-freeze.
#[derive(Clone, Debug, PartialEq)]
pub struct EntitySnapshot {
    owner: EntityId,
    pre_freeze: MotionAttributes,
    turning_allowed: bool,
    expires: Expiry,
}

impl EntitySnapshot {
    /// Captures `motion` as the pre-freeze state of `owner`.
    #[must_use]
    pub fn capture(
        owner: EntityId,
        motion: MotionAttributes,
        expires: Expiry,
        turning_allowed: bool,
    ) -> Self {
        Self {
            owner,
            pre_freeze: motion,
            turning_allowed,
            expires,
        }
    }

    /// Re-freeze: new expiry and turning permission, same pre-freeze state.
    pub fn extend(&mut self, expires: Expiry, turning_allowed: bool) {
        self.expires = expires;
        self.turning_allowed = turning_allowed;
    }

    /// Writes the pre-freeze attributes back onto the owner.
    pub fn restore<H: MotionHost + ?Sized>(&self, host: &mut H) {
        host.set_motion(self.owner, self.pre_freeze);
    }

    /// True once the freeze has run out at effect-clock tick `now`.
    #[inline]
    #[must_use]
    pub const fn is_expired(&self, now: Tick) -> bool {
        self.expires.has_passed(now)
    }

    /// Frozen entity.
    #[must_use]
    pub const fn owner(&self) -> EntityId {
        self.owner
    }

    /// Attributes to restore on release.
    #[must_use]
    pub const fn pre_freeze(&self) -> &MotionAttributes {
        &self.pre_freeze
    }

    /// Whether orientation-only moves are allowed.
    #[must_use]
    pub const fn turning_allowed(&self) -> bool {
        self.turning_allowed
    }

    /// When the freeze ends.
    #[must_use]
    pub const fn expires(&self) -> Expiry {
        self.expires
    }
}
