//! # Status Effects
//!
//! Effect modules use the host's status-effect subsystem for cosmetic
//! side effects (e.g. suppressing jumps). They only ever `apply` and
//! `clear`; everything else about effects belongs to the host.
//!
//! [`EffectBook`] is the in-memory subsystem used when the host does not
//! provide one. Several modules can share one book through
//! [`SharedEffects`].

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::error::{EffectError, EffectResult};
use crate::Tick;

/// Name of a status effect, e.g. `"no_jump"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectId(String);

impl EffectId {
    /// Creates an effect id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the effect name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything needed to apply one effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSpec {
    /// Which effect.
    pub id: EffectId,
    /// Strength of the effect.
    #[serde(default)]
    pub amplifier: u8,
    /// Length in ticks; `None` lasts until cleared.
    #[serde(default)]
    pub duration: Option<Tick>,
}

impl EffectSpec {
    /// Creates an infinite effect with the given amplifier.
    #[must_use]
    pub fn new(id: EffectId, amplifier: u8) -> Self {
        Self {
            id,
            amplifier,
            duration: None,
        }
    }

    /// Returns a copy lasting `duration` ticks (`None` for infinite).
    #[must_use]
    pub fn lasting(&self, duration: Option<Tick>) -> Self {
        Self {
            duration,
            ..self.clone()
        }
    }
}

/// Host status-effect subsystem.
pub trait StatusEffects: Send {
    /// Applies (or refreshes) an effect on an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the subsystem refuses the effect.
    fn apply(&mut self, effect: &EffectSpec, entity: EntityId) -> EffectResult<()>;

    /// Removes an effect from an entity. Returns whether it was present.
    fn clear(&mut self, entity: EntityId, effect: &EffectId) -> bool;
}

/// In-memory status-effect subsystem.
#[derive(Debug, Default)]
pub struct EffectBook {
    active: HashMap<EntityId, HashMap<EffectId, EffectSpec>>,
    immune: HashSet<EntityId>,
}

impl EffectBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty book wrapped for sharing between modules.
    #[must_use]
    pub fn shared() -> SharedEffects {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Marks an entity as immune; applying any effect to it is rejected.
    pub fn set_immune(&mut self, entity: EntityId, immune: bool) {
        if immune {
            self.immune.insert(entity);
        } else {
            self.immune.remove(&entity);
        }
    }

    /// Returns the active spec of an effect on an entity.
    #[must_use]
    pub fn get(&self, entity: EntityId, effect: &EffectId) -> Option<&EffectSpec> {
        self.active.get(&entity).and_then(|effects| effects.get(effect))
    }

    /// True if the effect is currently on the entity.
    #[must_use]
    pub fn has(&self, entity: EntityId, effect: &EffectId) -> bool {
        self.get(entity, effect).is_some()
    }
}

impl StatusEffects for EffectBook {
    fn apply(&mut self, effect: &EffectSpec, entity: EntityId) -> EffectResult<()> {
        if self.immune.contains(&entity) {
            return Err(EffectError::Rejected {
                effect: effect.id.clone(),
                reason: format!("{entity} is immune"),
            });
        }
        self.active
            .entry(entity)
            .or_default()
            .insert(effect.id.clone(), effect.clone());
        Ok(())
    }

    fn clear(&mut self, entity: EntityId, effect: &EffectId) -> bool {
        let Some(effects) = self.active.get_mut(&entity) else {
            return false;
        };
        let removed = effects.remove(effect).is_some();
        if effects.is_empty() {
            self.active.remove(&entity);
        }
        removed
    }
}

/// A status-effect subsystem shared by several modules.
pub type SharedEffects<T = EffectBook> = Arc<Mutex<T>>;

impl<T: StatusEffects> StatusEffects for Arc<Mutex<T>> {
    fn apply(&mut self, effect: &EffectSpec, entity: EntityId) -> EffectResult<()> {
        self.lock().apply(effect, entity)
    }

    fn clear(&mut self, entity: EntityId, effect: &EffectId) -> bool {
        self.lock().clear(entity, effect)
    }
}
