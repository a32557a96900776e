//! # Freeze Registry
//!
//! Owns every snapshot, and is the only place entities get frozen or
//! released. The host passes itself into each call; the registry never holds
//! on to it.
//!
//! ## Release path
//!
//! Expiry, disconnect and explicit `unfreeze` all end in `release`:
//! restore the four motion attributes, then clear the jump suppression.
//!
//! ## Time
//!
//! Expiry ticks live on an [`EffectClock`] that stands still while the
//! registry is PAUSED, so a pause never eats into a freeze's duration.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use stasis_core::lifecycle::{self, ListenerChange, ModuleState, SweeperCommand};
use stasis_core::{
    EffectBook, EffectClock, EffectId, EntityId, MotionAttributes, MotionHost, StatusEffects,
    Tick,
};

use crate::config::FreezeConfig;
use crate::error::{FreezeError, FreezeResult};
use crate::guard::{
    Disconnect, EventOutcome, FlightToggle, InteractionGuard, MoveAttempt, MoveVerdict,
};
use crate::snapshot::{EntitySnapshot, Expiry, FreezeDuration};
use crate::sweeper::{ExpirySweeper, SweepStats};

/// Registry of frozen entities.
#[derive(Debug)]
pub struct FreezeRegistry<E: StatusEffects = EffectBook> {
    config: FreezeConfig,
    state: ModuleState,
    snapshots: HashMap<EntityId, EntitySnapshot>,
    sweeper: ExpirySweeper,
    guard: InteractionGuard,
    clock: EffectClock,
    effects: E,
}

impl FreezeRegistry<EffectBook> {
    /// Creates a STOPPED registry with its own status-effect book.
    #[must_use]
    pub fn new(config: FreezeConfig) -> Self {
        Self::with_effects(config, EffectBook::new())
    }
}

impl<E: StatusEffects> FreezeRegistry<E> {
    /// Creates a STOPPED registry using the host's status-effect subsystem.
    #[must_use]
    pub fn with_effects(config: FreezeConfig, effects: E) -> Self {
        let sweeper = ExpirySweeper::new(config.sweep_delay, config.sweep_interval);
        Self {
            config,
            state: ModuleState::Stopped,
            snapshots: HashMap::new(),
            sweeper,
            guard: InteractionGuard::new(),
            clock: EffectClock::new(),
            effects,
        }
    }

    // ========================================================================
    // Caller API
    // ========================================================================

    /// Freezes an entity until released explicitly, without turning.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if the host has no such entity.
    ///
    /// # Panics
    ///
    /// Panics on [`EntityId::NULL`].
    #[track_caller]
    pub fn freeze<H: MotionHost + ?Sized>(&mut self, host: &mut H, entity: EntityId) -> FreezeResult<()> {
        self.freeze_with(host, entity, FreezeDuration::Infinite, false)
    }

    /// Freezes an entity for `duration` ticks, without turning.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if the host has no such entity.
    ///
    /// # Panics
    ///
    /// Panics on [`EntityId::NULL`].
    #[track_caller]
    pub fn freeze_for<H: MotionHost + ?Sized>(
        &mut self,
        host: &mut H,
        entity: EntityId,
        duration: impl Into<FreezeDuration>,
    ) -> FreezeResult<()> {
        self.freeze_with(host, entity, duration, false)
    }

    /// Freezes an entity for `duration` ticks.
    ///
    /// A frozen entity keeps its original snapshot; freezing it again only
    /// replaces the expiry and turning permission.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if the host has no such entity. Nothing is
    /// recorded in that case.
    ///
    /// # Panics
    ///
    /// Panics on [`EntityId::NULL`].
    #[track_caller]
    pub fn freeze_with<H: MotionHost + ?Sized>(
        &mut self,
        host: &mut H,
        entity: EntityId,
        duration: impl Into<FreezeDuration>,
        turning_allowed: bool,
    ) -> FreezeResult<()> {
        assert_live(entity);
        let duration = duration.into();
        let current = host.motion(entity).ok_or(FreezeError::UnknownEntity(entity))?;
        let expires = Expiry::after(self.clock.effective(host.current_tick()), duration);

        match self.snapshots.entry(entity) {
            Entry::Occupied(mut slot) => {
                slot.get_mut().extend(expires, turning_allowed);
                tracing::debug!(%entity, ?expires, turning_allowed, "freeze extended");
            }
            Entry::Vacant(slot) => {
                slot.insert(EntitySnapshot::capture(entity, current, expires, turning_allowed));
                tracing::debug!(%entity, ?expires, turning_allowed, "entity frozen");
            }
        }

        host.set_motion(entity, MotionAttributes::FROZEN);

        let no_jump = self.config.jump_effect.lasting(duration.ticks());
        if let Err(error) = self.effects.apply(&no_jump, entity) {
            tracing::warn!(%entity, %error, "jump suppression not applied, freeze stays in place");
        }
        Ok(())
    }

    /// Releases an entity. Returns false if it was not frozen.
    ///
    /// # Panics
    ///
    /// Panics on [`EntityId::NULL`].
    #[track_caller]
    pub fn unfreeze<H: MotionHost + ?Sized>(&mut self, host: &mut H, entity: EntityId) -> bool {
        assert_live(entity);
        let Some(snapshot) = self.snapshots.remove(&entity) else {
            return false;
        };
        release(host, &mut self.effects, &self.config.jump_effect.id, &snapshot);
        true
    }

    /// True if the entity is frozen.
    ///
    /// # Panics
    ///
    /// Panics on [`EntityId::NULL`].
    #[track_caller]
    #[must_use]
    pub fn is_frozen(&self, entity: EntityId) -> bool {
        assert_live(entity);
        self.snapshots.contains_key(&entity)
    }

    /// Snapshot of a frozen entity.
    #[must_use]
    pub fn snapshot(&self, entity: EntityId) -> Option<&EntitySnapshot> {
        self.snapshots.get(&entity)
    }

    /// Number of frozen entities.
    #[must_use]
    pub fn frozen_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Iterates over frozen entities in no particular order.
    pub fn frozen(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.snapshots.keys().copied()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Moves to `state` at host tick `now`. Returns false if already there.
    pub fn set_state(&mut self, now: Tick, state: ModuleState) -> bool {
        let Some(transition) = lifecycle::plan(self.state, state) else {
            return false;
        };

        match transition.listener {
            ListenerChange::Register => self.guard.set_registered(true),
            ListenerChange::Unregister => self.guard.set_registered(false),
            ListenerChange::Keep => {}
        }

        for &command in transition.sweeper {
            self.sweeper.command(command, now);
            match command {
                SweeperCommand::Pause => self.clock.suspend(now),
                SweeperCommand::Resume | SweeperCommand::Stop => self.clock.resume(now),
                SweeperCommand::Start => {}
            }
        }

        self.state = state;
        tracing::info!(
            from = %transition.from,
            to = %state,
            frozen = self.snapshots.len(),
            "freeze module state changed"
        );
        true
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ModuleState {
        self.state
    }

    /// Called by the host once per tick. Sweeps when due and returns the
    /// number of entities released by expiry.
    pub fn tick<H: MotionHost + ?Sized>(&mut self, host: &mut H) -> usize {
        let now = host.current_tick();
        if !self.sweeper.is_due(now) {
            return 0;
        }

        let effective_now = self.clock.effective(now);
        let effects = &mut self.effects;
        let no_jump = &self.config.jump_effect.id;
        let released = self.sweeper.sweep(&mut self.snapshots, effective_now, |snapshot| {
            release(&mut *host, &mut *effects, no_jump, snapshot);
        });

        if released > 0 {
            tracing::debug!(
                tick = now,
                released,
                remaining = self.snapshots.len(),
                "expiry sweep"
            );
        }
        released
    }

    /// Sweep counters.
    #[must_use]
    pub const fn sweep_stats(&self) -> SweepStats {
        self.sweeper.stats()
    }

    // ========================================================================
    // Host events
    // ========================================================================

    /// Movement attempt, evaluated before the host commits the move.
    #[must_use]
    pub fn handle_move(&self, event: &MoveAttempt) -> MoveVerdict {
        let verdict = self.guard.on_move(&self.snapshots, event);
        if let MoveVerdict::Revert { .. } = verdict {
            tracing::trace!(entity = %event.entity, "frozen entity move reverted");
        }
        verdict
    }

    /// Flight toggle attempt, evaluated after the host's own checks.
    #[must_use]
    pub fn handle_flight_toggle(&self, event: &FlightToggle) -> EventOutcome {
        self.guard.on_flight_toggle(&self.snapshots, event)
    }

    /// Disconnect. Returns true if a freeze was released.
    pub fn handle_disconnect<H: MotionHost + ?Sized>(&mut self, host: &mut H, event: &Disconnect) -> bool {
        self.guard.on_disconnect(&self.snapshots, event) && self.unfreeze(host, event.entity)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Module configuration.
    #[must_use]
    pub const fn config(&self) -> &FreezeConfig {
        &self.config
    }

    /// The status-effect subsystem in use.
    #[must_use]
    pub const fn effects(&self) -> &E {
        &self.effects
    }

    /// True while the guard receives host events.
    #[must_use]
    pub const fn is_listening(&self) -> bool {
        self.guard.is_registered()
    }
}

/// The single restoration path.
fn release<H, E>(host: &mut H, effects: &mut E, no_jump: &EffectId, snapshot: &EntitySnapshot)
where
    H: MotionHost + ?Sized,
    E: StatusEffects,
{
    snapshot.restore(host);
    effects.clear(snapshot.owner(), no_jump);
    tracing::debug!(entity = %snapshot.owner(), "entity released");
}

#[track_caller]
fn assert_live(entity: EntityId) {
    assert!(!entity.is_null(), "null entity id passed to freeze registry");
}

#[cfg(test)]
mod tests {
    use super::*;
    use stasis_core::{Location, MockMotionHost};

    fn setup() -> (MockMotionHost, FreezeRegistry, EntityId) {
        let mut host = MockMotionHost::new();
        let id = host.spawn(MotionAttributes::DEFAULT, Location::new(0.0, 64.0, 0.0));
        let mut registry = FreezeRegistry::new(FreezeConfig::default());
        registry.set_state(0, ModuleState::Active);
        (host, registry, id)
    }

    #[test]
    fn test_freeze_applies_frozen_state() {
        let (mut host, mut registry, id) = setup();

        registry.freeze_for(&mut host, id, 100).unwrap();

        assert!(registry.is_frozen(id));
        assert_eq!(host.motion(id), Some(MotionAttributes::FROZEN));
        assert!(registry.effects().has(id, &registry.config().jump_effect.id));
        assert_eq!(registry.snapshot(id).unwrap().expires(), Expiry::At(100));
    }

    #[test]
    fn test_unknown_entity_records_nothing() {
        let (mut host, mut registry, _) = setup();
        let ghost = EntityId::new(42, 0);

        let err = registry.freeze(&mut host, ghost).unwrap_err();
        assert_eq!(err, FreezeError::UnknownEntity(ghost));
        assert!(!registry.is_frozen(ghost));
        assert_eq!(registry.frozen_count(), 0);
    }

    #[test]
    fn test_unfreeze_clears_jump_suppression() {
        let (mut host, mut registry, id) = setup();
        registry.freeze(&mut host, id).unwrap();

        assert!(registry.unfreeze(&mut host, id));
        assert!(!registry.effects().has(id, &registry.config().jump_effect.id));
        assert_eq!(host.motion(id), Some(MotionAttributes::DEFAULT));
    }

    #[test]
    fn test_same_state_is_no_change() {
        let (_, mut registry, _) = setup();
        assert!(!registry.set_state(5, ModuleState::Active));
        assert!(registry.set_state(5, ModuleState::Stopped));
        assert!(!registry.set_state(6, ModuleState::Stopped));
    }

    #[test]
    fn test_registry_starts_stopped_and_deaf() {
        let registry = FreezeRegistry::new(FreezeConfig::default());
        assert_eq!(registry.state(), ModuleState::Stopped);
        assert!(!registry.is_listening());
    }

    #[test]
    #[should_panic(expected = "null entity id")]
    fn test_null_entity_is_contract_violation() {
        let (mut host, mut registry, _) = setup();
        let _ = registry.freeze(&mut host, EntityId::NULL);
    }
}
