//! # Host Simulation
//!
//! Owns the world, the event queue and the freeze module, and advances them
//! together one tick at a time.
//!
//! ## Tick Order
//!
//! ```text
//! 1. clock += 1
//! 2. drain queued host events, oldest first:
//!      host checks ──> freeze guard ──> commit / revert / drop
//! 3. freeze expiry sweep
//! ```
//!
//! A guard verdict is always applied before the change reaches the world,
//! so a frozen entity is never seen away from its position, not even for
//! one tick.

use stasis_core::{
    EffectBook, EntityId, Location, ModuleState, MotionAttributes, MotionHost, StatusEffects, Tick,
};
use stasis_freeze::{
    Disconnect, EventOutcome, FlightToggle, FreezeDuration, FreezeRegistry, MoveAttempt,
    MoveVerdict,
};

use crate::config::SimulationConfig;
use crate::error::{SimulationError, SimulationResult};
use crate::events::{EventBus, EventReceiver, EventSender, HostEvent};
use crate::world::World;

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tick that was simulated.
    pub tick: Tick,
    /// Host events processed.
    pub events: usize,
    /// Events dropped because their entity does not exist, or because it is
    /// offline and the event needs a connected entity.
    pub ignored: usize,
    /// Moves put back by the freeze guard.
    pub moves_reverted: usize,
    /// Flight toggles cancelled by the freeze guard.
    pub flights_cancelled: usize,
    /// Freezes released because the entity disconnected.
    pub released_on_disconnect: usize,
    /// Freezes released by the expiry sweep.
    pub expired: usize,
}

/// The host simulation.
pub struct Simulation<E: StatusEffects = EffectBook> {
    config: SimulationConfig,
    world: World,
    freeze: FreezeRegistry<E>,
    bus: EventBus,
    receiver: EventReceiver,
}

impl Simulation<EffectBook> {
    /// Creates a simulation whose freeze module keeps its own effect book.
    ///
    /// # Errors
    ///
    /// Returns the first configuration problem found.
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        Self::with_effects(config, EffectBook::new())
    }
}

impl<E: StatusEffects> Simulation<E> {
    /// Creates a simulation around an existing status-effect subsystem.
    ///
    /// The freeze module starts ACTIVE.
    ///
    /// # Errors
    ///
    /// Returns the first configuration problem found.
    pub fn with_effects(config: SimulationConfig, effects: E) -> SimulationResult<Self> {
        config.validate()?;

        let world = World::new();
        let mut freeze = FreezeRegistry::with_effects(config.freeze.clone(), effects);
        freeze.set_state(world.current_tick(), ModuleState::Active);

        let bus = EventBus::new(config.event_capacity);
        let receiver = bus.receiver();

        tracing::info!(
            tick_rate = config.tick_rate,
            sweep_interval = config.freeze.sweep_interval,
            "simulation ready"
        );

        Ok(Self {
            config,
            world,
            freeze,
            bus,
            receiver,
        })
    }

    // ========================================================================
    // Entities
    // ========================================================================

    /// Spawns an online entity.
    pub fn spawn(&mut self, motion: MotionAttributes, location: Location) -> EntityId {
        self.world.spawn_with(motion, location)
    }

    /// Removes an entity, releasing its freeze first.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if there is no such live entity.
    pub fn despawn(&mut self, entity: EntityId) -> SimulationResult<()> {
        if !self.world.is_alive(entity) {
            return Err(SimulationError::UnknownEntity(entity));
        }
        self.freeze.unfreeze(&mut self.world, entity);
        self.world.despawn(entity);
        Ok(())
    }

    /// Freezes a connected entity. Negative or sentinel durations never
    /// expire.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if there is no such live entity and `Offline`
    /// if it is not connected.
    pub fn freeze(
        &mut self,
        entity: EntityId,
        duration: impl Into<FreezeDuration>,
        turning_allowed: bool,
    ) -> SimulationResult<()> {
        if !self.world.is_alive(entity) {
            return Err(SimulationError::UnknownEntity(entity));
        }
        if !self.world.is_online(entity) {
            return Err(SimulationError::Offline(entity));
        }
        self.freeze.freeze_with(&mut self.world, entity, duration, turning_allowed)?;
        Ok(())
    }

    /// Releases an entity. Returns false if it was not frozen.
    pub fn unfreeze(&mut self, entity: EntityId) -> bool {
        !entity.is_null() && self.freeze.unfreeze(&mut self.world, entity)
    }

    /// Moves the freeze module to `state` at the current tick.
    pub fn set_freeze_state(&mut self, state: ModuleState) -> bool {
        self.freeze.set_state(self.world.current_tick(), state)
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Producer handle for host events.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        self.bus.sender()
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self) -> TickReport {
        let mut report = TickReport {
            tick: self.world.advance(),
            ..TickReport::default()
        };

        for event in self.receiver.drain() {
            report.events += 1;
            self.dispatch(event, &mut report);
        }

        report.expired = self.freeze.tick(&mut self.world);
        report
    }

    fn dispatch(&mut self, event: HostEvent, report: &mut TickReport) {
        let entity = event.entity();
        if !self.world.is_alive(entity) {
            tracing::debug!(%entity, ?event, "event for unknown entity ignored");
            report.ignored += 1;
            return;
        }
        let needs_session = matches!(
            event,
            HostEvent::Move { .. } | HostEvent::ToggleFlight { .. }
        );
        if needs_session && !self.world.is_online(entity) {
            tracing::debug!(%entity, ?event, "event for offline entity ignored");
            report.ignored += 1;
            return;
        }

        match event {
            HostEvent::Join { entity } => self.on_join(entity),
            HostEvent::Move { entity, to } => {
                if self.on_move(entity, to) {
                    report.moves_reverted += 1;
                }
            }
            HostEvent::ToggleFlight { entity, flying } => {
                if self.on_toggle_flight(entity, flying) {
                    report.flights_cancelled += 1;
                }
            }
            HostEvent::Disconnect { entity } => {
                if self.on_disconnect(entity) {
                    report.released_on_disconnect += 1;
                }
            }
        }
    }

    fn on_join(&mut self, entity: EntityId) {
        self.world.set_online(entity, true);
        let reset = self.config.reset_speeds_on_join && !self.freeze.is_frozen(entity);
        if reset {
            self.world.set_motion(entity, MotionAttributes::DEFAULT);
        }
        tracing::info!(%entity, reset, "entity joined");
    }

    /// Returns true if the move was reverted.
    fn on_move(&mut self, entity: EntityId, to: Location) -> bool {
        let Some(from) = self.world.location(entity) else {
            return false;
        };

        match self.freeze.handle_move(&MoveAttempt { entity, from, to }) {
            MoveVerdict::Allow => {
                self.world.commit_move(entity, to);
                false
            }
            MoveVerdict::Revert { to: back } => {
                self.world.teleport(entity, back);
                tracing::trace!(%entity, "move reverted");
                true
            }
        }
    }

    /// Returns true if the freeze guard cancelled the toggle.
    fn on_toggle_flight(&mut self, entity: EntityId, flying: bool) -> bool {
        let Some(mut motion) = self.world.motion(entity) else {
            return false;
        };

        // The host refuses take-off without flight permission.
        let cancelled = flying && !motion.allow_flight;
        let toggle = FlightToggle {
            entity,
            flying,
            cancelled,
        };

        match self.freeze.handle_flight_toggle(&toggle) {
            EventOutcome::Cancel => {
                tracing::debug!(%entity, "flight toggle cancelled for frozen entity");
                true
            }
            EventOutcome::Continue => {
                if !cancelled {
                    motion.flying = flying;
                    self.world.set_motion(entity, motion);
                }
                false
            }
        }
    }

    /// Returns true if a freeze was released.
    fn on_disconnect(&mut self, entity: EntityId) -> bool {
        let released = self
            .freeze
            .handle_disconnect(&mut self.world, &Disconnect { entity });
        self.world.set_online(entity, false);
        tracing::info!(%entity, released, "entity disconnected");
        released
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Host settings.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Entity storage.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Freeze module.
    #[must_use]
    pub const fn freeze_registry(&self) -> &FreezeRegistry<E> {
        &self.freeze
    }

    /// Current tick.
    #[must_use]
    pub fn current_tick(&self) -> Tick {
        self.world.current_tick()
    }
}
