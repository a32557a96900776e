//! # STASIS Freeze
//!
//! Temporarily immobilizes live entities inside a running simulation.
//!
//! ## How a freeze works
//!
//! 1. **Snapshot** - walk speed, fly speed and both flight flags are captured
//!    once, on the first freeze of an entity.
//! 2. **Immobilize** - speeds drop to zero and the entity is forced to hover,
//!    so no gravity or fall damage applies; jumping is suppressed through the
//!    host's status-effect subsystem.
//! 3. **Guard** - moves are reverted before they are committed, landing is
//!    cancelled, and a disconnect releases the entity on the spot.
//! 4. **Release** - on expiry, disconnect or `unfreeze` the snapshot is written
//!    back verbatim and removed.
//!
//! Freezes are session-scoped and never persisted.
//!
//! ## Example
//!
//! ```rust,ignore
//! use stasis_core::ModuleState;
//! use stasis_freeze::{FreezeConfig, FreezeRegistry};
//!
//! let mut freeze = FreezeRegistry::new(FreezeConfig::default());
//! freeze.set_state(world.current_tick(), ModuleState::Active);
//!
//! freeze.freeze_for(&mut world, player, 100)?; // 5 seconds at 20 Hz
//!
//! // every tick:
//! freeze.tick(&mut world);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod guard;
pub mod registry;
pub mod snapshot;
pub mod sweeper;

pub use config::FreezeConfig;
pub use error::{FreezeError, FreezeResult};
pub use guard::{
    Disconnect, EventOutcome, FlightToggle, InteractionGuard, MoveAttempt, MoveVerdict,
};
pub use registry::FreezeRegistry;
pub use snapshot::{EntitySnapshot, Expiry, FreezeDuration};
pub use sweeper::{ExpirySweeper, SweepStats};
