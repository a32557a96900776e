//! # STASIS
//!
//! Headless host simulation driving the freeze effect.
//!
//! ## Components
//!
//! - [`world`]: entity storage, implements the host contract
//! - [`events`]: bounded queue of player-facing host events
//! - [`simulation`]: per-tick event dispatch and expiry sweep
//! - [`config`]: TOML settings for the host and its freeze module
//!
//! ## Example
//!
//! ```rust,ignore
//! use stasis::{HostEvent, Simulation, SimulationConfig};
//!
//! let mut sim = Simulation::new(SimulationConfig::default())?;
//! let player = sim.spawn(MotionAttributes::DEFAULT, Location::new(0.0, 64.0, 0.0));
//! sim.freeze(player, 100, false)?;
//!
//! sim.sender().send(HostEvent::Move { entity: player, to: somewhere });
//! let report = sim.step(); // move reverted
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod events;
pub mod simulation;
pub mod world;

pub use config::SimulationConfig;
pub use error::{SimulationError, SimulationResult};
pub use events::{EventBus, EventReceiver, EventSender, HostEvent};
pub use simulation::{Simulation, TickReport};
pub use world::{Body, World};
