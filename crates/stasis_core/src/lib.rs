//! # STASIS Core
//!
//! Contracts between the host simulation and the effect modules that run
//! inside it.
//!
//! ## Layout
//!
//! - [`entity`]: stable entity identifiers and locations
//! - [`motion`]: the four motion attributes an effect may override
//! - [`host`]: what a host simulation must expose to effect modules
//! - [`effects`]: the status-effect subsystem contract and an in-memory book
//! - [`lifecycle`]: ACTIVE / PAUSED / STOPPED transition table
//! - [`ticker`]: tick-driven periodic task and the pausable effect clock
//! - [`tick`]: fixed-timestep loop pacing the host in real time
//!
//! ## Example
//!
//! ```rust,ignore
//! use stasis_core::{TickerTask, Tick};
//!
//! let mut task = TickerTask::new(0, 1);
//! task.start(0);
//! assert!(task.poll(0));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod effects;
pub mod entity;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod motion;
pub mod tick;
pub mod ticker;

pub use effects::{EffectBook, EffectId, EffectSpec, SharedEffects, StatusEffects};
pub use entity::{EntityId, Location};
pub use error::{EffectError, EffectResult};
pub use host::{MockMotionHost, MotionHost};
pub use lifecycle::{ListenerChange, ModuleState, SweeperCommand, Transition};
pub use motion::MotionAttributes;
pub use tick::{TickLoop, TickStats};
pub use ticker::{EffectClock, TaskState, TickerTask};

/// Simulation tick counter.
pub type Tick = u64;
