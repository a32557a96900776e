//! # Simulation Error Types

use std::path::PathBuf;

use stasis_core::EntityId;
use stasis_freeze::FreezeError;
use thiserror::Error;

/// Errors that can occur while setting up or driving the simulation.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// The freeze module refused an operation or its configuration.
    #[error(transparent)]
    Freeze(#[from] FreezeError),

    /// Configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for this schema.
    #[error("malformed configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No live entity with this id.
    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),

    /// The entity exists but is not connected.
    #[error("entity is offline: {0}")]
    Offline(EntityId),
}

/// Result type for simulation operations.
pub type SimulationResult<T> = Result<T, SimulationError>;
