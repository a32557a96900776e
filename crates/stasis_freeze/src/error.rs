//! # Freeze Error Types

use stasis_core::EntityId;
use thiserror::Error;

/// Errors that can occur in the freeze module.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FreezeError {
    /// The host has no such entity; nothing was frozen.
    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),

    /// Invalid configuration file or value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for freeze operations.
pub type FreezeResult<T> = Result<T, FreezeError>;
