//! # Status Effect Errors

use thiserror::Error;

use crate::effects::EffectId;
use crate::entity::EntityId;

/// Errors a status-effect subsystem may report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
    /// The subsystem refused to apply the effect.
    #[error("effect {effect} rejected: {reason}")]
    Rejected {
        /// Effect that was refused.
        effect: EffectId,
        /// Why it was refused.
        reason: String,
    },

    /// The subsystem does not know the entity.
    #[error("no such entity: {0}")]
    UnknownEntity(EntityId),
}

/// Result type for status-effect operations.
pub type EffectResult<T> = Result<T, EffectError>;
