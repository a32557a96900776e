//! # Freeze Configuration
//!
//! Loaded once at startup, usually as a `[freeze]` table:
//!
//! ```toml
//! sweep_interval = 1
//! sweep_delay = 0
//!
//! [jump_effect]
//! id = "no_jump"
//! amplifier = 128
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use stasis_core::{EffectId, EffectSpec, Tick};

use crate::error::{FreezeError, FreezeResult};

/// Settings of the freeze module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreezeConfig {
    /// Ticks between expiry sweeps.
    pub sweep_interval: Tick,
    /// Ticks between activation and the first sweep.
    pub sweep_delay: Tick,
    /// Status effect used to stop frozen entities from jumping.
    pub jump_effect: EffectSpec,
}

impl Default for FreezeConfig {
    fn default() -> Self {
        Self {
            sweep_interval: 1,
            sweep_delay: 0,
            jump_effect: EffectSpec::new(EffectId::new("no_jump"), 128),
        }
    }
}

impl FreezeConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on malformed TOML or invalid values.
    pub fn from_toml_str(source: &str) -> FreezeResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| FreezeError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read or is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> FreezeResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            FreezeError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first bad value.
    pub fn validate(&self) -> FreezeResult<()> {
        if self.sweep_interval == 0 {
            return Err(FreezeError::InvalidConfig(
                "sweep_interval must be at least 1 tick".to_string(),
            ));
        }
        if self.jump_effect.id.as_str().is_empty() {
            return Err(FreezeError::InvalidConfig(
                "jump_effect.id must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder-style interval override.
    #[must_use]
    pub fn with_sweep_interval(mut self, interval: Tick) -> Self {
        self.sweep_interval = interval;
        self
    }
}
