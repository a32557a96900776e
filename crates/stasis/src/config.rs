//! # Simulation Configuration
//!
//! ```toml
//! tick_rate = 20
//! event_capacity = 1024
//! reset_speeds_on_join = true
//!
//! [freeze]
//! sweep_interval = 1
//!
//! [freeze.jump_effect]
//! id = "no_jump"
//! amplifier = 128
//! ```
//!
//! Every field is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};
use stasis_core::tick::DEFAULT_TICK_RATE;
use stasis_freeze::FreezeConfig;

use crate::error::{SimulationError, SimulationResult};

/// Host settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Ticks per second.
    pub tick_rate: u32,
    /// Most host events queued between two ticks.
    pub event_capacity: usize,
    /// Hand joining entities stock motion attributes, undoing anything a
    /// crashed session left behind.
    pub reset_speeds_on_join: bool,
    /// Freeze module settings.
    pub freeze: FreezeConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            event_capacity: 1024,
            reset_speeds_on_join: true,
            freeze: FreezeConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `Parse` on malformed TOML, `InvalidConfig` or `Freeze` on bad
    /// values.
    pub fn from_toml_str(source: &str) -> SimulationResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, otherwise as
    /// [`SimulationConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> SimulationResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| SimulationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks value ranges, including the nested freeze settings.
    ///
    /// # Errors
    ///
    /// Returns the first bad value found.
    pub fn validate(&self) -> SimulationResult<()> {
        if self.tick_rate == 0 {
            return Err(SimulationError::InvalidConfig(
                "tick_rate must be at least 1".to_string(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(SimulationError::InvalidConfig(
                "event_capacity must be at least 1".to_string(),
            ));
        }
        self.freeze.validate()?;
        Ok(())
    }
}
