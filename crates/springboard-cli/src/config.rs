//! Run configuration for the `springboard` binary.
//!
//! [`RunConfig`] is the resolved set of physical inputs and course
//! constants, independent of where each value came from. Resolution order
//! for every field:
//!
//! 1. command-line flag
//! 2. `SPRINGBOARD_*` environment variable (folded into the flag by clap)
//! 3. the `--config` TOML file
//! 4. the reference scenario
//!
//! A config file may set any subset of fields:
//!
//! ```toml
//! [inputs]
//! block_mass = 2.0
//! spring_constant = 800.0
//!
//! [scenario]
//! gravity = 1.62
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use springboard::{Scenario, SimulationInputs};
use tracing::debug;

use crate::cli::{Cli, PhysicsArgs};

/// Contents of a TOML config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Course constants.
    pub scenario: Scenario,
    /// Physical inputs.
    pub inputs: SimulationInputs,
}

impl ConfigFile {
    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(file)
    }

    /// Parses config file contents.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed input or unknown keys.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Fully resolved inputs for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Course constants.
    pub scenario: Scenario,
    /// Physical inputs.
    pub inputs: SimulationInputs,
}

impl RunConfig {
    /// Resolves the configuration for a parsed command line.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `--config` names a file that cannot be
    /// loaded.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let file = cli.config.as_deref().map(ConfigFile::load).transpose()?;
        Ok(Self::resolve(&cli.physics, file.unwrap_or_default()))
    }

    /// Layers flag overrides on top of a config file.
    pub fn resolve(args: &PhysicsArgs, file: ConfigFile) -> Self {
        let base = file.inputs;
        let inputs = SimulationInputs {
            block_mass: args.mass.unwrap_or(base.block_mass),
            spring_constant: args.spring_constant.unwrap_or(base.spring_constant),
            compression_distance: args.compression.unwrap_or(base.compression_distance),
            ramp_angle_degrees: args.angle.unwrap_or(base.ramp_angle_degrees),
            friction_coefficient: args.friction.unwrap_or(base.friction_coefficient),
        };

        let base = file.scenario;
        let scenario = Scenario {
            gravity: args.gravity.unwrap_or(base.gravity),
            surface_length: args.surface_length.unwrap_or(base.surface_length),
            ramp_length: args.ramp_length.unwrap_or(base.ramp_length),
        };

        Self { scenario, inputs }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config file {}", .path.display())]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("invalid config file {}", .path.display())]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}
