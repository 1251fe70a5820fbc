//! Command-line interface for `springboard`.
//!
//! Every physical input can come from a flag, a `SPRINGBOARD_*`
//! environment variable, or the `[inputs]`/`[scenario]` tables of a TOML
//! config file, in that order of precedence.
//!
//! # Examples
//!
//! ```bash
//! # State of the reference run one second after release
//! springboard state --time 1
//!
//! # Boundary times for a stiffer spring on a rough track
//! springboard phases --spring-constant 1000 --compression 1 --friction 0.2
//!
//! # JSON lines at 60 fps until landing
//! springboard trace --fps 60 --format json --spring-constant 1000 --compression 1
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Spring-launched block simulator.
///
/// Computes the closed-form trajectory of a block released from a
/// compressed spring, across a surface and up a ramp into the air.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "springboard",
    author,
    version,
    about = "Closed-form kinematics for a spring-launched block",
    long_about = "Computes the trajectory of a block launched by a compressed spring \
                  across a frictional surface, up a ramp, and through the air."
)]
pub struct Cli {
    /// Physical inputs and course constants
    #[command(flatten)]
    pub physics: PhysicsArgs,

    /// Path to a TOML config file with [inputs] and [scenario] tables
    #[arg(long, short = 'c', global = true, env = "SPRINGBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// What to compute
    #[command(subcommand)]
    pub command: Command,
}

/// Overrides for the physical inputs and course constants.
///
/// Anything left unset falls back to the config file, then to the
/// reference scenario.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct PhysicsArgs {
    /// Block mass (kg)
    #[arg(long, global = true, env = "SPRINGBOARD_MASS")]
    pub mass: Option<f64>,

    /// Spring constant (N/m)
    #[arg(long, short = 'k', global = true, env = "SPRINGBOARD_SPRING_CONSTANT")]
    pub spring_constant: Option<f64>,

    /// Initial spring compression (m)
    #[arg(long, global = true, env = "SPRINGBOARD_COMPRESSION")]
    pub compression: Option<f64>,

    /// Ramp angle (degrees, 0 to below 90)
    #[arg(long, global = true, env = "SPRINGBOARD_ANGLE")]
    pub angle: Option<f64>,

    /// Coefficient of kinetic friction
    #[arg(long, short = 'u', global = true, env = "SPRINGBOARD_FRICTION")]
    pub friction: Option<f64>,

    /// Gravitational acceleration (m/s²)
    #[arg(long, global = true, env = "SPRINGBOARD_GRAVITY")]
    pub gravity: Option<f64>,

    /// Length of the flat surface before the ramp (m)
    #[arg(long, global = true, env = "SPRINGBOARD_SURFACE_LENGTH")]
    pub surface_length: Option<f64>,

    /// Length of the ramp along its incline (m)
    #[arg(long, global = true, env = "SPRINGBOARD_RAMP_LENGTH")]
    pub ramp_length: Option<f64>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the block, force, and energy state at one instant
    State(StateArgs),

    /// Print the phase boundary times and exit states
    Phases(PhasesArgs),

    /// Print sampled states from release until landing
    Trace(TraceArgs),
}

/// Arguments for the `state` subcommand.
#[derive(Args, Debug, Clone)]
pub struct StateArgs {
    /// Seconds since release
    #[arg(long, short = 't', allow_negative_numbers = true)]
    pub time: f64,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Arguments for the `phases` subcommand.
#[derive(Args, Debug, Clone)]
pub struct PhasesArgs {
    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Arguments for the `trace` subcommand.
#[derive(Args, Debug, Clone)]
pub struct TraceArgs {
    /// Samples per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Stop sampling at this time instead of at landing
    ///
    /// Required when the block comes to rest before landing
    #[arg(long, allow_negative_numbers = true)]
    pub until: Option<f64>,

    /// Output format (json prints one object per line)
    #[arg(long, short = 'f', value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Output formats.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    #[cfg(test)]
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Get log level based on verbosity.
    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        match self.verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Log level for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Only show warnings and errors
    Warn,
    /// Show info messages
    Info,
    /// Show debug messages
    Debug,
    /// Show all messages including trace
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}
