#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::use_self)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]

//! # Springboard
//!
//! Closed-form kinematics for a block launched by a compressed spring.
//!
//! The block passes through five phases, each exactly once:
//!
//! 1. **Spring**: a quarter cycle of simple harmonic motion
//! 2. **Surface**: sliding across a flat surface with kinetic friction
//! 3. **Ramp**: climbing an incline against gravity and friction
//! 4. **Air**: projectile motion from the top of the ramp
//! 5. **Landed**: frozen at the moment of impact
//!
//! No step-by-step integration happens anywhere. [`Trajectory::recompute`]
//! derives every phase boundary analytically, and
//! [`Trajectory::evaluate`] jumps straight to any query time.
//!
//! ## Example
//!
//! ```rust
//! use springboard::{Phase, Scenario, SimulationInputs, Trajectory};
//!
//! // 1 kg block, 100 N/m spring compressed 0.5 m, 30° ramp, no friction
//! let inputs = SimulationInputs::new(1.0, 100.0, 0.5, 30.0, 0.0);
//! let trajectory = Trajectory::recompute(inputs, Scenario::default())?;
//!
//! let launch = trajectory.spring();
//! assert!((launch.angular_frequency() - 10.0).abs() < 1e-12);
//! assert!((launch.launch_speed() - 5.0).abs() < 1e-12);
//!
//! let snapshot = trajectory.evaluate(1.0)?;
//! assert_eq!(snapshot.block.phase, Phase::Surface);
//! assert!((snapshot.block.net_speed - 5.0).abs() < 1e-12);
//! # Ok::<(), springboard::Error>(())
//! ```
//!
//! ## Stalling
//!
//! Friction or the slope may stop the block before it leaves the ramp.
//! That is a normal outcome: the boundaries it never reaches are
//! [`BoundaryTime::Never`] and the block stays where it stopped.

mod error;
mod kinematics;
mod phase;
mod projectile;
mod scenario;
mod spring;
mod state;
mod timeline;
mod trajectory;

pub use error::{Error, Result};
pub use kinematics::{Motion1D, Point, Vector, exit_speed, traversal_time};
pub use phase::{BoundaryTime, Phase};
pub use projectile::{GRAVITY, Projectile, future_root};
pub use scenario::{
    DEFAULT_GRAVITY, DEFAULT_RAMP_LENGTH, DEFAULT_SURFACE_LENGTH, Scenario, SimulationInputs,
};
pub use spring::SpringLaunch;
pub use state::{BlockState, EnergyState, ForceState, Snapshot};
pub use timeline::{Timeline, fps};
pub use trajectory::{ExitState, PhaseBoundaries, PhaseExitStates, StopPoint, Trajectory};

/// Derives the boundary cache for `inputs` under `scenario`.
///
/// Shorthand for [`Trajectory::recompute`].
///
/// # Errors
///
/// See [`Trajectory::recompute`].
pub fn recompute(inputs: SimulationInputs, scenario: Scenario) -> Result<Trajectory> {
    Trajectory::recompute(inputs, scenario)
}

/// Evaluates a cached trajectory at time `t`.
///
/// Shorthand for [`Trajectory::evaluate`].
///
/// # Errors
///
/// See [`Trajectory::evaluate`].
pub fn evaluate(trajectory: &Trajectory, t: f64) -> Result<Snapshot> {
    trajectory.evaluate(t)
}
