//! Phase boundaries and exit states for one set of inputs.
//!
//! [`Trajectory::recompute`] chains the four phases analytically. Each
//! phase takes the previous phase's exit velocity as its entry condition:
//!
//! ```text
//! spring ──A·ω──▶ surface ──v² = v₀² - 2μgD──▶ ramp ──v² = v₀² + 2aL──▶ air ──▶ landed
//! ```
//!
//! The result is an immutable cache. Callers recompute it when the inputs
//! change and evaluate it at as many times as they like.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::kinematics::{Motion1D, Point, Vector, exit_speed, traversal_time};
use crate::phase::{BoundaryTime, Phase};
use crate::projectile::Projectile;
use crate::scenario::{Scenario, SimulationInputs};
use crate::spring::SpringLaunch;

/// End times of the four moving phases, in seconds from release.
///
/// Boundaries never decrease, and once one is [`BoundaryTime::Never`]
/// every later one is too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseBoundaries {
    /// The block leaves the spring.
    pub spring_end: BoundaryTime,
    /// The block reaches the foot of the ramp.
    pub surface_end: BoundaryTime,
    /// The block leaves the top of the ramp.
    pub ramp_end: BoundaryTime,
    /// The block hits the ground.
    pub air_end: BoundaryTime,
}

impl PhaseBoundaries {
    /// When `phase` ends. [`Phase::Landed`] never ends.
    pub const fn end_of(&self, phase: Phase) -> BoundaryTime {
        match phase {
            Phase::Spring => self.spring_end,
            Phase::Surface => self.surface_end,
            Phase::Ramp => self.ramp_end,
            Phase::Air => self.air_end,
            Phase::Landed => BoundaryTime::Never,
        }
    }

    /// When `phase` begins.
    pub const fn start_of(&self, phase: Phase) -> BoundaryTime {
        match phase {
            Phase::Spring => BoundaryTime::At(0.0),
            Phase::Surface => self.spring_end,
            Phase::Ramp => self.surface_end,
            Phase::Air => self.ramp_end,
            Phase::Landed => self.air_end,
        }
    }

    /// The phase active at time `t`.
    pub fn phase_at(&self, t: f64) -> Phase {
        if !self.spring_end.is_reached_by(t) {
            Phase::Spring
        } else if !self.surface_end.is_reached_by(t) {
            Phase::Surface
        } else if !self.ramp_end.is_reached_by(t) {
            Phase::Ramp
        } else if !self.air_end.is_reached_by(t) {
            Phase::Air
        } else {
            Phase::Landed
        }
    }
}

/// Position and velocity of the block at a phase boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExitState {
    /// Position at the boundary.
    pub position: Point,
    /// Velocity at the boundary.
    pub velocity: Vector,
}

impl ExitState {
    /// Creates an exit state.
    pub const fn new(position: Point, velocity: Vector) -> Self {
        Self { position, velocity }
    }

    /// Speed at the boundary.
    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }
}

/// Exit states for each boundary the block actually reaches.
///
/// A boundary that is never reached has no exit state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseExitStates {
    /// Leaving the spring at its natural length.
    pub from_spring: ExitState,
    /// Arriving at the foot of the ramp, still moving horizontally.
    pub from_surface: Option<ExitState>,
    /// At the foot of the ramp, velocity redirected along the incline.
    pub on_entering_ramp: Option<ExitState>,
    /// Leaving the top of the ramp.
    pub from_ramp: Option<ExitState>,
    /// Hitting the ground.
    pub on_landing: Option<ExitState>,
}

/// Where and in which phase a stalled block comes to rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopPoint {
    /// The phase the block stays in forever.
    pub phase: Phase,
    /// Resting position.
    pub position: Point,
}

/// Cached boundary data for one run.
///
/// # Example
///
/// ```rust
/// use springboard::{Phase, Scenario, SimulationInputs, Trajectory};
///
/// let trajectory = Trajectory::recompute(SimulationInputs::default(), Scenario::default())?;
/// let snapshot = trajectory.evaluate(0.1)?;
/// assert_eq!(snapshot.block.phase, Phase::Spring);
/// # Ok::<(), springboard::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub(crate) inputs: SimulationInputs,
    pub(crate) scenario: Scenario,
    pub(crate) spring: SpringLaunch,
    pub(crate) surface: Motion1D,
    pub(crate) ramp: Motion1D,
    pub(crate) ramp_direction: Vector,
    pub(crate) boundaries: PhaseBoundaries,
    pub(crate) exits: PhaseExitStates,
    pub(crate) stop: Option<StopPoint>,
}

impl Trajectory {
    /// Validates the inputs and derives every boundary time and exit state.
    ///
    /// A block that stops on the surface or ramp is not an error: the
    /// remaining boundaries are [`BoundaryTime::Never`].
    ///
    /// With a level ramp (angle 0) the block leaves the track at ground
    /// height, so the air hop lasts zero time and the landing velocity is
    /// the horizontal surface velocity (`vy == 0`). Every inclined ramp
    /// lands moving down.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) for
    /// out-of-range inputs or scenario constants, and
    /// [`Error::DegenerateMotion`](crate::Error::DegenerateMotion) if the
    /// block leaves the ramp but no landing time exists.
    pub fn recompute(inputs: SimulationInputs, scenario: Scenario) -> Result<Self> {
        inputs.validate()?;
        scenario.validate()?;

        let gravity = scenario.gravity;
        let mu = inputs.friction_coefficient;
        let (sin, cos) = inputs.ramp_angle_radians().sin_cos();

        // Spring: a quarter cycle of SHM ending at equilibrium.
        let spring = SpringLaunch::new(
            inputs.block_mass,
            inputs.spring_constant,
            inputs.compression_distance,
        )?;
        let contact = spring.contact_duration();
        let spring_end = BoundaryTime::At(contact);
        let from_spring = ExitState::new(
            Point::new(spring.position_at(contact), 0.0),
            Vector::new(spring.velocity_at(contact), 0.0),
        );
        let launch_speed = from_spring.velocity.x;

        // Surface: flat, kinetic friction only.
        let surface_length = scenario.surface_length;
        let surface_accel = -mu * gravity;
        let surface = Motion1D::new(launch_speed, surface_accel);
        let surface_speed = exit_speed(launch_speed, surface_accel, surface_length);
        let surface_end = spring_end.then(traversal_time(
            launch_speed,
            surface_speed,
            surface_accel,
            surface_length,
        ));
        let ramp_foot = from_spring.position + Vector::new(surface_length, 0.0);
        let from_surface = surface_end
            .at()
            .map(|_| ExitState::new(ramp_foot, Vector::new(surface_speed, 0.0)));

        // Ramp: gravity and friction both act down the slope while the
        // block slides up. A level ramp has no length.
        let ramp_direction = Vector::from_angle_degrees(inputs.ramp_angle_degrees);
        let ramp_length = if inputs.ramp_angle_degrees > 0.0 {
            scenario.ramp_length
        } else {
            0.0
        };
        let ramp_accel = -gravity * sin - mu * gravity * cos;
        let ramp = Motion1D::new(surface_speed, ramp_accel);
        let ramp_speed = exit_speed(surface_speed, ramp_accel, ramp_length);
        let ramp_end = surface_end.then(traversal_time(
            surface_speed,
            ramp_speed,
            ramp_accel,
            ramp_length,
        ));
        let on_entering_ramp =
            from_surface.map(|exit| ExitState::new(exit.position, ramp_direction * surface_speed));
        let ramp_top = ramp_foot + ramp_direction * ramp_length;
        let from_ramp = ramp_end
            .at()
            .map(|_| ExitState::new(ramp_top, ramp_direction * ramp_speed));

        // Air: projectile from the ramp top until y = 0.
        let (air_end, on_landing) = match from_ramp {
            Some(top) => {
                let flight = Projectile::new(top.position, top.velocity, gravity);
                let landing_time = flight.landing_time()?;
                let mut landing = flight.position_at(landing_time);
                landing.y = 0.0;
                (
                    ramp_end.then(Some(landing_time)),
                    Some(ExitState::new(landing, flight.velocity_at(landing_time))),
                )
            }
            None => (BoundaryTime::Never, None),
        };

        let stop = if surface_end.is_never() {
            let distance = surface.stop_distance().unwrap_or(0.0);
            Some(StopPoint {
                phase: Phase::Surface,
                position: from_spring.position + Vector::new(distance, 0.0),
            })
        } else if ramp_end.is_never() {
            let distance = ramp.stop_distance().unwrap_or(0.0);
            Some(StopPoint {
                phase: Phase::Ramp,
                position: ramp_foot + ramp_direction * distance,
            })
        } else {
            None
        };

        let boundaries = PhaseBoundaries {
            spring_end,
            surface_end,
            ramp_end,
            air_end,
        };

        debug!(
            omega = spring.angular_frequency(),
            contact_duration = contact,
            spring_end = %boundaries.spring_end,
            surface_end = %boundaries.surface_end,
            ramp_end = %boundaries.ramp_end,
            air_end = %boundaries.air_end,
            "recomputed phase boundaries"
        );
        if let Some(stop) = stop {
            debug!(
                phase = %stop.phase,
                x = stop.position.x,
                y = stop.position.y,
                "block comes to rest before landing"
            );
        }

        Ok(Self {
            inputs,
            scenario,
            spring,
            surface,
            ramp,
            ramp_direction,
            boundaries,
            exits: PhaseExitStates {
                from_spring,
                from_surface,
                on_entering_ramp,
                from_ramp,
                on_landing,
            },
            stop,
        })
    }

    /// The inputs this trajectory was computed from.
    pub const fn inputs(&self) -> &SimulationInputs {
        &self.inputs
    }

    /// The scenario constants this trajectory was computed with.
    pub const fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Spring-phase parameters.
    pub const fn spring(&self) -> &SpringLaunch {
        &self.spring
    }

    /// Boundary times.
    pub const fn boundaries(&self) -> &PhaseBoundaries {
        &self.boundaries
    }

    /// Exit states.
    pub const fn exit_states(&self) -> &PhaseExitStates {
        &self.exits
    }

    /// Where the block comes to rest, if it stalls before leaving the ramp.
    pub const fn stop_point(&self) -> Option<StopPoint> {
        self.stop
    }

    /// Where the block hits the ground, if it ever does.
    pub fn landing_point(&self) -> Option<Point> {
        self.exits.on_landing.map(|exit| exit.position)
    }

    /// Time from release to landing; [`BoundaryTime::Never`] if it stalls.
    pub const fn total_duration(&self) -> BoundaryTime {
        self.boundaries.air_end
    }

    /// The phase active at time `t`.
    pub fn phase_at(&self, t: f64) -> Phase {
        self.boundaries.phase_at(t)
    }
}
