//! Instantaneous block, force, and energy state at a query time.
//!
//! Evaluation always starts from the cached boundaries and the absolute
//! query time. Nothing is carried from one query to the next.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Result, ensure_non_negative};
use crate::kinematics::{Point, Vector};
use crate::phase::Phase;
use crate::projectile::Projectile;
use crate::trajectory::{ExitState, Trajectory};

/// Kinematic state of the block at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockState {
    /// Position of the block (m).
    pub position: Point,
    /// Velocity of the block (m/s).
    pub velocity: Vector,
    /// Magnitude of `velocity`.
    pub net_speed: f64,
    /// Incline the block rides, in degrees: the ramp angle on the ramp,
    /// otherwise zero.
    pub angle_of_motion: f64,
    /// Current phase.
    pub phase: Phase,
    /// How far the spring is still compressed (m, ≥ 0).
    pub spring_displacement: f64,
    /// Whether the block has stopped for good on the track.
    pub at_rest: bool,
}

/// Forces acting on the block, as magnitudes (N) and unit directions.
///
/// A force that is absent has zero magnitude and a zero direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceState {
    /// Weight, `m·g`.
    pub gravity: f64,
    /// Normal force from the floor or ramp.
    pub normal: f64,
    /// Spring restoring force, `k·|x|` while compressed.
    pub spring: f64,
    /// Friction, `μ·normal` on the surface and ramp.
    pub friction: f64,
    /// Direction of `gravity`.
    pub gravity_direction: Vector,
    /// Direction of `normal`.
    pub normal_direction: Vector,
    /// Direction of `spring`.
    pub spring_direction: Vector,
    /// Direction of `friction`.
    pub friction_direction: Vector,
}

/// Energy bookkeeping at one instant, in joules.
///
/// The four time-varying terms always sum to `max_system_energy`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyState {
    /// Energy stored in the spring at release, `½·k·A²`.
    pub max_system_energy: f64,
    /// Energy still stored in the spring.
    pub spring_pe: f64,
    /// Kinetic energy of the block.
    pub block_ke: f64,
    /// Gravitational potential energy above the floor.
    pub block_pe: f64,
    /// Work done against friction so far.
    pub lost_to_friction: f64,
}

impl EnergyState {
    /// Sum of the four tracked terms.
    pub fn total(&self) -> f64 {
        self.spring_pe + self.block_ke + self.block_pe + self.lost_to_friction
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Query time (s).
    pub time: f64,
    /// Block kinematics.
    pub block: BlockState,
    /// Forces on the block.
    pub forces: ForceState,
    /// Energy breakdown.
    pub energy: EnergyState,
}

/// Phase-local view of a query time.
enum Segment {
    Spring { elapsed: f64 },
    Surface { elapsed: f64 },
    Ramp { entry: ExitState, elapsed: f64 },
    Air { top: ExitState, elapsed: f64 },
    Landed(ExitState),
}

impl Trajectory {
    /// Evaluates the block, forces, and energy at time `t`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) if `t`
    /// is negative or not finite.
    pub fn evaluate(&self, t: f64) -> Result<Snapshot> {
        let t = ensure_non_negative("time", t)?;
        Ok(self.snapshot_at(t))
    }

    /// Evaluates at a time already known to be valid.
    pub(crate) fn snapshot_at(&self, t: f64) -> Snapshot {
        let block = self.block_state(t);
        let forces = self.forces(&block);
        let energy = self.energy(&block);
        trace!(t, phase = %block.phase, x = block.position.x, y = block.position.y, "evaluated");
        Snapshot {
            time: t,
            block,
            forces,
            energy,
        }
    }

    /// Finds the active phase and the time elapsed inside it.
    ///
    /// A phase is entered only when its start boundary is reached and the
    /// exit state of the previous phase exists.
    fn locate(&self, t: f64) -> Segment {
        let b = &self.boundaries;
        let e = &self.exits;

        let Some(spring_end) = b.spring_end.at().filter(|end| t >= *end) else {
            return Segment::Spring { elapsed: t };
        };
        let (Some(surface_end), Some(entry)) =
            (b.surface_end.at().filter(|end| t >= *end), e.on_entering_ramp)
        else {
            return Segment::Surface {
                elapsed: t - spring_end,
            };
        };
        let (Some(ramp_end), Some(top)) = (b.ramp_end.at().filter(|end| t >= *end), e.from_ramp)
        else {
            return Segment::Ramp {
                entry,
                elapsed: t - surface_end,
            };
        };
        match (b.air_end.at().filter(|end| t >= *end), e.on_landing) {
            (Some(_), Some(landing)) => Segment::Landed(landing),
            _ => Segment::Air {
                top,
                elapsed: t - ramp_end,
            },
        }
    }

    fn block_state(&self, t: f64) -> BlockState {
        let (phase, position, velocity, angle_of_motion, at_rest) = match self.locate(t) {
            Segment::Spring { elapsed } => (
                Phase::Spring,
                Point::new(self.spring.position_at(elapsed), 0.0),
                Vector::new(self.spring.velocity_at(elapsed), 0.0),
                0.0,
                self.spring.compression() == 0.0,
            ),
            Segment::Surface { elapsed } => (
                Phase::Surface,
                self.exits.from_spring.position
                    + Vector::new(self.surface.distance_at(elapsed), 0.0),
                Vector::new(self.surface.speed_at(elapsed), 0.0),
                0.0,
                self.surface.is_stopped_at(elapsed),
            ),
            Segment::Ramp { entry, elapsed } => (
                Phase::Ramp,
                entry.position + self.ramp_direction * self.ramp.distance_at(elapsed),
                self.ramp_direction * self.ramp.speed_at(elapsed),
                self.inputs.ramp_angle_degrees,
                self.ramp.is_stopped_at(elapsed),
            ),
            Segment::Air { top, elapsed } => {
                let flight = Projectile::new(top.position, top.velocity, self.scenario.gravity);
                (
                    Phase::Air,
                    flight.position_at(elapsed),
                    flight.velocity_at(elapsed),
                    0.0,
                    false,
                )
            }
            Segment::Landed(landing) => (
                Phase::Landed,
                landing.position,
                landing.velocity,
                0.0,
                false,
            ),
        };

        BlockState {
            position,
            velocity,
            net_speed: velocity.magnitude(),
            angle_of_motion,
            phase,
            spring_displacement: -position.x.min(0.0),
            at_rest,
        }
    }

    fn forces(&self, block: &BlockState) -> ForceState {
        let mass = self.inputs.block_mass;
        let gravity = mass * self.scenario.gravity;
        let incline = Vector::from_angle_degrees(block.angle_of_motion);

        let (normal, normal_direction) = if block.phase.has_contact() {
            (gravity * incline.x, Vector::new(-incline.y, incline.x))
        } else {
            (0.0, Vector::zero())
        };

        let spring = self.inputs.spring_constant * block.spring_displacement;
        let spring_direction = if spring > 0.0 {
            Vector::new(1.0, 0.0)
        } else {
            Vector::zero()
        };

        let friction = if block.phase.has_friction() {
            self.inputs.friction_coefficient * normal
        } else {
            0.0
        };
        // Opposes motion; a block at rest on the ramp is held up-slope.
        let friction_direction = if friction == 0.0 {
            Vector::zero()
        } else if !block.at_rest {
            -block.velocity.normalized()
        } else if block.phase == Phase::Ramp {
            incline
        } else {
            -incline
        };

        ForceState {
            gravity,
            normal,
            spring,
            friction,
            gravity_direction: Vector::new(0.0, -1.0),
            normal_direction,
            spring_direction,
            friction_direction,
        }
    }

    fn energy(&self, block: &BlockState) -> EnergyState {
        let k = self.inputs.spring_constant;
        let mass = self.inputs.block_mass;
        let compression = self.inputs.compression_distance;

        let max_system_energy = 0.5 * k * compression * compression;
        let spring_pe = 0.5 * k * block.spring_displacement * block.spring_displacement;
        let block_ke = 0.5 * mass * block.net_speed * block.net_speed;
        let block_pe = mass * self.scenario.gravity * block.position.y;

        EnergyState {
            max_system_energy,
            spring_pe,
            block_ke,
            block_pe,
            lost_to_friction: max_system_energy - (spring_pe + block_ke + block_pe),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::scenario::{Scenario, SimulationInputs};
    use core::f64::consts::PI;

    const TOLERANCE: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn trajectory(inputs: SimulationInputs) -> Trajectory {
        Trajectory::recompute(inputs, Scenario::default()).unwrap()
    }

    #[test]
    fn test_release_instant() {
        let s = trajectory(SimulationInputs::default()).evaluate(0.0).unwrap();
        assert_eq!(s.block.phase, Phase::Spring);
        assert!(approx_eq(s.block.position.x, -0.5));
        assert!(approx_eq(s.block.net_speed, 0.0));
        assert!(approx_eq(s.block.spring_displacement, 0.5));
        assert!(approx_eq(s.forces.spring, 50.0));
        assert!(approx_eq(s.energy.spring_pe, 12.5));
        assert!(approx_eq(s.energy.max_system_energy, 12.5));
    }

    #[test]
    fn test_negative_time_rejected() {
        let t = trajectory(SimulationInputs::default());
        assert!(matches!(
            t.evaluate(-0.001),
            Err(Error::InvalidInput { field: "time", .. })
        ));
        assert!(t.evaluate(f64::NAN).is_err());
    }

    #[test]
    fn test_surface_motion_without_friction() {
        let t = trajectory(SimulationInputs::default());
        let s = t.evaluate(PI / 20.0 + 1.0).unwrap();
        assert_eq!(s.block.phase, Phase::Surface);
        assert!(approx_eq(s.block.position.x, 5.0));
        assert!(approx_eq(s.block.velocity.x, 5.0));
        assert!(approx_eq(s.forces.normal, 9.8));
        assert!(approx_eq(s.forces.friction, 0.0));
        assert!(approx_eq(s.forces.spring, 0.0));
    }

    #[test]
    fn test_kinetic_friction_opposes_motion() {
        let inputs = SimulationInputs::new(2.0, 800.0, 0.5, 30.0, 0.1);
        let t = trajectory(inputs);
        let s = t.evaluate(t.boundaries().spring_end.as_secs() + 0.5).unwrap();
        assert_eq!(s.block.phase, Phase::Surface);
        assert!(approx_eq(s.forces.friction, 0.1 * 2.0 * 9.8));
        assert!(approx_eq(s.forces.friction_direction.x, -1.0));
        assert!(s.energy.lost_to_friction > 0.0);
    }

    #[test]
    fn test_ramp_state_follows_incline() {
        let t = trajectory(SimulationInputs::default());
        let start = t.boundaries().surface_end.as_secs();
        let s = t.evaluate(start + 0.2).unwrap();
        assert_eq!(s.block.phase, Phase::Ramp);
        assert!(approx_eq(s.block.angle_of_motion, 30.0));
        assert!(approx_eq(s.block.velocity.y / s.block.velocity.x, (PI / 6.0).tan()));
        assert!(approx_eq(s.forces.normal, 9.8 * (PI / 6.0).cos()));
        // v = 5 - 4.9·0.2
        assert!(approx_eq(s.block.net_speed, 5.0 - 4.9 * 0.2));
    }

    #[test]
    fn test_stalled_on_ramp_holds_position() {
        let t = trajectory(SimulationInputs::default());
        let stop = t.stop_point().unwrap();
        let s = t.evaluate(1_000.0).unwrap();
        assert_eq!(s.block.phase, Phase::Ramp);
        assert!(s.block.at_rest);
        assert!(approx_eq(s.block.position.x, stop.position.x));
        assert!(approx_eq(s.block.position.y, stop.position.y));
        assert!(approx_eq(s.block.net_speed, 0.0));
        // frictionless track: no friction even at rest
        assert_eq!(s.forces.friction, 0.0);
        assert_eq!(s.forces.friction_direction, Vector::zero());
        // frictionless track: all energy is now potential
        assert!(approx_eq(s.energy.block_pe, 12.5));
        assert!(approx_eq(s.energy.lost_to_friction, 0.0));
    }

    #[test]
    fn test_ramp_friction_while_sliding() {
        let inputs = SimulationInputs::new(1.0, 1000.0, 1.0, 30.0, 0.1);
        let t = trajectory(inputs);
        let start = t.boundaries().surface_end.as_secs();
        let s = t.evaluate(start + 0.1).unwrap();
        assert_eq!(s.block.phase, Phase::Ramp);
        assert!(!s.block.at_rest);
        assert!(approx_eq(s.forces.friction, 0.1 * s.forces.normal));
        assert!(approx_eq(s.forces.friction, 0.1 * 9.8 * (PI / 6.0).cos()));
        // points down-slope against the climb
        assert!(approx_eq(s.forces.friction_direction.x, -(PI / 6.0).cos()));
        assert!(approx_eq(s.forces.friction_direction.y, -0.5));
    }

    #[test]
    fn test_ramp_stall_with_friction_holds_up_slope() {
        let inputs = SimulationInputs::new(1.0, 100.0, 0.5, 30.0, 0.05);
        let t = trajectory(inputs);
        assert_eq!(t.stop_point().unwrap().phase, Phase::Ramp);
        let s = t.evaluate(1_000.0).unwrap();
        assert!(s.block.at_rest);
        assert!(approx_eq(s.forces.friction, 0.05 * s.forces.normal));
        assert!(approx_eq(s.forces.friction_direction.x, (PI / 6.0).cos()));
        assert!(approx_eq(s.forces.friction_direction.y, 0.5));
    }

    #[test]
    fn test_air_and_landing() {
        let inputs = SimulationInputs::new(1.0, 1000.0, 1.0, 30.0, 0.0);
        let t = trajectory(inputs);
        let ramp_end = t.boundaries().ramp_end.as_secs();
        let air_end = t.boundaries().air_end.as_secs();

        let mid = t.evaluate(0.5 * (ramp_end + air_end)).unwrap();
        assert_eq!(mid.block.phase, Phase::Air);
        assert!(approx_eq(mid.forces.normal, 0.0));
        assert!(approx_eq(mid.forces.friction, 0.0));
        assert!(mid.block.position.y > 0.0);

        let landed = t.evaluate(air_end).unwrap();
        assert_eq!(landed.block.phase, Phase::Landed);
        assert_eq!(landed.block.position.y, 0.0);
        assert!(landed.block.velocity.y < 0.0);

        let later = t.evaluate(air_end + 100.0).unwrap();
        assert_eq!(later.block, landed.block);
    }

    #[test]
    fn test_energy_identity_holds() {
        let inputs = SimulationInputs::new(1.5, 900.0, 0.8, 25.0, 0.15);
        let t = trajectory(inputs);
        for i in 0..200 {
            let s = t.evaluate(f64::from(i) * 0.05).unwrap();
            assert!(
                (s.energy.total() - s.energy.max_system_energy).abs() < 1e-6,
                "identity broken at t={}",
                s.time
            );
            assert!(s.energy.lost_to_friction > -1e-6);
        }
    }
}
