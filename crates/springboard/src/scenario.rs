//! Scenario constants and the five physical inputs.
//!
//! [`Scenario`] holds the parameters of the course itself (gravity and the
//! fixed track lengths); [`SimulationInputs`] holds what the user varies.
//! Both are plain serde structs so they can be loaded from a config file.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ensure_finite, ensure_non_negative, ensure_positive};
use crate::projectile::GRAVITY;

/// Default gravitational acceleration, in m/s².
pub const DEFAULT_GRAVITY: f64 = GRAVITY;

/// Default length of the frictional surface between the spring and the
/// foot of the ramp, in meters.
pub const DEFAULT_SURFACE_LENGTH: f64 = 15.0;

/// Default length of the ramp measured along its incline, in meters.
pub const DEFAULT_RAMP_LENGTH: f64 = 15.0;

/// Fixed parameters of the launch course.
///
/// Defaults:
/// - gravity `9.8 m/s²`
/// - surface length `15 m`
/// - ramp length `15 m`
///
/// # Example
///
/// ```rust
/// use springboard::Scenario;
///
/// let moon = Scenario::default().gravity(1.62).ramp_length(5.0);
/// assert_eq!(moon.surface_length, 15.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    /// Downward gravitational acceleration (m/s²).
    pub gravity: f64,
    /// Horizontal distance from the spring equilibrium to the ramp (m).
    pub surface_length: f64,
    /// Length of the ramp along the incline (m).
    pub ramp_length: f64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            surface_length: DEFAULT_SURFACE_LENGTH,
            ramp_length: DEFAULT_RAMP_LENGTH,
        }
    }
}

impl Scenario {
    /// Sets the gravitational acceleration.
    pub fn gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Sets the surface length.
    pub fn surface_length(mut self, length: f64) -> Self {
        self.surface_length = length;
        self
    }

    /// Sets the ramp length.
    pub fn ramp_length(mut self, length: f64) -> Self {
        self.ramp_length = length;
        self
    }

    /// Checks that every constant is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("gravity", self.gravity)?;
        ensure_non_negative("surface_length", self.surface_length)?;
        ensure_non_negative("ramp_length", self.ramp_length)?;
        Ok(())
    }
}

/// The five user-controlled physical inputs of a run.
///
/// The default is the reference scenario: a 1 kg block on a 100 N/m
/// spring compressed 0.5 m, a 30° ramp, and a frictionless track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationInputs {
    /// Block mass in kg, `> 0`.
    pub block_mass: f64,
    /// Spring constant in N/m, `> 0`.
    pub spring_constant: f64,
    /// Initial spring compression in m, `≥ 0`.
    pub compression_distance: f64,
    /// Ramp incline in degrees, `[0, 90)`.
    pub ramp_angle_degrees: f64,
    /// Coefficient of kinetic friction, `≥ 0`.
    pub friction_coefficient: f64,
}

impl Default for SimulationInputs {
    fn default() -> Self {
        Self {
            block_mass: 1.0,
            spring_constant: 100.0,
            compression_distance: 0.5,
            ramp_angle_degrees: 30.0,
            friction_coefficient: 0.0,
        }
    }
}

impl SimulationInputs {
    /// Creates inputs from the five physical quantities.
    pub const fn new(
        block_mass: f64,
        spring_constant: f64,
        compression_distance: f64,
        ramp_angle_degrees: f64,
        friction_coefficient: f64,
    ) -> Self {
        Self {
            block_mass,
            spring_constant,
            compression_distance,
            ramp_angle_degrees,
            friction_coefficient,
        }
    }

    /// Checks every input against its physical range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a non-positive mass or spring
    /// constant, a negative compression or friction coefficient, a ramp
    /// angle outside `[0, 90)`, or any non-finite value.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("block_mass", self.block_mass)?;
        ensure_positive("spring_constant", self.spring_constant)?;
        ensure_non_negative("compression_distance", self.compression_distance)?;
        ensure_non_negative("friction_coefficient", self.friction_coefficient)?;

        let angle = ensure_finite("ramp_angle_degrees", self.ramp_angle_degrees)?;
        if !(0.0..90.0).contains(&angle) {
            return Err(Error::invalid(
                "ramp_angle_degrees",
                angle,
                "must be in [0, 90)",
            ));
        }
        Ok(())
    }

    /// Ramp angle in radians.
    #[inline]
    pub fn ramp_angle_radians(&self) -> f64 {
        self.ramp_angle_degrees.to_radians()
    }
}
