//! Closed-form projectile motion for the airborne phase.
//!
//! Once the block leaves the top of the ramp only gravity acts on it:
//! horizontal velocity is constant and height follows
//! `y(t) = y₀ + vy·t - ½·g·t²`. No friction term exists here.

use crate::error::{Error, Result};
use crate::kinematics::{Point, Vector};

/// Gravitational acceleration used by the reference scenario, in m/s².
pub const GRAVITY: f64 = 9.8;

/// A projectile launched from `launch` with `velocity` under downward
/// gravity of magnitude `gravity`.
///
/// Unlike a frame-stepped integrator, every query is evaluated from the
/// launch instant, so sampling at any cadence never accumulates error.
///
/// # Example
///
/// ```rust
/// use springboard::{Point, Projectile, Vector, GRAVITY};
///
/// let p = Projectile::new(Point::new(0.0, 4.9), Vector::new(2.0, 0.0), GRAVITY);
/// let t = p.landing_time()?;
/// assert!((t - 1.0).abs() < 1e-12);
/// assert!((p.position_at(t).x - 2.0).abs() < 1e-12);
/// # Ok::<(), springboard::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    launch: Point,
    velocity: Vector,
    gravity: f64,
}

impl Projectile {
    /// Creates a projectile.
    #[inline]
    pub const fn new(launch: Point, velocity: Vector, gravity: f64) -> Self {
        Self {
            launch,
            velocity,
            gravity,
        }
    }

    /// Position `elapsed` seconds after launch.
    #[inline]
    pub fn position_at(&self, elapsed: f64) -> Point {
        Point::new(
            self.launch.x + self.velocity.x * elapsed,
            self.launch.y + self.velocity.y * elapsed - 0.5 * self.gravity * elapsed * elapsed,
        )
    }

    /// Velocity `elapsed` seconds after launch.
    #[inline]
    pub fn velocity_at(&self, elapsed: f64) -> Vector {
        Vector::new(self.velocity.x, self.velocity.y - self.gravity * elapsed)
    }

    /// Seconds from launch until the projectile reaches `y = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateMotion`] when the height equation has no
    /// unique non-negative root, e.g. with zero gravity and a level launch.
    pub fn landing_time(&self) -> Result<f64> {
        future_root(-0.5 * self.gravity, self.velocity.y, self.launch.y).ok_or_else(|| {
            Error::DegenerateMotion(format!(
                "no landing time for launch height {} m, vertical speed {} m/s, gravity {} m/s²",
                self.launch.y, self.velocity.y, self.gravity
            ))
        })
    }
}

/// Latest non-negative root of `a·t² + b·t + c = 0`.
///
/// With `a < 0` (gravity pulling down) this is `(-b - √(b² - 4ac)) / 2a`.
/// Returns `None` for a negative discriminant, a root in the past, or the
/// ill-posed `a = b = 0` case.
pub fn future_root(a: f64, b: f64, c: f64) -> Option<f64> {
    let root = if a == 0.0 {
        if b == 0.0 {
            return None;
        }
        -c / b
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt = discriminant.sqrt();
        let r1 = (-b - sqrt) / (2.0 * a);
        let r2 = (-b + sqrt) / (2.0 * a);
        r1.max(r2)
    };

    (root >= 0.0).then_some(root.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-10;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn test_future_root_picks_later_root() {
        // -t² + 3t - 2 = 0 → t = 1, 2
        assert!(approx_eq(future_root(-1.0, 3.0, -2.0).unwrap(), 2.0));
    }

    #[test]
    fn test_future_root_linear() {
        assert!(approx_eq(future_root(0.0, -2.0, 4.0).unwrap(), 2.0));
        assert_eq!(future_root(0.0, 2.0, 4.0), None);
        assert_eq!(future_root(0.0, 0.0, 0.0), None);
    }

    #[test]
    fn test_future_root_negative_discriminant() {
        assert_eq!(future_root(1.0, 0.0, 1.0), None);
    }

    #[test]
    fn test_landing_from_rest_at_ground() {
        let p = Projectile::new(Point::origin(), Vector::new(3.0, 0.0), GRAVITY);
        assert!(approx_eq(p.landing_time().unwrap(), 0.0));
    }

    #[test]
    fn test_landing_after_upward_launch() {
        let p = Projectile::new(Point::new(10.0, 2.0), Vector::new(4.0, 6.0), GRAVITY);
        let t = p.landing_time().unwrap();
        let landing = p.position_at(t);
        assert!(landing.y.abs() < 1e-9);
        assert!(p.velocity_at(t).y < 0.0);
        // apex is reached before landing
        assert!(t > 6.0 / GRAVITY);
        // impact speed matches energy conservation
        let expected = (6.0_f64.powi(2) + 2.0 * GRAVITY * 2.0).sqrt();
        assert!((p.velocity_at(t).y + expected).abs() < 1e-9);
    }

    #[test]
    fn test_horizontal_velocity_constant() {
        let p = Projectile::new(Point::new(1.0, 5.0), Vector::new(2.5, 1.0), GRAVITY);
        for i in 0..10 {
            assert!(approx_eq(p.velocity_at(f64::from(i) * 0.1).x, 2.5));
        }
    }

    #[test]
    fn test_zero_gravity_level_launch_is_degenerate() {
        let p = Projectile::new(Point::origin(), Vector::new(1.0, 0.0), 0.0);
        assert!(matches!(p.landing_time(), Err(Error::DegenerateMotion(_))));
    }

    #[test]
    fn test_zero_gravity_rising_launch_never_lands() {
        let p = Projectile::new(Point::new(0.0, 1.0), Vector::new(1.0, 1.0), 0.0);
        assert!(p.landing_time().is_err());
    }
}
