//! Spring launch as a quarter cycle of undamped simple harmonic motion.
//!
//! The block starts at rest at maximum compression (`x = -A`) and
//! separates from the spring when the spring reaches its natural length,
//! which happens exactly one quarter period later:
//!
//! ```text
//! x(t)  = -A·cos(ω·t)
//! vx(t) =  A·ω·sin(ω·t)
//! ω     =  √(k / m)
//! ```

use core::f64::consts::TAU;

use crate::error::{Result, ensure_non_negative, ensure_positive};

/// Precomputed spring parameters for one launch.
///
/// # Example
///
/// ```rust
/// use springboard::SpringLaunch;
///
/// let spring = SpringLaunch::new(1.0, 100.0, 0.5)?;
/// assert!((spring.angular_frequency() - 10.0).abs() < 1e-12);
/// assert!((spring.launch_speed() - 5.0).abs() < 1e-12);
/// # Ok::<(), springboard::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringLaunch {
    angular_frequency: f64,
    compression: f64,
}

impl SpringLaunch {
    /// Derives the launch from mass, spring constant, and compression.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) if the
    /// mass or spring constant is not strictly positive, or the
    /// compression is negative.
    pub fn new(block_mass: f64, spring_constant: f64, compression: f64) -> Result<Self> {
        let mass = ensure_positive("block_mass", block_mass)?;
        let k = ensure_positive("spring_constant", spring_constant)?;
        let compression = ensure_non_negative("compression_distance", compression)?;

        Ok(Self {
            angular_frequency: (k / mass).sqrt(),
            compression,
        })
    }

    /// ω in rad/s.
    #[inline]
    pub fn angular_frequency(&self) -> f64 {
        self.angular_frequency
    }

    /// Full oscillation period, `2π/ω`.
    #[inline]
    pub fn period(&self) -> f64 {
        TAU / self.angular_frequency
    }

    /// How long the block touches the spring: a quarter period.
    #[inline]
    pub fn contact_duration(&self) -> f64 {
        self.period() / 4.0
    }

    /// Initial compression amplitude.
    #[inline]
    pub fn compression(&self) -> f64 {
        self.compression
    }

    /// Speed at separation, `A·ω`.
    #[inline]
    pub fn launch_speed(&self) -> f64 {
        self.compression * self.angular_frequency
    }

    /// Horizontal position while in contact.
    #[inline]
    pub fn position_at(&self, elapsed: f64) -> f64 {
        -self.compression * (self.angular_frequency * elapsed).cos()
    }

    /// Horizontal velocity while in contact.
    #[inline]
    pub fn velocity_at(&self, elapsed: f64) -> f64 {
        self.compression * self.angular_frequency * (self.angular_frequency * elapsed).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::PI;

    const TOLERANCE: f64 = 1e-10;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn test_reference_spring() {
        let s = SpringLaunch::new(1.0, 100.0, 0.5).unwrap();
        assert!(approx_eq(s.angular_frequency(), 10.0));
        assert!(approx_eq(s.period(), PI / 5.0));
        assert!(approx_eq(s.contact_duration(), PI / 20.0));
        assert!(approx_eq(s.launch_speed(), 5.0));
    }

    #[test]
    fn test_starts_at_rest_fully_compressed() {
        let s = SpringLaunch::new(2.0, 50.0, 0.3).unwrap();
        assert!(approx_eq(s.position_at(0.0), -0.3));
        assert!(approx_eq(s.velocity_at(0.0), 0.0));
    }

    #[test]
    fn test_separates_at_equilibrium() {
        let s = SpringLaunch::new(2.0, 50.0, 0.3).unwrap();
        let t = s.contact_duration();
        assert!(approx_eq(s.position_at(t), 0.0));
        assert!(approx_eq(s.velocity_at(t), s.launch_speed()));
    }

    #[test]
    fn test_zero_compression_is_valid() {
        let s = SpringLaunch::new(1.0, 10.0, 0.0).unwrap();
        assert!(approx_eq(s.launch_speed(), 0.0));
    }

    #[test]
    fn test_rejects_non_positive_mass_and_constant() {
        assert!(SpringLaunch::new(0.0, 10.0, 0.1).is_err());
        assert!(SpringLaunch::new(1.0, -10.0, 0.1).is_err());
        assert!(SpringLaunch::new(1.0, 10.0, -0.1).is_err());
    }
}
