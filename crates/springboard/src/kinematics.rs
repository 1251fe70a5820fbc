//! Planar value types and constant-acceleration kinematics.
//!
//! Every phase after the spring is uniformly accelerated along a straight
//! line, so the surface and ramp share the helpers in this module. The
//! coordinate plane has its origin at the spring's natural length on the
//! floor:
//!
//! ```text
//!   y
//!   │        ramp ╱│
//!   │           ╱  │
//!   └─spring─┼──surface──┴──── x
//!           x=0
//! ```

use core::ops::{Add, Mul, Neg};

use serde::{Deserialize, Serialize};

/// A position in the plane, in meters.
///
/// # Example
///
/// ```rust
/// use springboard::{Point, Vector};
///
/// let p = Point::new(1.0, 2.0) + Vector::new(0.5, -2.0);
/// assert_eq!(p, Point::new(1.5, 0.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Height above the floor.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The spring's equilibrium point on the floor.
    #[inline]
    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    #[inline]
    fn add(self, v: Vector) -> Point {
        Point {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }
}

/// A planar vector: velocity, displacement, or direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
}

impl Vector {
    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the zero vector.
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector pointing `degrees` above the +x axis.
    #[inline]
    pub fn from_angle_degrees(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self { x: cos, y: sin }
    }

    /// Euclidean length.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Returns a unit vector, or the zero vector unchanged.
    #[inline]
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            return *self;
        }
        Self {
            x: self.x / mag,
            y: self.y / mag,
        }
    }
}

impl Add for Vector {
    type Output = Vector;

    #[inline]
    fn add(self, other: Vector) -> Vector {
        Vector {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        Vector {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, scalar: f64) -> Vector {
        Vector {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    #[inline]
    fn mul(self, v: Vector) -> Vector {
        v * self
    }
}

/// Speed after covering `distance` from `initial_speed` under constant
/// `acceleration`: `v² = v₀² + 2·a·d`.
///
/// The radicand is clamped at zero before the square root. A negative
/// radicand means the block stalls before covering the distance, so the
/// result is `0.0` rather than NaN.
#[inline]
pub fn exit_speed(initial_speed: f64, acceleration: f64, distance: f64) -> f64 {
    let radicand = initial_speed * initial_speed + 2.0 * acceleration * distance;
    radicand.max(0.0).sqrt()
}

/// Time needed to cover `distance`, given the entry and exit speeds.
///
/// Returns `None` when the block never covers the distance (clamped exit
/// speed of zero). Zero acceleration is plain `distance / speed`.
///
/// Otherwise this is `Δv / a` written as `2·d / (v₀ + v₁)`. The two agree
/// exactly under constant acceleration, but the difference `v₁ - v₀`
/// cancels badly when `a` is tiny.
#[inline]
pub fn traversal_time(
    initial_speed: f64,
    final_speed: f64,
    acceleration: f64,
    distance: f64,
) -> Option<f64> {
    if final_speed <= 0.0 {
        return None;
    }
    if acceleration == 0.0 {
        Some(distance / initial_speed)
    } else {
        Some(2.0 * distance / (initial_speed + final_speed))
    }
}

/// Straight-line motion under constant acceleration that never reverses.
///
/// A decelerating body comes to rest after [`stop_time`](Self::stop_time)
/// and stays there; kinetic friction cannot push it backwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion1D {
    initial_speed: f64,
    acceleration: f64,
}

impl Motion1D {
    /// Creates a motion starting at `initial_speed` (≥ 0).
    #[inline]
    pub const fn new(initial_speed: f64, acceleration: f64) -> Self {
        Self {
            initial_speed,
            acceleration,
        }
    }

    /// Elapsed time at which the body stops, if it ever does.
    pub fn stop_time(&self) -> Option<f64> {
        if self.initial_speed <= 0.0 {
            Some(0.0)
        } else if self.acceleration < 0.0 {
            Some(self.initial_speed / -self.acceleration)
        } else {
            None
        }
    }

    /// Distance covered before stopping, if the body ever stops.
    pub fn stop_distance(&self) -> Option<f64> {
        self.stop_time().map(|t| self.distance_at(t))
    }

    /// Distance covered after `elapsed` seconds.
    pub fn distance_at(&self, elapsed: f64) -> f64 {
        let t = self.clamp_elapsed(elapsed);
        self.initial_speed * t + 0.5 * self.acceleration * t * t
    }

    /// Speed after `elapsed` seconds.
    pub fn speed_at(&self, elapsed: f64) -> f64 {
        if self.is_stopped_at(elapsed) {
            return 0.0;
        }
        (self.initial_speed + self.acceleration * elapsed).max(0.0)
    }

    /// Whether the body has come to rest by `elapsed`.
    pub fn is_stopped_at(&self, elapsed: f64) -> bool {
        self.stop_time().is_some_and(|stop| elapsed >= stop)
    }

    fn clamp_elapsed(&self, elapsed: f64) -> f64 {
        match self.stop_time() {
            Some(stop) => elapsed.min(stop),
            None => elapsed,
        }
    }
}
