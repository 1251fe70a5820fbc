//! Motion phases and the times at which they end.

use core::fmt;

use serde::{Deserialize, Serialize};

/// One of the ordered motion regimes the block passes through once.
///
/// `Spring → Surface → Ramp → Air → Landed`; no phase is revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Pushed by the spring from maximum compression to equilibrium.
    Spring,
    /// Sliding across the flat surface toward the ramp.
    Surface,
    /// Sliding up the incline.
    Ramp,
    /// Airborne after leaving the top of the ramp.
    Air,
    /// On the ground after impact.
    Landed,
}

impl Phase {
    /// All phases in the order they occur.
    pub const ALL: [Phase; 5] = [
        Phase::Spring,
        Phase::Surface,
        Phase::Ramp,
        Phase::Air,
        Phase::Landed,
    ];

    /// Lowercase name of the phase.
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Spring => "spring",
            Phase::Surface => "surface",
            Phase::Ramp => "ramp",
            Phase::Air => "air",
            Phase::Landed => "landed",
        }
    }

    /// Whether the block rests on the floor or ramp (normal force acts).
    pub const fn has_contact(self) -> bool {
        matches!(self, Phase::Spring | Phase::Surface | Phase::Ramp)
    }

    /// Whether kinetic friction acts while the block slides.
    ///
    /// The spring zone itself is frictionless.
    pub const fn has_friction(self) -> bool {
        matches!(self, Phase::Surface | Phase::Ramp)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// End time of a phase, measured from maximum compression.
///
/// `Never` marks a boundary the block does not reach because it came to
/// rest in an earlier phase. It orders after every finite time.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryTime {
    /// The phase ends at this many seconds.
    At(f64),
    /// The phase never ends.
    Never,
}

impl BoundaryTime {
    /// Whether the boundary has been crossed by time `t`.
    #[inline]
    pub fn is_reached_by(self, t: f64) -> bool {
        match self {
            BoundaryTime::At(end) => t >= end,
            BoundaryTime::Never => false,
        }
    }

    /// The finite time, if any.
    #[inline]
    pub const fn at(self) -> Option<f64> {
        match self {
            BoundaryTime::At(end) => Some(end),
            BoundaryTime::Never => None,
        }
    }

    /// Whether this boundary is the `Never` sentinel.
    #[inline]
    pub const fn is_never(self) -> bool {
        matches!(self, BoundaryTime::Never)
    }

    /// Seconds, with `Never` as `f64::INFINITY`.
    #[inline]
    pub const fn as_secs(self) -> f64 {
        match self {
            BoundaryTime::At(end) => end,
            BoundaryTime::Never => f64::INFINITY,
        }
    }

    /// The boundary `duration` after this one.
    ///
    /// A `Never` boundary stays `Never`, and so does a phase that never
    /// completes (`duration` of `None`).
    #[inline]
    pub fn then(self, duration: Option<f64>) -> BoundaryTime {
        match (self, duration) {
            (BoundaryTime::At(start), Some(d)) => BoundaryTime::At(start + d),
            _ => BoundaryTime::Never,
        }
    }
}

impl fmt::Display for BoundaryTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryTime::At(end) => write!(f, "{end:.4} s"),
            BoundaryTime::Never => f.write_str("never"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order() {
        for pair in Phase::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(Phase::ALL.last(), Some(&Phase::Landed));
    }

    #[test]
    fn test_phase_contact_and_friction() {
        assert!(Phase::Spring.has_contact());
        assert!(!Phase::Spring.has_friction());
        assert!(Phase::Ramp.has_friction());
        assert!(!Phase::Air.has_contact());
        assert!(!Phase::Landed.has_friction());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Surface.to_string(), "surface");
    }

    #[test]
    fn test_never_orders_last() {
        assert!(BoundaryTime::At(1e300) < BoundaryTime::Never);
        assert!(BoundaryTime::At(1.0) < BoundaryTime::At(2.0));
    }

    #[test]
    fn test_never_is_never_reached() {
        assert!(!BoundaryTime::Never.is_reached_by(f64::MAX));
        assert!(BoundaryTime::At(2.0).is_reached_by(2.0));
        assert!(!BoundaryTime::At(2.0).is_reached_by(1.999));
    }

    #[test]
    fn test_then_propagates_never() {
        assert_eq!(BoundaryTime::At(1.0).then(Some(0.5)), BoundaryTime::At(1.5));
        assert_eq!(BoundaryTime::At(1.0).then(None), BoundaryTime::Never);
        assert_eq!(BoundaryTime::Never.then(Some(0.5)), BoundaryTime::Never);
    }

    #[test]
    fn test_boundary_serde() {
        let json = serde_json::to_string(&BoundaryTime::Never).unwrap();
        assert_eq!(json, "\"never\"");
        let json = serde_json::to_string(&BoundaryTime::At(1.5)).unwrap();
        assert_eq!(json, r#"{"at":1.5}"#);
    }

    #[test]
    fn test_boundary_display() {
        assert_eq!(BoundaryTime::At(0.5).to_string(), "0.5000 s");
        assert_eq!(BoundaryTime::Never.to_string(), "never");
    }
}
