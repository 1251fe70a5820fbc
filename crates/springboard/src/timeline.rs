//! Fixed-cadence sampling for animation and tracing.
//!
//! Sample `i` is evaluated at `start + i·step`, never by advancing the
//! previous sample, so playing a run at any frame rate reproduces exactly
//! the states a direct [`Trajectory::evaluate`] would return.

use crate::error::{Error, Result, ensure_non_negative, ensure_positive};
use crate::state::Snapshot;
use crate::trajectory::Trajectory;

/// Returns a time step for a given number of frames per second.
///
/// # Example
///
/// ```rust
/// use springboard::fps;
///
/// assert!((fps(60) - 1.0 / 60.0).abs() < 1e-15);
/// ```
#[inline]
pub fn fps(n: u32) -> f64 {
    1.0 / f64::from(n)
}

/// Iterator over snapshots at a fixed time step.
///
/// The final sample always lands exactly on `end`, even when the span is
/// not a whole number of steps.
///
/// # Example
///
/// ```rust
/// use springboard::{fps, Scenario, SimulationInputs, Timeline, Trajectory};
///
/// let trajectory = Trajectory::recompute(SimulationInputs::default(), Scenario::default())?;
/// let frames: Vec<_> = Timeline::new(&trajectory, 0.0, 1.0, fps(30))?.collect();
/// assert_eq!(frames.len(), 31);
/// assert_eq!(frames.last().map(|s| s.time), Some(1.0));
/// # Ok::<(), springboard::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    trajectory: &'a Trajectory,
    start: f64,
    end: f64,
    step: f64,
    index: u64,
    done: bool,
}

impl<'a> Timeline<'a> {
    /// Samples `trajectory` from `start` to `end` inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `start` is negative, `end` is
    /// before `start` or not finite, or `step` is not strictly positive.
    pub fn new(trajectory: &'a Trajectory, start: f64, end: f64, step: f64) -> Result<Self> {
        let start = ensure_non_negative("start", start)?;
        let end = ensure_non_negative("end", end)?;
        let step = ensure_positive("step", step)?;
        if end < start {
            return Err(Error::invalid("end", end, "must not be before start"));
        }

        Ok(Self {
            trajectory,
            start,
            end,
            step,
            index: 0,
            done: false,
        })
    }

    /// Samples from release until landing at `frames_per_second`.
    ///
    /// Returns `None` when the block never lands.
    pub fn until_landing(trajectory: &'a Trajectory, frames_per_second: u32) -> Option<Self> {
        let end = trajectory.total_duration().at()?;
        Self::new(trajectory, 0.0, end, fps(frames_per_second.max(1))).ok()
    }
}

impl Iterator for Timeline<'_> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        if self.done {
            return None;
        }

        let mut t = self.start + self.index as f64 * self.step;
        // Snap to `end` when within half a step to absorb rounding.
        if t >= self.end - 0.5 * self.step {
            t = self.end;
            self.done = true;
        }
        self.index += 1;

        Some(self.trajectory.snapshot_at(t))
    }
}
