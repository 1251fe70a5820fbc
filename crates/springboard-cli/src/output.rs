//! Text and JSON rendering of trajectory results.
//!
//! Everything writes to a caller-supplied [`Write`] so the same code
//! serves stdout and tests.

use std::io::{self, Write};

use serde::Serialize;
use springboard::{
    Phase, PhaseBoundaries, PhaseExitStates, Point, Scenario, SimulationInputs, Snapshot,
    StopPoint, Trajectory,
};

use crate::cli::OutputFormat;

/// Everything `phases` reports, in one serializable value.
#[derive(Debug, Serialize)]
struct PhasesReport<'a> {
    inputs: &'a SimulationInputs,
    scenario: &'a Scenario,
    angular_frequency: f64,
    contact_duration: f64,
    boundaries: &'a PhaseBoundaries,
    exit_states: &'a PhaseExitStates,
    stop_point: Option<StopPoint>,
    landing_point: Option<Point>,
}

impl<'a> PhasesReport<'a> {
    fn new(trajectory: &'a Trajectory) -> Self {
        Self {
            inputs: trajectory.inputs(),
            scenario: trajectory.scenario(),
            angular_frequency: trajectory.spring().angular_frequency(),
            contact_duration: trajectory.spring().contact_duration(),
            boundaries: trajectory.boundaries(),
            exit_states: trajectory.exit_states(),
            stop_point: trajectory.stop_point(),
            landing_point: trajectory.landing_point(),
        }
    }
}

/// Writes one snapshot.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_snapshot<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, snapshot)?;
            writeln!(out)
        }
        OutputFormat::Text => write_snapshot_text(out, snapshot),
    }
}

fn write_snapshot_text<W: Write>(out: &mut W, s: &Snapshot) -> io::Result<()> {
    let b = &s.block;
    let f = &s.forces;
    let e = &s.energy;

    write!(out, "t = {:.4} s  phase = {}", s.time, b.phase)?;
    if b.at_rest {
        write!(out, " (at rest)")?;
    }
    writeln!(out)?;
    writeln!(out, "position  x = {:.4} m  y = {:.4} m", b.position.x, b.position.y)?;
    writeln!(
        out,
        "velocity  vx = {:.4} m/s  vy = {:.4} m/s  speed = {:.4} m/s",
        b.velocity.x, b.velocity.y, b.net_speed
    )?;
    writeln!(
        out,
        "forces    gravity = {:.4} N  normal = {:.4} N  spring = {:.4} N  friction = {:.4} N",
        f.gravity, f.normal, f.spring, f.friction
    )?;
    writeln!(
        out,
        "energy    spring = {:.4} J  kinetic = {:.4} J  potential = {:.4} J  friction = {:.4} J  total = {:.4} J",
        e.spring_pe, e.block_ke, e.block_pe, e.lost_to_friction, e.max_system_energy
    )
}

/// Writes the phase boundaries, exit states, and final resting place.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_phases<W: Write>(
    out: &mut W,
    trajectory: &Trajectory,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &PhasesReport::new(trajectory))?;
            writeln!(out)
        }
        OutputFormat::Text => write_phases_text(out, trajectory),
    }
}

fn write_phases_text<W: Write>(out: &mut W, trajectory: &Trajectory) -> io::Result<()> {
    let spring = trajectory.spring();
    writeln!(
        out,
        "omega = {:.4} rad/s  contact = {:.4} s  launch speed = {:.4} m/s",
        spring.angular_frequency(),
        spring.contact_duration(),
        spring.launch_speed()
    )?;
    writeln!(out)?;

    let boundaries = trajectory.boundaries();
    writeln!(out, "{:<8}  {:>12}  {:>12}", "phase", "start", "end")?;
    for phase in Phase::ALL {
        writeln!(
            out,
            "{:<8}  {:>12}  {:>12}",
            phase.name(),
            boundaries.start_of(phase).to_string(),
            boundaries.end_of(phase).to_string()
        )?;
    }
    writeln!(out)?;

    let exits = trajectory.exit_states();
    let rows = [
        ("leaves spring", Some(exits.from_spring)),
        ("reaches ramp", exits.from_surface),
        ("enters ramp", exits.on_entering_ramp),
        ("leaves ramp", exits.from_ramp),
        ("lands", exits.on_landing),
    ];
    for (label, exit) in rows {
        match exit {
            Some(exit) => writeln!(
                out,
                "{label:<13}  at ({:.4}, {:.4}) m  velocity ({:.4}, {:.4}) m/s",
                exit.position.x, exit.position.y, exit.velocity.x, exit.velocity.y
            )?,
            None => writeln!(out, "{label:<13}  never")?,
        }
    }

    if let Some(stop) = trajectory.stop_point() {
        writeln!(
            out,
            "\ncomes to rest on the {} at ({:.4}, {:.4}) m",
            stop.phase, stop.position.x, stop.position.y
        )?;
    }
    Ok(())
}

/// Writes a sequence of snapshots: a table for text, JSON lines for JSON.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_trace<W, I>(out: &mut W, snapshots: I, format: OutputFormat) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = Snapshot>,
{
    if format == OutputFormat::Text {
        writeln!(
            out,
            "{:>10}  {:<8}  {:>10}  {:>10}  {:>10}  {:>10}",
            "time", "phase", "x", "y", "speed", "lost (J)"
        )?;
    }

    for s in snapshots {
        match format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &s)?;
                writeln!(out)?;
            }
            OutputFormat::Text => writeln!(
                out,
                "{:>10.4}  {:<8}  {:>10.4}  {:>10.4}  {:>10.4}  {:>10.4}",
                s.time,
                s.block.phase.name(),
                s.block.position.x,
                s.block.position.y,
                s.block.net_speed,
                s.energy.lost_to_friction
            )?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use springboard::{Timeline, fps};

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn reference() -> Trajectory {
        Trajectory::recompute(SimulationInputs::default(), Scenario::default()).unwrap()
    }

    fn launched() -> Trajectory {
        let inputs = SimulationInputs::new(1.0, 1000.0, 1.0, 30.0, 0.1);
        Trajectory::recompute(inputs, Scenario::default()).unwrap()
    }

    #[test]
    fn snapshot_text_names_phase() {
        let s = reference().evaluate(1.0).unwrap();
        let text = render(|out| write_snapshot(out, &s, OutputFormat::Text));
        assert!(text.starts_with("t = 1.0000 s  phase = surface"));
        assert!(text.contains("x = 4.2146 m"));
        assert!(text.contains("total = 12.5000 J"));
    }

    #[test]
    fn snapshot_text_marks_rest() {
        let s = reference().evaluate(100.0).unwrap();
        let text = render(|out| write_snapshot(out, &s, OutputFormat::Text));
        assert!(text.contains("phase = ramp (at rest)"));
    }

    #[test]
    fn snapshot_json_round_trips() {
        let s = launched().evaluate(0.5).unwrap();
        let json = render(|out| write_snapshot(out, &s, OutputFormat::Json));
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.block.phase, s.block.phase);
        assert!((parsed.block.position.x - s.block.position.x).abs() < 1e-12);
    }

    #[test]
    fn phases_text_lists_every_phase() {
        let text = render(|out| write_phases(out, &reference(), OutputFormat::Text));
        for phase in Phase::ALL {
            assert!(text.contains(phase.name()), "missing {phase}");
        }
        assert!(text.contains("never"));
        assert!(text.contains("comes to rest on the ramp"));
    }

    #[test]
    fn phases_json_reports_never_and_landing() {
        let json = render(|out| write_phases(out, &reference(), OutputFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["boundaries"]["ramp_end"], "never");
        assert!(value["landing_point"].is_null());
        assert_eq!(value["stop_point"]["phase"], "ramp");

        let json = render(|out| write_phases(out, &launched(), OutputFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["boundaries"]["air_end"]["at"].is_f64());
        assert_eq!(value["landing_point"]["y"], 0.0);
        assert!(value["stop_point"].is_null());
    }

    #[test]
    fn trace_json_is_one_object_per_line() {
        let t = launched();
        let frames = Timeline::new(&t, 0.0, 1.0, fps(10)).unwrap();
        let text = render(|out| write_trace(out, frames, OutputFormat::Json));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        for line in lines {
            let s: Snapshot = serde_json::from_str(line).unwrap();
            assert!(s.time <= 1.0);
        }
    }

    #[test]
    fn trace_text_has_header_and_rows() {
        let t = launched();
        let frames = Timeline::new(&t, 0.0, 0.5, fps(4)).unwrap();
        let text = render(|out| write_trace(out, frames, OutputFormat::Text));
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.contains("phase"));
        assert!(header.contains("lost (J)"));
        assert!(!header.contains("friction"));
        assert_eq!(lines.count(), 3);
    }
}
