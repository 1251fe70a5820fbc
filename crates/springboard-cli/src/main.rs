#![forbid(unsafe_code)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

//! # Springboard CLI
//!
//! Command-line front end for the `springboard` trajectory engine.
//!
//! ## Usage
//!
//! ```bash
//! springboard state --time 1.0             # One instant of the reference run
//! springboard phases --format json         # Boundary times and exit states
//! springboard trace --fps 60 -k 1000       # Sampled run until landing
//! ```

mod cli;
mod config;
mod output;

use std::io::{self, Write};

use anyhow::{Context, Result, anyhow};
use springboard::{Timeline, Trajectory, fps};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, LogLevel};
use config::RunConfig;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.log_level());

    let config = RunConfig::from_cli(&cli).context("failed to load configuration")?;
    info!(inputs = ?config.inputs, scenario = ?config.scenario, "resolved configuration");

    let trajectory = Trajectory::recompute(config.inputs, config.scenario)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Command::State(args) => {
            let snapshot = trajectory.evaluate(args.time)?;
            output::write_snapshot(&mut out, &snapshot, args.format)?;
        }
        Command::Phases(args) => {
            output::write_phases(&mut out, &trajectory, args.format)?;
        }
        Command::Trace(args) => {
            let end = match args.until {
                Some(end) => end,
                None => trace_end(&trajectory)?,
            };
            debug!(end, fps = args.fps, "sampling trace");
            let timeline = Timeline::new(&trajectory, 0.0, end, fps(args.fps))?;
            output::write_trace(&mut out, timeline, args.format)?;
        }
    }
    out.flush()?;

    Ok(())
}

/// Landing time, or an error pointing at `--until` for a stalled block.
fn trace_end(trajectory: &Trajectory) -> Result<f64> {
    trajectory.total_duration().at().ok_or_else(|| match trajectory.stop_point() {
        Some(stop) => anyhow!(
            "the block comes to rest on the {} at x = {:.4} m and never lands; pass --until",
            stop.phase,
            stop.position.x
        ),
        None => anyhow!("the block never lands; pass --until"),
    })
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins
/// over `-v` when set.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
