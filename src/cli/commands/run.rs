//! The `run` command: load a schedule and drive it across the track.

use std::sync::Arc;

use crate::cli::args::{OutputFormat, RunArgs};
use crate::crossing::{Crossing, SimOptions};
use crate::error::RailgateError;
use crate::observability::{EventFormat, EventLog};
use crate::schedule::{self, ScheduleLimits};

/// Runs a crossing simulation to completion.
///
/// # Errors
///
/// Returns a config error for a missing or malformed schedule, an I/O
/// error if the events file cannot be created, and a scheduler error if a
/// synchronization invariant is violated mid-run.
pub async fn run(args: &RunArgs) -> Result<(), RailgateError> {
    let limits = ScheduleLimits::default();
    let schedule = schedule::load(&args.schedule, &limits)?;
    tracing::info!(
        schedule = %args.schedule.display(),
        trains = schedule.len(),
        tick = ?args.tick,
        "schedule loaded"
    );

    let format = match args.format {
        OutputFormat::Human => EventFormat::Human,
        OutputFormat::Json => EventFormat::Jsonl,
    };
    let events = match &args.events_file {
        Some(path) => EventLog::to_file(format, path)?,
        None => EventLog::stdout(format),
    };

    let crossing = Crossing::new(&schedule, SimOptions { tick: args.tick });
    let report = crossing.run(Arc::new(events)).await?;

    tracing::info!(
        crossings = report.crossings.len(),
        elapsed = ?report.elapsed,
        "all trains crossed"
    );
    Ok(())
}
