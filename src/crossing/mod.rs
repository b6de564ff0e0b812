//! The crossing scheduler core.
//!
//! [`Crossing`] wires the pieces together: it builds the shared yard from
//! a schedule, spawns one load task per train behind a start barrier,
//! releases them all in lock-step, and runs the arbiter until every train
//! has crossed. The result is a [`RunReport`] with the full event record
//! and the deterministic crossing order.

pub mod arbiter;
pub mod rank;
pub mod ready;
pub mod station;
pub mod train;
pub mod yard;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Barrier, mpsc, oneshot};

use crate::crossing::arbiter::{Arbiter, Rendezvous, spawn_load_task};
use crate::crossing::train::{Train, TrainId};
use crate::crossing::yard::Yard;
use crate::error::SchedulerError;
use crate::observability::{EventLog, EventRecord};
use crate::schedule::Schedule;

/// Run-time options for a crossing simulation.
#[derive(Debug, Clone)]
pub struct SimOptions {
    /// Wall-clock duration of one schedule tick.
    pub tick: Duration,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(100),
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Train ids in the order they crossed.
    pub crossings: Vec<TrainId>,
    /// Every emitted event, in chronological order.
    pub events: Vec<EventRecord>,
    /// Wall time from barrier release to the last train leaving the track.
    pub elapsed: Duration,
}

/// One single-track crossing, ready to run.
#[derive(Debug)]
pub struct Crossing {
    trains: Arc<Vec<Train>>,
    options: SimOptions,
}

impl Crossing {
    /// Builds a crossing from a parsed schedule.
    #[must_use]
    pub fn new(schedule: &Schedule, options: SimOptions) -> Self {
        Self {
            trains: Arc::new(schedule.trains().to_vec()),
            options,
        }
    }

    /// Number of admitted trains.
    #[must_use]
    pub fn train_count(&self) -> usize {
        self.trains.len()
    }

    /// Runs the simulation to completion.
    ///
    /// Spawns every load task, releases them simultaneously through the
    /// start barrier, and drives the arbiter until the yard drains. All
    /// spawned tasks are joined before this returns — no concurrent work
    /// leaks past the report.
    ///
    /// # Errors
    ///
    /// Returns a [`SchedulerError`] if any synchronization invariant is
    /// violated mid-run. There is no partial recovery.
    pub async fn run(self, events: Arc<EventLog>) -> Result<RunReport, SchedulerError> {
        if self.trains.is_empty() {
            // The parser rejects empty schedules; nothing to do if a
            // caller constructs one anyway.
            return Ok(RunReport {
                crossings: Vec::new(),
                events: events.records(),
                elapsed: Duration::ZERO,
            });
        }

        let yard = Arc::new(Yard::new(&self.trains));
        let barrier = Arc::new(Barrier::new(self.trains.len() + 1));
        let (ready_tx, ready_rx) = mpsc::unbounded_channel();

        let mut rendezvous = Vec::with_capacity(self.trains.len());
        for train in self.trains.iter() {
            let (grant_tx, grant_rx) = oneshot::channel();
            let handle = spawn_load_task(
                train.clone(),
                self.options.tick,
                Arc::clone(&barrier),
                Arc::clone(&yard),
                ready_tx.clone(),
                grant_rx,
                Arc::clone(&events),
            );
            rendezvous.push(Rendezvous {
                grant: Some(grant_tx),
                handle: Some(handle),
            });
        }
        // Only load tasks may signal readiness; the arbiter's recv sees
        // channel closure exactly when every task is gone.
        drop(ready_tx);

        tracing::info!(trains = self.trains.len(), "releasing load tasks");
        barrier.wait().await;
        events.start_clock();

        let arbiter = Arbiter::new(
            Arc::clone(&self.trains),
            Arc::clone(&yard),
            ready_rx,
            rendezvous,
            Arc::clone(&events),
        );
        let crossings = arbiter.drive().await?;

        Ok(RunReport {
            elapsed: events.elapsed(),
            events: events.records(),
            crossings,
        })
    }
}
