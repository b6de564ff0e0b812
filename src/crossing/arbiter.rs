//! The arbiter and the per-train load tasks.
//!
//! One tokio task per train sleeps its load duration, publishes itself
//! into the yard, signals the arbiter, and then waits on a dedicated
//! one-shot grant before sleeping its cross duration. The arbiter is the
//! single control loop: it waits for a legal extraction point, picks the
//! best-ranked ready train, grants it the track, and joins its task to
//! completion before granting the next — crossings never overlap.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Barrier, mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::crossing::rank;
use crate::crossing::train::{Direction, Train, TrainId, TrainPhase};
use crate::crossing::yard::Yard;
use crate::error::SchedulerError;
use crate::observability::{EventKind, EventLog};

/// Wall-clock length of `ticks` schedule ticks. Schedule limits cap tick
/// counts far below `u32::MAX`, so the clamp is unreachable in practice.
pub(crate) fn phase_duration(tick: Duration, ticks: u64) -> Duration {
    tick.saturating_mul(u32::try_from(ticks).unwrap_or(u32::MAX))
}

/// Spawns the load task for one train.
///
/// The task blocks on the shared start barrier so every train begins its
/// load timer from the same release instant, then runs `WaitStart →
/// Sleeping(load) → PublishReady → WaitCross → Sleeping(cross) →
/// Terminated`. The readiness event is reported before publication, and
/// publication (ready ledger + station mark) is one atomic update from
/// the arbiter's point of view — see [`Yard::publish_ready`].
pub(crate) fn spawn_load_task(
    train: Train,
    tick: Duration,
    barrier: Arc<Barrier>,
    yard: Arc<Yard>,
    ready_tx: mpsc::UnboundedSender<TrainId>,
    grant_rx: oneshot::Receiver<()>,
    events: Arc<EventLog>,
) -> JoinHandle<Result<(), SchedulerError>> {
    tokio::spawn(async move {
        let id = train.id;

        barrier.wait().await;
        yard.set_phase(id, TrainPhase::Loading);
        tokio::time::sleep(phase_duration(tick, train.load_ticks)).await;

        events.emit(EventKind::Ready, id, train.direction);
        yard.publish_ready(&train);
        ready_tx
            .send(id)
            .map_err(|_| SchedulerError::ArbiterGone(id))?;

        grant_rx
            .await
            .map_err(|_| SchedulerError::ArbiterGone(id))?;
        tokio::time::sleep(phase_duration(tick, train.cross_ticks)).await;
        Ok(())
    })
}

/// Per-train rendezvous handles held by the arbiter: the one-shot grant
/// sender and the join handle, both consumed exactly once at crossing.
pub(crate) struct Rendezvous {
    pub grant: Option<oneshot::Sender<()>>,
    pub handle: Option<JoinHandle<Result<(), SchedulerError>>>,
}

/// The single arbiter control loop.
///
/// State machine: `AwaitingReadiness → Selecting → Granting → … → Drained`.
/// Owns the `Turn` tie-break state, which starts `East` and flips to the
/// opposite of whichever direction just crossed.
pub(crate) struct Arbiter {
    trains: Arc<Vec<Train>>,
    yard: Arc<Yard>,
    ready_rx: mpsc::UnboundedReceiver<TrainId>,
    rendezvous: Vec<Rendezvous>,
    events: Arc<EventLog>,
    turn: Direction,
}

impl Arbiter {
    pub(crate) fn new(
        trains: Arc<Vec<Train>>,
        yard: Arc<Yard>,
        ready_rx: mpsc::UnboundedReceiver<TrainId>,
        rendezvous: Vec<Rendezvous>,
        events: Arc<EventLog>,
    ) -> Self {
        Self {
            trains,
            yard,
            ready_rx,
            rendezvous,
            events,
            turn: Direction::East,
        }
    }

    /// Runs the loop until every station queue is exhausted and the ready
    /// set is fully extracted. Returns the crossing order.
    pub(crate) async fn drive(mut self) -> Result<Vec<TrainId>, SchedulerError> {
        let mut crossed = Vec::with_capacity(self.trains.len());

        while !self.yard.all_drained() {
            let frontier = self.await_extraction_point().await?;
            let winner = rank::select_next(&frontier, &self.trains, self.turn)
                .ok_or(SchedulerError::EmptyFrontier)?;
            self.grant_crossing(winner).await?;
            crossed.push(winner);
        }

        tracing::debug!(crossings = crossed.len(), "yard drained, arbiter stopping");
        Ok(crossed)
    }

    /// Blocks until the readiness precondition holds, re-checking after
    /// every load-task signal. The predicate is always re-evaluated after
    /// a wake; a signal alone is never trusted.
    async fn await_extraction_point(&mut self) -> Result<Vec<TrainId>, SchedulerError> {
        loop {
            if let Some(frontier) = self.yard.clear_to_select(&self.trains) {
                return Ok(frontier);
            }
            let announced = self
                .ready_rx
                .recv()
                .await
                .ok_or(SchedulerError::ReadinessChannelClosed)?;
            tracing::trace!(train = %announced, "readiness signal received");
        }
    }

    /// Extracts the winner, wakes exactly its load task, and blocks until
    /// that task terminates, then flips the turn.
    async fn grant_crossing(&mut self, winner: TrainId) -> Result<(), SchedulerError> {
        let found = self.yard.phase(winner);
        if found != TrainPhase::Ready {
            return Err(SchedulerError::PhaseViolation {
                train: winner,
                expected: TrainPhase::Ready,
                found,
            });
        }

        let direction = self.trains[winner.index()].direction;
        self.yard.extract(winner)?;
        self.yard.set_phase(winner, TrainPhase::Crossing);
        self.events.emit(EventKind::OnTrack, winner, direction);

        let slot = &mut self.rendezvous[winner.index()];
        slot.grant
            .take()
            .ok_or(SchedulerError::DoubleGrant(winner))?
            .send(())
            .map_err(|()| SchedulerError::TaskVanished(winner))?;

        // The crossing sleep happens inside the load task; joining it here
        // is what serializes track access.
        let handle = slot
            .handle
            .take()
            .ok_or(SchedulerError::DoubleGrant(winner))?;
        handle
            .await
            .map_err(|join| SchedulerError::TaskFailed(winner, join.to_string()))??;

        self.turn = direction.opposite();
        self.yard.set_phase(winner, TrainPhase::Done);
        self.events.emit(EventKind::OffTrack, winner, direction);
        Ok(())
    }
}
