//! The ready ledger — trains that finished loading and await the track.
//!
//! An append-only id sequence plus an extracted-count. The sub-range
//! `[extracted, len)` is the frontier: trains currently waiting, in the
//! order they signaled readiness. Extraction swaps the chosen id into the
//! first frontier slot and advances the count; an extracted id never
//! re-enters. Locking lives in [`Yard`](crate::crossing::yard::Yard) —
//! this type is the plain data structure underneath it.

use crate::crossing::train::TrainId;
use crate::error::SchedulerError;

/// Append-only readiness journal with a monotonic extraction frontier.
#[derive(Debug, Default)]
pub struct ReadyLedger {
    order: Vec<TrainId>,
    extracted: usize,
}

impl ReadyLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            order: Vec::new(),
            extracted: 0,
        }
    }

    /// Appends a train that just finished loading.
    pub fn publish(&mut self, id: TrainId) {
        self.order.push(id);
    }

    /// Trains currently waiting for the track, in arrival order.
    #[must_use]
    pub fn frontier(&self) -> &[TrainId] {
        &self.order[self.extracted..]
    }

    /// The earliest unextracted entry, if any.
    #[must_use]
    pub fn oldest(&self) -> Option<TrainId> {
        self.frontier().first().copied()
    }

    /// Removes `id` from the frontier by swapping it into the first
    /// frontier slot and advancing the extracted count. Order within the
    /// remaining frontier is irrelevant to selection.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::NotInFrontier`] if `id` is not currently
    /// waiting — selecting a train that never published (or extracting one
    /// twice) is an arbiter defect.
    pub fn extract(&mut self, id: TrainId) -> Result<(), SchedulerError> {
        let offset = self
            .frontier()
            .iter()
            .position(|&waiting| waiting == id)
            .ok_or(SchedulerError::NotInFrontier(id))?;
        self.order.swap(self.extracted, self.extracted + offset);
        self.extracted += 1;
        Ok(())
    }

    /// Number of trains ever published.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been published yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of trains already extracted for crossing.
    #[must_use]
    pub const fn extracted_count(&self) -> usize {
        self.extracted
    }

    /// Whether every published train has been extracted.
    #[must_use]
    pub const fn is_drained(&self) -> bool {
        self.extracted == self.order.len()
    }
}
