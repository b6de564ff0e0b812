//! Station queues — per-class admission journals.
//!
//! Each of the four (direction × priority) stations keeps its admitted
//! trains in a fixed order plus a monotonic count of how many of them have
//! finished loading. Trains are never removed; a queue is an arrival
//! journal, not a consumable buffer.

use std::sync::Mutex;

use crate::crossing::train::{ServiceClass, Train, TrainId};

/// Admission journal for one loading station.
///
/// The id order is fixed before any load task starts (admission order,
/// then one stable sort by ascending load duration). After that only the
/// loaded-count moves, behind this queue's own mutex — concurrent load
/// tasks in different classes never contend.
#[derive(Debug)]
pub struct StationQueue {
    class: ServiceClass,
    order: Vec<TrainId>,
    loaded: Mutex<usize>,
}

impl StationQueue {
    /// Creates an empty queue for the given class.
    #[must_use]
    pub const fn new(class: ServiceClass) -> Self {
        Self {
            class,
            order: Vec::new(),
            loaded: Mutex::new(0),
        }
    }

    /// The class this station serves.
    #[must_use]
    pub const fn class(&self) -> ServiceClass {
        self.class
    }

    /// Appends a train in admission order. Pre-run only, hence `&mut`.
    pub fn admit(&mut self, id: TrainId) {
        self.order.push(id);
    }

    /// One-time stable sort by ascending load duration; ties keep
    /// admission order. Must run before any load task starts — the
    /// arbiter's readiness check inspects only the front pending element
    /// and assumes this ordering.
    pub fn sort_by_load(&mut self, trains: &[Train]) {
        self.order
            .sort_by_key(|id| trains[id.index()].load_ticks);
    }

    /// Number of admitted trains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no trains were admitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Admitted ids in load-duration order.
    #[must_use]
    pub fn ids(&self) -> &[TrainId] {
        &self.order
    }

    /// Records that one more resident train has finished loading.
    ///
    /// Called exactly once per resident by its load task. The count is
    /// monotonic and saturates at the queue length; exceeding it would be
    /// a caller defect and is reported rather than corrupting the journal.
    ///
    /// # Panics
    ///
    /// Panics if this queue's mutex is poisoned.
    pub fn mark_loaded(&self) {
        let mut loaded = self.loaded.lock().expect("station lock poisoned");
        if *loaded >= self.order.len() {
            tracing::error!(class = %self.class, "loaded count would exceed queue length");
            return;
        }
        *loaded += 1;
    }

    /// Count of trains that have finished loading.
    ///
    /// # Panics
    ///
    /// Panics if this queue's mutex is poisoned.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        *self.loaded.lock().expect("station lock poisoned")
    }

    /// Whether every admitted train has finished loading.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.loaded_count() == self.order.len()
    }

    /// The next train that will finish loading, if any remain.
    ///
    /// Because the order is sorted by load duration and the loaded-count
    /// only grows, this is always the unloaded train with the smallest
    /// load time.
    #[must_use]
    pub fn pending_front(&self) -> Option<TrainId> {
        self.order.get(self.loaded_count()).copied()
    }
}
