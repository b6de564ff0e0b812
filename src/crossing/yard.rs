//! The yard — shared state between load tasks and the arbiter.
//!
//! Bundles the four station queues, the ready ledger, and the per-train
//! phase table, and owns the lock choreography between them. Exclusion
//! domains: one mutex per station loaded-count, one mutex for the ready
//! ledger, one for the phase table. Lock order is always ready → station
//! → phases; no method acquires them in any other order, so the
//! choreography is deadlock-free.
//!
//! Readiness publication (ledger append + station mark) happens entirely
//! inside the ready-ledger critical section. The arbiter's readiness check
//! holds the same lock while it inspects the stations, so it can never
//! observe a train in the frontier whose station count lags, or the
//! reverse.

use std::sync::Mutex;

use crate::crossing::ready::ReadyLedger;
use crate::crossing::station::StationQueue;
use crate::crossing::train::{ServiceClass, Train, TrainId, TrainPhase};
use crate::error::SchedulerError;

/// Shared yard state. Created before any task starts and dropped when the
/// run drains.
#[derive(Debug)]
pub struct Yard {
    stations: [StationQueue; ServiceClass::COUNT],
    ready: Mutex<ReadyLedger>,
    phases: Mutex<Vec<TrainPhase>>,
}

impl Yard {
    /// Builds the yard: admits every train to its class queue in schedule
    /// order, then applies the one-time load-duration sort to each queue.
    #[must_use]
    pub fn new(trains: &[Train]) -> Self {
        let mut stations = ServiceClass::ALL.map(StationQueue::new);
        for train in trains {
            stations[train.class().index()].admit(train.id);
        }
        for station in &mut stations {
            station.sort_by_load(trains);
        }
        Self {
            stations,
            ready: Mutex::new(ReadyLedger::new()),
            phases: Mutex::new(vec![TrainPhase::Pending; trains.len()]),
        }
    }

    /// The station queue for a class.
    #[must_use]
    pub const fn station(&self, class: ServiceClass) -> &StationQueue {
        &self.stations[class.index()]
    }

    /// All four station queues, in [`ServiceClass::ALL`] order.
    #[must_use]
    pub const fn stations(&self) -> &[StationQueue; ServiceClass::COUNT] {
        &self.stations
    }

    /// Publishes a loaded train: appends it to the ready ledger, marks its
    /// station, and moves it to [`TrainPhase::Ready`], all while holding
    /// the ready-ledger lock so the arbiter sees one consistent update.
    ///
    /// # Panics
    ///
    /// Panics if a yard mutex is poisoned.
    pub fn publish_ready(&self, train: &Train) {
        let mut ready = self.ready.lock().expect("ready lock poisoned");
        ready.publish(train.id);
        self.stations[train.class().index()].mark_loaded();
        self.set_phase(train.id, TrainPhase::Ready);
        drop(ready);
    }

    /// The readiness precondition: returns a frontier snapshot if the
    /// arbiter may select now, or `None` if it must keep waiting.
    ///
    /// With `oldest` the load duration of the earliest unextracted ready
    /// entry, selection is legal only when every station that still has
    /// unloaded trains will next produce one with load duration `>=
    /// oldest` — never pick a ready train while an earlier-finishing one
    /// could still beat it out of some queue. An exact tie does not block.
    ///
    /// # Panics
    ///
    /// Panics if a yard mutex is poisoned.
    #[must_use]
    pub fn clear_to_select(&self, trains: &[Train]) -> Option<Vec<TrainId>> {
        let ready = self.ready.lock().expect("ready lock poisoned");
        let oldest = ready.oldest()?;
        let oldest_load = trains[oldest.index()].load_ticks;

        for station in &self.stations {
            if let Some(pending) = station.pending_front() {
                if trains[pending.index()].load_ticks < oldest_load {
                    return None;
                }
            }
        }
        Some(ready.frontier().to_vec())
    }

    /// Extracts the selected train from the ready frontier.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::NotInFrontier`] if `id` is not waiting.
    ///
    /// # Panics
    ///
    /// Panics if the ready mutex is poisoned.
    pub fn extract(&self, id: TrainId) -> Result<(), SchedulerError> {
        self.ready
            .lock()
            .expect("ready lock poisoned")
            .extract(id)
    }

    /// Whether every station is exhausted and every published train has
    /// been extracted — the arbiter's termination condition.
    ///
    /// # Panics
    ///
    /// Panics if a yard mutex is poisoned.
    #[must_use]
    pub fn all_drained(&self) -> bool {
        let ready = self.ready.lock().expect("ready lock poisoned");
        ready.is_drained() && self.stations.iter().all(StationQueue::is_exhausted)
    }

    /// Current lifecycle phase of a train.
    ///
    /// # Panics
    ///
    /// Panics if the phase mutex is poisoned.
    #[must_use]
    pub fn phase(&self, id: TrainId) -> TrainPhase {
        self.phases.lock().expect("phase lock poisoned")[id.index()]
    }

    /// Records a phase transition.
    ///
    /// # Panics
    ///
    /// Panics if the phase mutex is poisoned.
    pub fn set_phase(&self, id: TrainId, phase: TrainPhase) {
        self.phases.lock().expect("phase lock poisoned")[id.index()] = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn train(id: usize, code: char, load_ticks: u64) -> Train {
        let class = ServiceClass::from_code(code).unwrap();
        Train {
            id: TrainId(id),
            direction: class.direction,
            priority: class.priority,
            load_ticks,
            cross_ticks: 1,
        }
    }

    #[test]
    fn new_admits_by_class_and_sorts_by_load() {
        let trains = vec![
            train(0, 'E', 5),
            train(1, 'E', 2),
            train(2, 'w', 3),
        ];
        let yard = Yard::new(&trains);

        let east_high = yard.station(ServiceClass::from_code('E').unwrap());
        assert_eq!(east_high.ids(), &[TrainId(1), TrainId(0)]);

        let west_low = yard.station(ServiceClass::from_code('w').unwrap());
        assert_eq!(west_low.ids(), &[TrainId(2)]);

        assert!(yard.station(ServiceClass::from_code('e').unwrap()).is_empty());
        assert_eq!(yard.phase(TrainId(0)), TrainPhase::Pending);
    }

    #[test]
    fn publish_marks_station_and_phase_together() {
        let trains = vec![train(0, 'E', 1)];
        let yard = Yard::new(&trains);

        yard.publish_ready(&trains[0]);

        assert_eq!(yard.phase(TrainId(0)), TrainPhase::Ready);
        assert!(yard.station(trains[0].class()).is_exhausted());
        assert!(!yard.all_drained());
    }

    #[test]
    fn clear_to_select_none_while_nothing_ready() {
        let trains = vec![train(0, 'E', 1)];
        let yard = Yard::new(&trains);
        assert_eq!(yard.clear_to_select(&trains), None);
    }

    #[test]
    fn faster_pending_train_blocks_selection() {
        // Station `e` still holds a train with load 1 while the oldest
        // ready entry has load 5: the arbiter must keep waiting.
        let trains = vec![train(0, 'E', 5), train(1, 'e', 1)];
        let yard = Yard::new(&trains);

        yard.publish_ready(&trains[0]);
        assert_eq!(yard.clear_to_select(&trains), None);

        yard.publish_ready(&trains[1]);
        assert_eq!(
            yard.clear_to_select(&trains),
            Some(vec![TrainId(0), TrainId(1)])
        );
    }

    #[test]
    fn equal_pending_load_does_not_block() {
        // Boundary of the precondition: a pending train with load exactly
        // equal to the oldest ready entry lets selection proceed.
        let trains = vec![train(0, 'E', 3), train(1, 'e', 3)];
        let yard = Yard::new(&trains);

        yard.publish_ready(&trains[0]);
        assert_eq!(yard.clear_to_select(&trains), Some(vec![TrainId(0)]));
    }

    #[test]
    fn slower_pending_train_does_not_block() {
        let trains = vec![train(0, 'E', 2), train(1, 'e', 7)];
        let yard = Yard::new(&trains);

        yard.publish_ready(&trains[0]);
        assert_eq!(yard.clear_to_select(&trains), Some(vec![TrainId(0)]));
    }

    #[test]
    fn drains_after_every_train_extracted() {
        let trains = vec![train(0, 'E', 1), train(1, 'w', 2)];
        let yard = Yard::new(&trains);

        yard.publish_ready(&trains[0]);
        yard.publish_ready(&trains[1]);
        assert!(!yard.all_drained());

        yard.extract(TrainId(0)).unwrap();
        yard.extract(TrainId(1)).unwrap();
        assert!(yard.all_drained());
    }

    #[test]
    fn phase_transitions_are_recorded() {
        let trains = vec![train(0, 'W', 1)];
        let yard = Yard::new(&trains);

        yard.set_phase(TrainId(0), TrainPhase::Loading);
        assert_eq!(yard.phase(TrainId(0)), TrainPhase::Loading);
        yard.set_phase(TrainId(0), TrainPhase::Done);
        assert_eq!(yard.phase(TrainId(0)), TrainPhase::Done);
    }

    #[test]
    fn unused_stations_stay_empty() {
        let trains = vec![train(0, 'E', 1)];
        let yard = Yard::new(&trains);
        let admitted: usize = yard.stations().iter().map(StationQueue::len).sum();
        assert_eq!(admitted, 1);
    }
}
