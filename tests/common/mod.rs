//! Shared harness for crossing-scheduler integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use railgate::crossing::{Crossing, RunReport, SimOptions};
use railgate::observability::{EventKind, EventLog, EventRecord};
use railgate::schedule::{Schedule, ScheduleLimits, parse_str};

/// Parses inline schedule text, panicking on malformed fixtures.
pub fn schedule(input: &str) -> Schedule {
    parse_str(input, Path::new("fixture"), &ScheduleLimits::default())
        .expect("fixture schedule must parse")
}

/// Runs a schedule to completion with default options and a silent
/// event log. Meant for paused-clock tests.
pub async fn simulate(input: &str) -> RunReport {
    let crossing = Crossing::new(&schedule(input), SimOptions::default());
    crossing
        .run(Arc::new(EventLog::sink()))
        .await
        .expect("simulation must complete")
}

/// Crossing order as plain ids.
pub fn crossing_order(report: &RunReport) -> Vec<usize> {
    report.crossings.iter().map(|id| id.index()).collect()
}

/// Sequence numbers of one train's (Ready, OnTrack, OffTrack) events.
///
/// Panics if the train does not have exactly one event of each kind.
pub fn event_triple(report: &RunReport, id: usize) -> (u64, u64, u64) {
    let of_kind = |kind: EventKind| {
        let matches: Vec<&EventRecord> = report
            .events
            .iter()
            .filter(|e| e.train.index() == id && e.kind == kind)
            .collect();
        assert_eq!(
            matches.len(),
            1,
            "train {id} should have exactly one {kind:?} event"
        );
        matches[0].sequence
    };
    (
        of_kind(EventKind::Ready),
        of_kind(EventKind::OnTrack),
        of_kind(EventKind::OffTrack),
    )
}

/// The (train id, kind) pairs of all on/off-track events, in order.
pub fn track_events(report: &RunReport) -> Vec<(usize, EventKind)> {
    report
        .events
        .iter()
        .filter(|e| matches!(e.kind, EventKind::OnTrack | EventKind::OffTrack))
        .map(|e| (e.train.index(), e.kind))
        .collect()
}
