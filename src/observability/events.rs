//! Structured crossing-event log.
//!
//! The scheduler core reports three event kinds — a train becoming ready,
//! going on the track, and coming off it — in true chronological order.
//! Ready events may interleave across trains; on/off-track events are
//! strictly serialized by construction. The log keeps an in-memory record
//! for programmatic consumers and renders each event to a writer as either
//! a human line or newline-delimited JSON.

use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::crossing::train::{Direction, TrainId};

// ---------------------------------------------------------------------------
// Event kinds and records
// ---------------------------------------------------------------------------

/// What happened to a train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventKind {
    /// The train finished loading and is waiting for the track.
    Ready,
    /// The train was granted the track.
    OnTrack,
    /// The train finished crossing and released the track.
    OffTrack,
}

/// One recorded crossing event.
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    /// Monotonically increasing sequence number, 0-based.
    pub sequence: u64,
    /// What happened.
    pub kind: EventKind,
    /// The train it happened to.
    pub train: TrainId,
    /// That train's direction.
    pub direction: Direction,
    /// Milliseconds since the simultaneous start of all load timers.
    pub elapsed_ms: u64,
    /// Wall-clock time of the event.
    pub timestamp: DateTime<Utc>,
}

/// Rendering for the event writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventFormat {
    /// One human-readable line per event, timestamped relative to start.
    #[default]
    Human,
    /// Newline-delimited JSON for machine consumption.
    Jsonl,
}

/// Formats an elapsed duration as `HH:MM:SS.t` (tenths of a second).
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let tenths = elapsed.subsec_millis() / 100;
    format!(
        "{:02}:{:02}:{:02}.{}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60,
        tenths
    )
}

fn human_line(record: &EventRecord) -> String {
    let stamp = format_elapsed(Duration::from_millis(record.elapsed_ms));
    match record.kind {
        EventKind::Ready => format!(
            "{stamp} Train {:>2} is ready to go {}",
            record.train, record.direction
        ),
        EventKind::OnTrack => format!(
            "{stamp} Train {:>2} is ON the main track going {}",
            record.train, record.direction
        ),
        EventKind::OffTrack => format!(
            "{stamp} Train {:>2} is OFF the main track after going {}",
            record.train, record.direction
        ),
    }
}

// ---------------------------------------------------------------------------
// Event log
// ---------------------------------------------------------------------------

/// Thread-safe crossing-event log.
///
/// Sequence numbers and the record vector are assigned under one lock, so
/// records are totally ordered even when load tasks emit concurrently.
/// Write failures are silently dropped — reporting must never abort a
/// run that the scheduler itself is completing correctly.
pub struct EventLog {
    format: EventFormat,
    writer: Mutex<BufWriter<Box<dyn Write + Send>>>,
    records: Mutex<Vec<EventRecord>>,
    start: Mutex<Instant>,
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("format", &self.format)
            .field("events", &self.event_count())
            .finish_non_exhaustive()
    }
}

impl EventLog {
    /// Creates a log that renders to the given writer.
    #[must_use]
    pub fn new(format: EventFormat, writer: Box<dyn Write + Send>) -> Self {
        Self {
            format,
            writer: Mutex::new(BufWriter::new(writer)),
            records: Mutex::new(Vec::new()),
            start: Mutex::new(Instant::now()),
        }
    }

    /// Creates a log that renders to stdout.
    #[must_use]
    pub fn stdout(format: EventFormat) -> Self {
        Self::new(format, Box::new(std::io::stdout()))
    }

    /// Creates a log that records events without rendering them.
    #[must_use]
    pub fn sink() -> Self {
        Self::new(EventFormat::Human, Box::new(std::io::sink()))
    }

    /// Creates a log that renders to a file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created.
    pub fn to_file(format: EventFormat, path: &Path) -> std::io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new(format, Box::new(file)))
    }

    /// Resets the elapsed-time origin. Called once, at the instant the
    /// start barrier releases every load task.
    ///
    /// # Panics
    ///
    /// Panics if the clock mutex is poisoned.
    pub fn start_clock(&self) {
        *self.start.lock().expect("clock lock poisoned") = Instant::now();
    }

    /// Time elapsed since the clock origin.
    ///
    /// # Panics
    ///
    /// Panics if the clock mutex is poisoned.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.lock().expect("clock lock poisoned").elapsed()
    }

    /// Records one event and renders it to the writer.
    ///
    /// # Panics
    ///
    /// Panics if the record mutex is poisoned.
    pub fn emit(&self, kind: EventKind, train: TrainId, direction: Direction) {
        let elapsed = self.elapsed();
        let mut records = self.records.lock().expect("record lock poisoned");
        let record = EventRecord {
            sequence: records.len() as u64,
            kind,
            train,
            direction,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            timestamp: Utc::now(),
        };
        self.render(&record);
        records.push(record);
    }

    fn render(&self, record: &EventRecord) {
        let line = match self.format {
            EventFormat::Human => human_line(record),
            EventFormat::Jsonl => match serde_json::to_string(record) {
                Ok(json) => json,
                Err(_) => return,
            },
        };
        if let Ok(mut w) = self.writer.lock() {
            let _ = writeln!(w, "{line}");
            let _ = w.flush();
        }
    }

    /// Snapshot of every event recorded so far, in emission order.
    ///
    /// # Panics
    ///
    /// Panics if the record mutex is poisoned.
    #[must_use]
    pub fn records(&self) -> Vec<EventRecord> {
        self.records.lock().expect("record lock poisoned").clone()
    }

    /// Number of events recorded so far.
    ///
    /// # Panics
    ///
    /// Panics if the record mutex is poisoned.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.records.lock().expect("record lock poisoned").len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
