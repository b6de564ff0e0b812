//! Schedule loading — the input collaborator.
//!
//! A schedule is a plain-text file with one train per line:
//!
//! ```text
//! E 5 10
//! w 3 2
//! ```
//!
//! where the station code (`E`, `e`, `W`, `w`) selects direction and
//! priority, and the two integers are load and cross durations in ticks.
//! Malformed input is a fatal configuration error; no partial run starts.

pub mod parser;

pub use parser::{load, parse_str};

use crate::crossing::train::{ServiceClass, Train};

/// A validated, immutable set of train descriptors in schedule order.
#[derive(Debug, Clone)]
pub struct Schedule {
    trains: Vec<Train>,
}

impl Schedule {
    pub(crate) const fn from_trains(trains: Vec<Train>) -> Self {
        Self { trains }
    }

    /// Trains in schedule order; a train's position is its id.
    #[must_use]
    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    /// Number of trains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trains.len()
    }

    /// Whether the schedule holds no trains. Always false for schedules
    /// produced by the parser, which rejects empty input.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }

    /// Train counts per service class, in [`ServiceClass::ALL`] order.
    #[must_use]
    pub fn class_counts(&self) -> [usize; ServiceClass::COUNT] {
        let mut counts = [0; ServiceClass::COUNT];
        for train in &self.trains {
            counts[train.class().index()] += 1;
        }
        counts
    }
}

/// Caps on schedule size, overridable through the environment.
#[derive(Debug, Clone)]
pub struct ScheduleLimits {
    /// Maximum number of trains (`RAILGATE_MAX_TRAINS`).
    pub max_trains: usize,

    /// Maximum load or cross duration in ticks (`RAILGATE_MAX_TICKS`).
    pub max_ticks: u64,
}

impl Default for ScheduleLimits {
    fn default() -> Self {
        Self {
            max_trains: env_or("RAILGATE_MAX_TRAINS", 4096),
            max_ticks: env_or("RAILGATE_MAX_TICKS", 36_000),
        }
    }
}

/// Reads a limit from the environment, falling back to `default` when the
/// variable is unset or unparsable.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
