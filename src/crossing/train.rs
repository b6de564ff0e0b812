//! Train records and service classification.
//!
//! A train is described entirely by its schedule line: which of the four
//! loading stations it departs from and how many ticks its load and cross
//! phases take. Everything here is immutable after parsing; the mutable
//! lifecycle phase lives in the shared yard state.

use serde::Serialize;

// ============================================================================
// Identity
// ============================================================================

/// Stable train identifier, assigned by schedule line order (0-based).
///
/// Ids are never reused and double as the final tie-break key when two
/// trains are otherwise indistinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TrainId(pub usize);

impl TrainId {
    /// Returns the id as a plain index into per-train tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for TrainId {
    // Delegates so callers' width and alignment flags apply.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// Direction / Priority
// ============================================================================

/// Travel direction across the single shared track.
///
/// Also the type of the arbiter's `Turn` tie-break state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    /// Eastbound.
    East,
    /// Westbound.
    West,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::East => write!(f, "East"),
            Self::West => write!(f, "West"),
        }
    }
}

/// Crossing priority. High-priority trains always win selection over
/// low-priority ones, regardless of direction or load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    /// Takes precedence over every low-priority train.
    High,
    /// Crosses only when no high-priority train is ready.
    Low,
}

// ============================================================================
// Service class (one loading station per class)
// ============================================================================

/// One of the four loading stations, keyed by (direction, priority).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceClass {
    /// Direction trains from this station travel.
    pub direction: Direction,
    /// Priority of trains from this station.
    pub priority: Priority,
}

impl ServiceClass {
    /// Number of distinct classes (and therefore station queues).
    pub const COUNT: usize = 4;

    /// All classes in table order: `E`, `e`, `W`, `w`.
    pub const ALL: [Self; Self::COUNT] = [
        Self {
            direction: Direction::East,
            priority: Priority::High,
        },
        Self {
            direction: Direction::East,
            priority: Priority::Low,
        },
        Self {
            direction: Direction::West,
            priority: Priority::High,
        },
        Self {
            direction: Direction::West,
            priority: Priority::Low,
        },
    ];

    /// Maps a schedule station code to its class.
    ///
    /// Uppercase is high priority, `E`/`e` eastbound, `W`/`w` westbound.
    /// Returns `None` for any other character.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'E' => Some(Self::ALL[0]),
            'e' => Some(Self::ALL[1]),
            'W' => Some(Self::ALL[2]),
            'w' => Some(Self::ALL[3]),
            _ => None,
        }
    }

    /// The schedule station code for this class.
    #[must_use]
    pub const fn code(self) -> char {
        match (self.direction, self.priority) {
            (Direction::East, Priority::High) => 'E',
            (Direction::East, Priority::Low) => 'e',
            (Direction::West, Priority::High) => 'W',
            (Direction::West, Priority::Low) => 'w',
        }
    }

    /// Index into per-class tables, matching [`Self::ALL`] order.
    #[must_use]
    pub const fn index(self) -> usize {
        match (self.direction, self.priority) {
            (Direction::East, Priority::High) => 0,
            (Direction::East, Priority::Low) => 1,
            (Direction::West, Priority::High) => 2,
            (Direction::West, Priority::Low) => 3,
        }
    }
}

impl std::fmt::Display for ServiceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:?}", self.direction, self.priority)
    }
}

// ============================================================================
// Train
// ============================================================================

/// Immutable per-train attributes from the schedule.
///
/// Durations are in ticks; the wall-clock length of a tick is fixed by
/// [`SimOptions`](crate::crossing::SimOptions) at run time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    /// Stable identity, assigned by schedule line order.
    pub id: TrainId,
    /// Travel direction.
    pub direction: Direction,
    /// Crossing priority.
    pub priority: Priority,
    /// Ticks spent loading before the train can compete for the track.
    pub load_ticks: u64,
    /// Ticks spent occupying the track once granted.
    pub cross_ticks: u64,
}

impl Train {
    /// The loading station this train is admitted to.
    #[must_use]
    pub const fn class(&self) -> ServiceClass {
        ServiceClass {
            direction: self.direction,
            priority: self.priority,
        }
    }
}

/// Lifecycle phase of a train during one run.
///
/// Transitions strictly forward: `Pending → Loading → Ready → Crossing → Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrainPhase {
    /// Created from the schedule, load task not yet released.
    Pending,
    /// Load task is sleeping its load duration.
    Loading,
    /// Published into the ready set, waiting for a crossing grant.
    Ready,
    /// Granted exclusive track access, sleeping its cross duration.
    Crossing,
    /// Crossed and joined; the run no longer tracks this train.
    Done,
}

// ============================================================================
// Tests
// ============================================================================
