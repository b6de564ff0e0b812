//! Error types and exit codes for `railgate`.
//!
//! Two failure kinds exist: configuration errors, which are fatal before
//! any concurrent work starts, and scheduler errors, which signal a
//! programming defect in the synchronization protocol and abort the run —
//! partial state (a train permanently unpublished, a grant lost) cannot
//! safely resume, so nothing is ever retried.

use std::path::PathBuf;
use thiserror::Error;

use crate::crossing::train::{TrainId, TrainPhase};

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `railgate` CLI operations, following Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    pub const ERROR: i32 = 1;

    /// Configuration error (missing or malformed schedule).
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied).
    pub const IO_ERROR: i32 = 3;

    /// Scheduler error (synchronization invariant violated mid-run).
    pub const SCHEDULER_ERROR: i32 = 5;

    /// Usage error (invalid arguments).
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C).
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM.
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type aggregating all domain-specific errors.
#[derive(Debug, Error)]
pub enum RailgateError {
    /// Schedule loading or validation error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Synchronization protocol violation during a run.
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RailgateError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Scheduler(_) => ExitCode::SCHEDULER_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Schedule loading and validation errors.
///
/// All of these are fatal at startup: the process reports them and exits
/// before a single load task is spawned.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Schedule file does not exist.
    #[error("schedule not found: {path}")]
    MissingFile {
        /// Path that was requested.
        path: PathBuf,
    },

    /// Schedule file exists but could not be read.
    #[error("cannot read schedule {path}: {source}")]
    Unreadable {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A schedule line does not match `CODE LOAD CROSS`.
    #[error("{path}:{line}: {message}")]
    ParseError {
        /// Schedule file being parsed.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// The schedule contains no trains.
    #[error("schedule {path} contains no trains")]
    EmptySchedule {
        /// Schedule file being parsed.
        path: PathBuf,
    },

    /// More trains than the configured cap.
    #[error("schedule {path} has {count} trains (limit {limit})")]
    TooManyTrains {
        /// Schedule file being parsed.
        path: PathBuf,
        /// Number of trains found.
        count: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// A duration exceeds the configured tick cap.
    #[error("{path}:{line}: duration {value} exceeds limit {limit}")]
    DurationTooLong {
        /// Schedule file being parsed.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Offending tick count.
        value: u64,
        /// Configured maximum.
        limit: u64,
    },
}

// ============================================================================
// Scheduler Errors
// ============================================================================

/// Synchronization protocol violations.
///
/// Every variant is a defect signal, not an operational condition: once
/// trains are running, each sleep and rendezvous is expected to succeed.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// All load-task senders dropped while trains were still outstanding.
    #[error("readiness channel closed before every train crossed")]
    ReadinessChannelClosed,

    /// The arbiter selected from an empty frontier.
    #[error("selection attempted on an empty ready frontier")]
    EmptyFrontier,

    /// A train was selected that is not waiting in the ready frontier.
    #[error("train {0} is not in the ready frontier")]
    NotInFrontier(TrainId),

    /// The arbiter tried to grant the same train a second crossing.
    #[error("train {0} was granted the track twice")]
    DoubleGrant(TrainId),

    /// A load task dropped its grant receiver before being granted.
    #[error("load task for train {0} vanished before its crossing grant")]
    TaskVanished(TrainId),

    /// The arbiter went away before a train could signal readiness or
    /// receive its grant.
    #[error("arbiter stopped while train {0} was still waiting")]
    ArbiterGone(TrainId),

    /// A selected train was not in the phase the protocol requires.
    #[error("train {train} was {found:?} at selection, expected {expected:?}")]
    PhaseViolation {
        /// Train that was mis-phased.
        train: TrainId,
        /// Phase the protocol requires at this point.
        expected: TrainPhase,
        /// Phase actually observed.
        found: TrainPhase,
    },

    /// A load task panicked or was cancelled.
    #[error("load task for train {0} failed: {1}")]
    TaskFailed(TrainId, String),
}

/// Result type alias for `railgate` operations.
pub type Result<T> = std::result::Result<T, RailgateError>;

// ============================================================================
// Tests
// ============================================================================
