//! CLI argument definitions.
//!
//! All clap derive structs for `railgate` command-line parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// Root CLI
// ============================================================================

/// Single-track rail crossing scheduler and simulator.
#[derive(Parser, Debug)]
#[command(name = "railgate", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "RAILGATE_COLOR")]
    pub color: ColorChoice,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a crossing simulation from a schedule file.
    Run(RunArgs),

    /// Validate schedule files without running anything.
    Validate(ValidateArgs),
}

// ============================================================================
// Run / Validate
// ============================================================================

/// Arguments for `run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the schedule file (one `CODE LOAD CROSS` line per train).
    pub schedule: PathBuf,

    /// Wall-clock duration of one schedule tick.
    #[arg(
        long,
        default_value = "100ms",
        value_parser = humantime::parse_duration,
        env = "RAILGATE_TICK"
    )]
    pub tick: Duration,

    /// Crossing event output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Write crossing events to a file instead of stdout.
    #[arg(long)]
    pub events_file: Option<PathBuf>,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schedule files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for crossing events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines, one per event.
    #[default]
    Human,
    /// Newline-delimited JSON.
    Json,
}

// ============================================================================
// Tests
// ============================================================================
