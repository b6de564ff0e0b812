//! `railgate` — single-track rail crossing scheduler and simulator.
//!
//! Independently-timed trains load in parallel, then compete for exclusive
//! access to one shared track. A single arbiter grants crossings by
//! priority, load-completion order, and direction fairness, with fully
//! deterministic tie-breaks.

pub mod cli;
pub mod crossing;
pub mod error;
pub mod observability;
pub mod schedule;
