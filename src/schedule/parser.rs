//! Schedule file parser.
//!
//! One train per non-blank line, `CODE LOAD CROSS`, whitespace separated.
//! Ids are assigned by line order, 0-based. Every failure mode is a
//! [`ConfigError`] naming the file and line — schedules are rejected
//! whole, never partially admitted.

use std::path::Path;

use crate::crossing::train::{ServiceClass, Train, TrainId};
use crate::error::ConfigError;
use crate::schedule::{Schedule, ScheduleLimits};

/// Loads and parses a schedule file.
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] if `path` does not exist,
/// [`ConfigError::Unreadable`] for any other read failure, and whatever
/// [`parse_str`] reports for the content.
pub fn load(path: &Path, limits: &ScheduleLimits) -> Result<Schedule, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::MissingFile {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_str(&raw, path, limits)
}

/// Parses schedule text. `path` is used only for error reporting.
///
/// # Errors
///
/// Returns a [`ConfigError`] for malformed lines, unknown station codes,
/// unparsable or over-limit durations, empty schedules, and schedules
/// exceeding the train cap.
pub fn parse_str(
    input: &str,
    path: &Path,
    limits: &ScheduleLimits,
) -> Result<Schedule, ConfigError> {
    let mut trains = Vec::new();

    for (index, raw_line) in input.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }
        trains.push(parse_line(trimmed, path, line, TrainId(trains.len()), limits)?);
    }

    if trains.is_empty() {
        return Err(ConfigError::EmptySchedule {
            path: path.to_path_buf(),
        });
    }
    if trains.len() > limits.max_trains {
        return Err(ConfigError::TooManyTrains {
            path: path.to_path_buf(),
            count: trains.len(),
            limit: limits.max_trains,
        });
    }

    Ok(Schedule::from_trains(trains))
}

fn parse_line(
    line: &str,
    path: &Path,
    line_no: usize,
    id: TrainId,
    limits: &ScheduleLimits,
) -> Result<Train, ConfigError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [code, load, cross] = fields.as_slice() else {
        return Err(ConfigError::ParseError {
            path: path.to_path_buf(),
            line: line_no,
            message: format!("expected `CODE LOAD CROSS`, found {} field(s)", fields.len()),
        });
    };

    let mut chars = code.chars();
    let class = match (chars.next(), chars.next()) {
        (Some(c), None) => ServiceClass::from_code(c).ok_or_else(|| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: line_no,
            message: format!("unknown station code `{c}` (expected E, e, W, or w)"),
        })?,
        _ => {
            return Err(ConfigError::ParseError {
                path: path.to_path_buf(),
                line: line_no,
                message: format!("station code must be a single character, found `{code}`"),
            });
        }
    };

    let load_ticks = parse_ticks(load, "load", path, line_no, limits)?;
    let cross_ticks = parse_ticks(cross, "cross", path, line_no, limits)?;

    Ok(Train {
        id,
        direction: class.direction,
        priority: class.priority,
        load_ticks,
        cross_ticks,
    })
}

fn parse_ticks(
    field: &str,
    what: &str,
    path: &Path,
    line_no: usize,
    limits: &ScheduleLimits,
) -> Result<u64, ConfigError> {
    let value: u64 = field.parse().map_err(|_| ConfigError::ParseError {
        path: path.to_path_buf(),
        line: line_no,
        message: format!("{what} duration `{field}` is not a non-negative integer"),
    })?;
    if value > limits.max_ticks {
        return Err(ConfigError::DurationTooLong {
            path: path.to_path_buf(),
            line: line_no,
            value,
            limit: limits.max_ticks,
        });
    }
    Ok(value)
}
