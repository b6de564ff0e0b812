//! The `validate` command: parse and limit-check schedules, run nothing.

use crate::cli::args::ValidateArgs;
use crate::crossing::train::ServiceClass;
use crate::error::RailgateError;
use crate::schedule::{self, ScheduleLimits};

/// Validates every given schedule file, stopping at the first failure.
///
/// # Errors
///
/// Returns the config error of the first schedule that fails to load.
pub fn run(args: &ValidateArgs) -> Result<(), RailgateError> {
    let limits = ScheduleLimits::default();

    for path in &args.files {
        let schedule = schedule::load(path, &limits)?;
        let counts = schedule.class_counts();
        let by_class: Vec<String> = ServiceClass::ALL
            .iter()
            .zip(counts)
            .filter(|&(_, count)| count > 0)
            .map(|(class, count)| format!("{class}: {count}"))
            .collect();
        tracing::info!(
            schedule = %path.display(),
            trains = schedule.len(),
            classes = by_class.join(", "),
            "schedule valid"
        );
    }

    Ok(())
}
