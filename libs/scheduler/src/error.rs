//! Errors raised by board operations.

use thiserror::Error;

use crate::package::WeekNumber;

/// A board operation that was rejected.
///
/// The `Display` text is shown to users verbatim, so it is part of the
/// contract rather than an implementation detail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The destination week already holds its maximum number of packages.
    #[error("Cannot add more than {capacity} packages to Week {week}")]
    WeekFull { week: WeekNumber, capacity: usize },
}
