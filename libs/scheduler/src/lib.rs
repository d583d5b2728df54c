//! # shipdeck-scheduler
//!
//! Pure state machine for the drag-and-drop package scheduler: an
//! unscheduled pool of packages, a rolling four-week calendar, and a
//! capacity rule of seven packages per week.
//!
//! The crate is IO-free. Callers feed it completed drag gestures and a
//! clock reading; it returns what happened and keeps its invariants:
//!
//! - every package is in the pool or on exactly one week, never both
//! - display numbers are allocated smallest-free-first and survive
//!   scheduling round trips
//! - a full week rejects further packages and posts a transient notice
//!   that auto-dismisses after three seconds
//!
//! The HTTP gateway wraps a [`ScheduleBoard`] in a mutex; the board itself
//! knows nothing about transport or persistence.

mod board;
mod error;
mod notice;
mod package;
mod week;

pub use board::{Destination, DragEnd, DragOutcome, ScheduleBoard, WEEK_CAPACITY};
pub use error::ScheduleError;
pub use notice::{Notice, NOTICE_TTL_SECS};
pub use package::{Package, ScheduledPackage, WeekNumber};
pub use week::{upcoming_weeks, WeekWindow, CALENDAR_WEEKS};
