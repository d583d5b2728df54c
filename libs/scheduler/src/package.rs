//! Packages and their scheduled form.

use serde::{Deserialize, Serialize};
use shipdeck_id::PackageId;

/// ISO-8601 week number a package can be assigned to.
pub type WeekNumber = u32;

/// A package waiting in the unscheduled pool.
///
/// The display number is allocated when the package is created and stays
/// attached to the package for its whole lifetime, through scheduling and
/// unscheduling. Only deleting the package frees the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: PackageId,
    pub number: u32,
}

impl Package {
    pub(crate) fn new(number: u32) -> Self {
        Self {
            id: PackageId::new(),
            number,
        }
    }

    /// Human-facing label, e.g. `Package 3`.
    pub fn title(&self) -> String {
        format!("Package {}", self.number)
    }

    pub(crate) fn schedule_into(self, week: WeekNumber) -> ScheduledPackage {
        ScheduledPackage {
            id: self.id,
            number: self.number,
            week,
        }
    }
}

/// A package assigned to exactly one calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledPackage {
    pub id: PackageId,
    pub number: u32,
    pub week: WeekNumber,
}

impl ScheduledPackage {
    /// Human-facing label, e.g. `Package 3`.
    pub fn title(&self) -> String {
        format!("Package {}", self.number)
    }

    pub(crate) fn unschedule(self) -> Package {
        Package {
            id: self.id,
            number: self.number,
        }
    }
}
