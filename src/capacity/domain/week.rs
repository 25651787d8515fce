//! Calendar week windows and inclusive date ranges.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive 7-day span used as the time-series key.
///
/// The supplied start date is trusted as the intended start of the week; no
/// day-of-week snapping is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeeklyWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl WeeklyWindow {
    /// Resolves the canonical week window for the given start date.
    ///
    /// The end date is `start + 6` days, saturating at the calendar bound so
    /// the helper stays a total function.
    #[must_use]
    pub fn from_start(start: NaiveDate) -> Self {
        let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// Returns the first day of the window.
    #[must_use]
    pub const fn start(self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the window.
    #[must_use]
    pub const fn end(self) -> NaiveDate {
        self.end
    }
}

/// Inclusive date range for time-series queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First date included in the range.
    pub start: NaiveDate,
    /// Last date included in the range.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates an inclusive range.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Returns whether the date falls within the range, bounds included.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
