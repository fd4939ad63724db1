//! Weeks-to-years conversion for the status line.

use std::fmt;

use crusher_types::WeekCount;

pub const WEEKS_PER_YEAR: WeekCount = 52;

/// Time spent playing, derived from the number of weeks drawn.
///
/// Display only; nothing in the run depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YearTally {
    weeks: WeekCount,
}

impl YearTally {
    #[must_use]
    pub fn from_weeks(weeks: WeekCount) -> Self {
        Self { weeks }
    }

    #[must_use]
    pub fn weeks(self) -> WeekCount {
        self.weeks
    }

    /// Whole years elapsed.
    #[must_use]
    pub fn years(self) -> WeekCount {
        self.weeks / WEEKS_PER_YEAR
    }

    /// Weeks into the current year.
    #[must_use]
    pub fn leftover_weeks(self) -> WeekCount {
        self.weeks % WEEKS_PER_YEAR
    }
}

impl fmt::Display for YearTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.years() {
            1 => write!(f, "1 year spent"),
            years => write!(f, "{years} years spent"),
        }
    }
}
