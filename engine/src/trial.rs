//! The trial loop state machine.
//!
//! Pure state: no threads, no sleeping, no randomness. [`crate::TrialRunner`]
//! drives it from a background thread; tests drive it with forced draws.

use thiserror::Error;

use crusher_core::{count_matches, is_win};
use crusher_types::{Draw, Selection, TrialPhase, WeekCount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrialError {
    #[error("a run can only start from idle (currently {})", .0.as_str())]
    NotIdle(TrialPhase),
    #[error("no run in progress (currently {})", .0.as_str())]
    NotRunning(TrialPhase),
}

/// What one played week produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Partial or no overlap; the run goes on.
    Continue { weeks: WeekCount, matches: usize },
    /// Every number on the ticket came up; the run is over.
    Won { weeks: WeekCount, matches: usize },
}

impl Step {
    #[must_use]
    pub fn weeks(self) -> WeekCount {
        match self {
            Step::Continue { weeks, .. } | Step::Won { weeks, .. } => weeks,
        }
    }

    #[must_use]
    pub fn matches(self) -> usize {
        match self {
            Step::Continue { matches, .. } | Step::Won { matches, .. } => matches,
        }
    }
}

/// Run state: the ticket being played and how many weeks it has been played.
///
/// ```text
/// Idle --start--> Running --step(win)--> Won
///                         --stop-------> Stopped
/// Won | Stopped --reset--> Idle
/// ```
#[derive(Debug, Default)]
pub struct TrialLoop {
    phase: TrialPhase,
    weeks: WeekCount,
    selection: Option<Selection>,
}

impl TrialLoop {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, selection: Selection) -> Result<(), TrialError> {
        if self.phase != TrialPhase::Idle {
            return Err(TrialError::NotIdle(self.phase));
        }
        self.phase = TrialPhase::Running;
        self.weeks = 0;
        self.selection = Some(selection);
        Ok(())
    }

    /// Score one week's draw against the ticket.
    ///
    /// The week counter moves by exactly one per call. Only a full match ends the run.
    pub fn step(&mut self, draw: &Draw) -> Result<Step, TrialError> {
        let selection = match (&self.selection, self.phase) {
            (Some(selection), TrialPhase::Running) => selection,
            _ => return Err(TrialError::NotRunning(self.phase)),
        };

        let matches = count_matches(selection, draw);
        self.weeks += 1;

        if is_win(selection, matches) {
            self.phase = TrialPhase::Won;
            Ok(Step::Won {
                weeks: self.weeks,
                matches,
            })
        } else {
            Ok(Step::Continue {
                weeks: self.weeks,
                matches,
            })
        }
    }

    /// Cancel a running trial. Returns the weeks played.
    pub fn stop(&mut self) -> Result<WeekCount, TrialError> {
        if self.phase != TrialPhase::Running {
            return Err(TrialError::NotRunning(self.phase));
        }
        self.phase = TrialPhase::Stopped;
        Ok(self.weeks)
    }

    /// Back to idle. The ticket is dropped; the next run brings its own.
    pub fn reset(&mut self) {
        self.phase = TrialPhase::Idle;
        self.weeks = 0;
        self.selection = None;
    }

    #[must_use]
    pub fn phase(&self) -> TrialPhase {
        self.phase
    }

    #[must_use]
    pub fn weeks_elapsed(&self) -> WeekCount {
        self.weeks
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }
}
