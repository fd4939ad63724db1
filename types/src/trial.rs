//! Run lifecycle and the events a run reports.

use crate::Draw;

/// Completed trials in a run. One trial is one simulated week.
pub type WeekCount = u64;

/// Lifecycle of a trial run.
///
/// ```text
/// Idle -> Running -> Won
///                 -> Stopped
/// ```
///
/// `Won` and `Stopped` are terminal; a new run starts from `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrialPhase {
    #[default]
    Idle,
    Running,
    Stopped,
    Won,
}

impl TrialPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TrialPhase::Idle => "idle",
            TrialPhase::Running => "running",
            TrialPhase::Stopped => "stopped",
            TrialPhase::Won => "won",
        }
    }
}

/// Notification from the background loop to whoever hosts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialEvent {
    /// A week was played.
    Tick {
        weeks: WeekCount,
        draw: Draw,
        matches: usize,
    },
    /// The whole selection came up. Terminal.
    Won { weeks: WeekCount, matches: usize },
    /// The run was cancelled. Terminal.
    Stopped { weeks: WeekCount },
}

impl TrialEvent {
    #[must_use]
    pub fn weeks(&self) -> WeekCount {
        match self {
            TrialEvent::Tick { weeks, .. }
            | TrialEvent::Won { weeks, .. }
            | TrialEvent::Stopped { weeks } => *weeks,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TrialEvent::Won { .. } | TrialEvent::Stopped { .. })
    }
}
