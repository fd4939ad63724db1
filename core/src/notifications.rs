//! Short notices shown to the player.
//!
//! These replace the toast and system notification of a mobile build: a closed
//! set of events the host may surface, and a small bounded log of the most
//! recent ones for the status area.

use std::collections::VecDeque;

use crusher_types::{Difficulty, TickInterval, WeekCount};

use crate::YearTally;

/// Something the player should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Every number on the ticket came up.
    Won { weeks: WeekCount, matches: usize },
    /// The player stopped the run.
    Stopped { weeks: WeekCount },
    /// Start was requested with an unfinished ticket.
    TicketIncomplete { remaining: usize },
    /// Start was refused for another reason.
    StartFailed { reason: String },
    SpeedChanged(TickInterval),
    DifficultyChanged(Difficulty),
}

impl Notice {
    #[must_use]
    pub fn format(&self) -> String {
        match self {
            Self::Won { weeks, matches } => format!(
                "You won! Found {matches} of the same numbers after {weeks} weeks ({}).",
                YearTally::from_weeks(*weeks)
            ),
            Self::Stopped { weeks } => format!("Stopped after {weeks} weeks."),
            Self::TicketIncomplete { remaining: 1 } => "Pick 1 more number first.".to_string(),
            Self::TicketIncomplete { remaining } => {
                format!("Pick {remaining} more numbers first.")
            }
            Self::StartFailed { reason } => format!("Could not start: {reason}"),
            Self::SpeedChanged(interval) => format!("One week now takes {interval}."),
            Self::DifficultyChanged(difficulty) => {
                format!("Tickets now hold {difficulty}.")
            }
        }
    }

    #[must_use]
    pub fn is_victory(&self) -> bool {
        matches!(self, Self::Won { .. })
    }
}

/// Most recent notices, oldest first. Consecutive duplicates are collapsed.
#[derive(Debug)]
pub struct NoticeLog {
    entries: VecDeque<Notice>,
    capacity: usize,
}

impl NoticeLog {
    pub const DEFAULT_CAPACITY: usize = 4;

    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, notice: Notice) {
        if self.entries.back() == Some(&notice) {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(notice);
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Notice> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Notice> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NoticeLog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_format() {
        assert_eq!(
            Notice::Won {
                weeks: 104,
                matches: 7
            }
            .format(),
            "You won! Found 7 of the same numbers after 104 weeks (2 years spent)."
        );
        assert_eq!(
            Notice::TicketIncomplete { remaining: 1 }.format(),
            "Pick 1 more number first."
        );
        assert_eq!(
            Notice::TicketIncomplete { remaining: 3 }.format(),
            "Pick 3 more numbers first."
        );
        assert_eq!(
            Notice::SpeedChanged(TickInterval::DEFAULT).format(),
            "One week now takes 550 ms."
        );
        assert_eq!(
            Notice::DifficultyChanged(Difficulty::Six).format(),
            "Tickets now hold 6 numbers."
        );
    }

    #[test]
    fn log_is_bounded() {
        let mut log = NoticeLog::new(2);
        log.push(Notice::Stopped { weeks: 1 });
        log.push(Notice::Stopped { weeks: 2 });
        log.push(Notice::Stopped { weeks: 3 });
        assert_eq!(log.len(), 2);
        let weeks: Vec<_> = log
            .iter()
            .map(|n| match n {
                Notice::Stopped { weeks } => *weeks,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(weeks, vec![2, 3]);
    }

    #[test]
    fn log_collapses_consecutive_duplicates() {
        let mut log = NoticeLog::default();
        log.push(Notice::SpeedChanged(TickInterval::DEFAULT));
        log.push(Notice::SpeedChanged(TickInterval::DEFAULT));
        assert_eq!(log.len(), 1);
        log.push(Notice::Stopped { weeks: 0 });
        log.push(Notice::SpeedChanged(TickInterval::DEFAULT));
        assert_eq!(log.len(), 3);
        assert!(!log.latest().unwrap().is_victory());
    }
}
