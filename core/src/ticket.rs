//! Picking numbers on the grid before a run.

use crusher_types::{Difficulty, LOTTO_RANGE, Selection};

/// Result of toggling one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Picked,
    Unpicked,
    /// The ticket already holds as many numbers as the difficulty allows.
    Full,
    /// Not a number on the grid.
    OffGrid,
}

/// A ticket being filled in. Numbers keep the order they were picked in.
///
/// Once the draft holds `difficulty.size()` numbers every other cell is
/// locked until something is unpicked.
#[derive(Debug, Clone, Default)]
pub struct TicketDraft {
    picked: Vec<u32>,
    difficulty: Difficulty,
}

impl TicketDraft {
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            picked: Vec::new(),
            difficulty,
        }
    }

    pub fn toggle(&mut self, number: u32) -> ToggleOutcome {
        if !LOTTO_RANGE.contains(number) {
            return ToggleOutcome::OffGrid;
        }
        if let Some(pos) = self.picked.iter().position(|&n| n == number) {
            self.picked.remove(pos);
            return ToggleOutcome::Unpicked;
        }
        if self.is_full() {
            return ToggleOutcome::Full;
        }
        self.picked.push(number);
        ToggleOutcome::Picked
    }

    /// Change how many numbers the ticket takes.
    ///
    /// When the new size is smaller, the most recent picks are dropped and returned.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Vec<u32> {
        self.difficulty = difficulty;
        if self.picked.len() > difficulty.size() {
            self.picked.split_off(difficulty.size())
        } else {
            Vec::new()
        }
    }

    pub fn clear(&mut self) {
        self.picked.clear();
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn is_picked(&self, number: u32) -> bool {
        self.picked.contains(&number)
    }

    /// A cell that cannot be picked right now.
    #[must_use]
    pub fn is_locked(&self, number: u32) -> bool {
        self.is_full() && !self.is_picked(number)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.picked.len() >= self.difficulty.size()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.difficulty.size().saturating_sub(self.picked.len())
    }

    #[must_use]
    pub fn picked(&self) -> &[u32] {
        &self.picked
    }

    /// The finished ticket, once every slot is filled.
    #[must_use]
    pub fn to_selection(&self) -> Option<Selection> {
        if !self.is_full() {
            return None;
        }
        Selection::new(self.picked.iter().copied()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picking_and_unpicking() {
        let mut draft = TicketDraft::new(Difficulty::Five);
        assert_eq!(draft.toggle(12), ToggleOutcome::Picked);
        assert!(draft.is_picked(12));
        assert_eq!(draft.remaining(), 4);
        assert_eq!(draft.toggle(12), ToggleOutcome::Unpicked);
        assert!(!draft.is_picked(12));
        assert_eq!(draft.remaining(), 5);
    }

    #[test]
    fn full_draft_locks_remaining_cells() {
        let mut draft = TicketDraft::new(Difficulty::Five);
        for n in [1, 2, 3, 4, 5] {
            assert_eq!(draft.toggle(n), ToggleOutcome::Picked);
        }
        assert!(draft.is_full());
        assert!(draft.is_locked(6));
        assert!(!draft.is_locked(3));
        assert_eq!(draft.toggle(6), ToggleOutcome::Full);

        assert_eq!(draft.toggle(3), ToggleOutcome::Unpicked);
        assert!(!draft.is_locked(6));
        assert_eq!(draft.toggle(6), ToggleOutcome::Picked);
    }

    #[test]
    fn off_grid_numbers_are_ignored() {
        let mut draft = TicketDraft::default();
        assert_eq!(draft.toggle(0), ToggleOutcome::OffGrid);
        assert_eq!(draft.toggle(40), ToggleOutcome::OffGrid);
        assert!(draft.picked().is_empty());
    }

    #[test]
    fn selection_only_when_full() {
        let mut draft = TicketDraft::new(Difficulty::Six);
        for n in [10, 20, 30, 5, 15] {
            draft.toggle(n);
        }
        assert!(draft.to_selection().is_none());
        draft.toggle(25);
        let selection = draft.to_selection().unwrap();
        assert_eq!(selection.difficulty(), Difficulty::Six);
        assert_eq!(
            selection.iter().collect::<Vec<_>>(),
            vec![5, 10, 15, 20, 25, 30]
        );
    }

    #[test]
    fn lowering_difficulty_drops_latest_picks() {
        let mut draft = TicketDraft::new(Difficulty::Seven);
        for n in [7, 6, 5, 4, 3, 2, 1] {
            draft.toggle(n);
        }
        let dropped = draft.set_difficulty(Difficulty::Five);
        assert_eq!(dropped, vec![2, 1]);
        assert_eq!(draft.picked(), &[7, 6, 5, 4, 3]);
        assert!(draft.is_full());

        assert!(draft.set_difficulty(Difficulty::Six).is_empty());
        assert_eq!(draft.remaining(), 1);
    }
}
