//! The player's ticket and the difficulty that sizes it.
//!
//! Existence of a [`Selection`] is the proof that the ticket is valid: it holds
//! 5, 6 or 7 distinct numbers from the lottery grid.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{LOTTO_RANGE, NumberRange};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("selection must hold 5, 6 or 7 numbers (got {0})")]
    InvalidSize(usize),
    #[error("number {number} is outside the grid {range}")]
    OutOfRange { number: u32, range: NumberRange },
    #[error("number {0} was picked twice")]
    Duplicate(u32),
    #[error("difficulty must be 5, 6 or 7 (got {0})")]
    InvalidDifficulty(u8),
}

/// How many numbers a ticket holds. Every one of them must come up to win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    Five,
    Six,
    #[default]
    Seven,
}

impl Difficulty {
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Difficulty::Five => 5,
            Difficulty::Six => 6,
            Difficulty::Seven => 7,
        }
    }

    fn from_size(size: usize) -> Option<Self> {
        match size {
            5 => Some(Difficulty::Five),
            6 => Some(Difficulty::Six),
            7 => Some(Difficulty::Seven),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = SelectionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_size(usize::from(value)).ok_or(SelectionError::InvalidDifficulty(value))
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.size() as u8
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} numbers", self.size())
    }
}

/// A validated ticket: distinct numbers from the grid, sized by a [`Difficulty`].
///
/// Immutable once built; a run holds it read-only for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct Selection {
    numbers: BTreeSet<u32>,
    difficulty: Difficulty,
}

impl Selection {
    pub fn new(numbers: impl IntoIterator<Item = u32>) -> Result<Self, SelectionError> {
        let mut set = BTreeSet::new();
        for number in numbers {
            if !LOTTO_RANGE.contains(number) {
                return Err(SelectionError::OutOfRange {
                    number,
                    range: LOTTO_RANGE,
                });
            }
            if !set.insert(number) {
                return Err(SelectionError::Duplicate(number));
            }
        }
        let difficulty =
            Difficulty::from_size(set.len()).ok_or(SelectionError::InvalidSize(set.len()))?;
        Ok(Self {
            numbers: set,
            difficulty,
        })
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn contains(&self, number: u32) -> bool {
        self.numbers.contains(&number)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.numbers.iter().copied()
    }

    #[must_use]
    pub fn as_set(&self) -> &BTreeSet<u32> {
        &self.numbers
    }
}

impl TryFrom<Vec<u32>> for Selection {
    type Error = SelectionError;

    fn try_from(value: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Selection> for Vec<u32> {
    fn from(value: Selection) -> Self {
        value.numbers.into_iter().collect()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numbers: Vec<String> = self.numbers.iter().map(ToString::to_string).collect();
        f.write_str(&numbers.join(", "))
    }
}
