//! Number ranges and drawn number sets.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("range {low}..={high} is inverted")]
    InvertedRange { low: u32, high: u32 },
    #[error("cannot draw {count} distinct numbers from a range of {available}")]
    CountExceedsRange { count: usize, available: u64 },
    #[error("number {0} appears more than once in a draw")]
    Duplicate(u32),
}

/// Inclusive integer range numbers are drawn from.
///
/// Invariant: `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumberRange {
    low: u32,
    high: u32,
}

impl NumberRange {
    pub fn new(low: u32, high: u32) -> Result<Self, DrawError> {
        if low > high {
            return Err(DrawError::InvertedRange { low, high });
        }
        Ok(Self { low, high })
    }

    /// Const constructor for ranges known at compile time.
    #[must_use]
    pub const fn new_const(low: u32, high: u32) -> Self {
        assert!(low <= high, "NumberRange must not be inverted");
        Self { low, high }
    }

    #[must_use]
    pub const fn low(self) -> u32 {
        self.low
    }

    #[must_use]
    pub const fn high(self) -> u32 {
        self.high
    }

    /// Count of integers in the range. `u64` so `0..=u32::MAX` fits.
    #[must_use]
    pub const fn len(self) -> u64 {
        (self.high - self.low) as u64 + 1
    }

    #[must_use]
    pub const fn contains(self, value: u32) -> bool {
        value >= self.low && value <= self.high
    }

    /// Fail unless `count` distinct numbers can be taken from this range.
    pub fn check_capacity(self, count: usize) -> Result<(), DrawError> {
        if count as u64 > self.len() {
            return Err(DrawError::CountExceedsRange {
                count,
                available: self.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for NumberRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.low, self.high)
    }
}

/// One week's drawn numbers. Distinct, kept in ascending order.
///
/// A draw is replaced every trial, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draw(BTreeSet<u32>);

impl Draw {
    /// Build a draw from explicit numbers, rejecting repeats.
    pub fn try_from_numbers(numbers: impl IntoIterator<Item = u32>) -> Result<Self, DrawError> {
        let mut set = BTreeSet::new();
        for number in numbers {
            if !set.insert(number) {
                return Err(DrawError::Duplicate(number));
            }
        }
        Ok(Self(set))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, number: u32) -> bool {
        self.0.contains(&number)
    }

    /// Numbers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn as_set(&self) -> &BTreeSet<u32> {
        &self.0
    }
}

impl From<BTreeSet<u32>> for Draw {
    fn from(value: BTreeSet<u32>) -> Self {
        Self(value)
    }
}

impl fmt::Display for Draw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for number in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{number:>2}")?;
            first = false;
        }
        Ok(())
    }
}
