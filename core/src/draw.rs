//! Drawing distinct numbers from a range.
//!
//! Sampling goes through [`RandomSource`] so tests can script exactly which
//! numbers come up. Production code uses [`ThreadRandom`].

use std::collections::BTreeSet;
#[cfg(any(test, feature = "test-support"))]
use std::collections::VecDeque;

use crusher_types::{DRAW_SIZE, Draw, DrawError, LOTTO_RANGE, NumberRange};

/// Uniform integer source.
///
/// Implementations must return a value inside `range` (inclusive on both ends).
pub trait RandomSource: Send {
    fn next_in(&mut self, range: NumberRange) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_in(&mut self, range: NumberRange) -> u32 {
        (**self).next_in(range)
    }
}

/// Thread-local generator from `rand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_in(&mut self, range: NumberRange) -> u32 {
        rand::random_range(range.low()..=range.high())
    }
}

/// Replays a fixed sequence of values, cycling when it runs out.
///
/// Values outside the requested range are clamped into it. An empty script
/// always yields the low end of the range.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: VecDeque<u32>,
}

#[cfg(any(test, feature = "test-support"))]
impl ScriptedRandom {
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Script that produces `draws` in order, then repeats them.
    #[must_use]
    pub fn from_draws<'a>(draws: impl IntoIterator<Item = &'a Draw>) -> Self {
        Self::new(draws.into_iter().flat_map(Draw::iter).collect::<Vec<_>>())
    }
}

#[cfg(any(test, feature = "test-support"))]
impl RandomSource for ScriptedRandom {
    fn next_in(&mut self, range: NumberRange) -> u32 {
        let value = self.values.pop_front().unwrap_or(range.low());
        self.values.push_back(value);
        value.clamp(range.low(), range.high())
    }
}

/// Draw `count` distinct numbers from `range`.
///
/// Repeats are rejected and redrawn, so each number is taken without
/// replacement. Fails only when the range cannot supply `count` distinct values.
pub fn generate(
    range: NumberRange,
    count: usize,
    rng: &mut impl RandomSource,
) -> Result<Draw, DrawError> {
    range.check_capacity(count)?;

    let mut numbers = BTreeSet::new();
    let mut rejected = 0_u32;
    while numbers.len() < count {
        if !numbers.insert(rng.next_in(range)) {
            rejected += 1;
        }
    }
    if rejected > 0 {
        tracing::trace!(rejected, "Redrew repeated numbers");
    }
    Ok(Draw::from(numbers))
}

/// One week's draw: seven numbers from 1..=39.
pub fn generate_lotto_draw(rng: &mut impl RandomSource) -> Draw {
    match generate(LOTTO_RANGE, DRAW_SIZE, rng) {
        Ok(draw) => draw,
        Err(_) => unreachable!("lottery range always holds a full draw"),
    }
}
