//! Delay between two simulated weeks.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("tick interval must be within {min}..={max} ms (got {got})", min = TickInterval::MIN_MS, max = TickInterval::MAX_MS)]
pub struct IntervalError {
    pub got: u64,
}

/// Validated delay between trials, in milliseconds.
///
/// Invariant: `MIN_MS <= ms <= MAX_MS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TickInterval(u64);

impl TickInterval {
    pub const MIN_MS: u64 = 50;
    pub const MAX_MS: u64 = 3000;
    pub const DEFAULT_MS: u64 = 550;
    /// Amount one speed step moves the interval.
    pub const STEP_MS: u64 = 100;

    pub const DEFAULT: TickInterval = TickInterval(Self::DEFAULT_MS);

    pub fn from_millis(ms: u64) -> Result<Self, IntervalError> {
        if (Self::MIN_MS..=Self::MAX_MS).contains(&ms) {
            Ok(Self(ms))
        } else {
            Err(IntervalError { got: ms })
        }
    }

    /// Clamp an arbitrary value into range instead of rejecting it.
    #[must_use]
    pub fn saturating_from_millis(ms: u64) -> Self {
        Self(ms.clamp(Self::MIN_MS, Self::MAX_MS))
    }

    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// One step shorter; stays put at the floor.
    #[must_use]
    pub fn faster(self) -> Self {
        if self.0 > Self::MIN_MS {
            Self::saturating_from_millis(self.0.saturating_sub(Self::STEP_MS))
        } else {
            self
        }
    }

    /// One step longer; stays put at the ceiling.
    #[must_use]
    pub fn slower(self) -> Self {
        if self.0 < Self::MAX_MS {
            Self::saturating_from_millis(self.0 + Self::STEP_MS)
        } else {
            self
        }
    }
}

impl Default for TickInterval {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u64> for TickInterval {
    type Error = IntervalError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::from_millis(value)
    }
}

impl From<TickInterval> for u64 {
    fn from(value: TickInterval) -> Self {
        value.0
    }
}

impl fmt::Display for TickInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ms", self.0)
    }
}
