//! Core domain types for dreamcrusher.
//!
//! This crate contains pure domain types with no IO, no threads, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod draw;
mod interval;
mod selection;
mod trial;

pub use draw::{Draw, DrawError, NumberRange};
pub use interval::{IntervalError, TickInterval};
pub use selection::{Difficulty, Selection, SelectionError};
pub use trial::{TrialEvent, TrialPhase, WeekCount};

// ============================================================================
// Lottery constants
// ============================================================================

/// Lowest number printed on the ticket grid.
pub const LOTTO_LOW: u32 = 1;

/// Highest number printed on the ticket grid.
pub const LOTTO_HIGH: u32 = 39;

/// Numbers drawn every week.
pub const DRAW_SIZE: usize = 7;

/// The grid every ticket and every draw is taken from.
pub const LOTTO_RANGE: NumberRange = NumberRange::new_const(LOTTO_LOW, LOTTO_HIGH);
