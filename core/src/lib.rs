//! Core domain logic for dreamcrusher.
//!
//! Everything here is synchronous and deterministic given a [`RandomSource`]:
//! drawing numbers, scoring a draw against a ticket, drafting a ticket on the
//! grid, and the host-facing notices and year tally.

mod calendar;
pub mod draw;
mod matching;
pub mod notifications;
mod ticket;

pub use calendar::{WEEKS_PER_YEAR, YearTally};
#[cfg(any(test, feature = "test-support"))]
pub use draw::ScriptedRandom;
pub use draw::{RandomSource, ThreadRandom, generate, generate_lotto_draw};
pub use matching::{count_matches, is_win};
pub use notifications::{Notice, NoticeLog};
pub use ticket::{TicketDraft, ToggleOutcome};
