//! Engine for dreamcrusher: the trial loop, its background runner, and the
//! host-side [`App`] state.
//!
//! This crate has no terminal dependencies. The TUI renders an [`App`] and
//! feeds it input; the trial thread reports back over a channel.

mod app;
mod observer;
mod runner;
mod trial;

pub use app::{App, CellView, CursorMove, GRID_COLUMNS, RngFactory};
pub use observer::{CallbackObserver, ChannelObserver, TrialObserver};
pub use runner::{RunError, TrialRunner};
pub use trial::{Step, TrialError, TrialLoop};

// Re-export from crates for public API
pub use crusher_config::{ConfigError, CrusherConfig, GameSettings};
pub use crusher_core::{
    Notice, NoticeLog, RandomSource, ThreadRandom, TicketDraft, ToggleOutcome, YearTally,
};
pub use crusher_types::{
    DRAW_SIZE, Difficulty, Draw, LOTTO_HIGH, LOTTO_LOW, Selection, TickInterval, TrialEvent,
    TrialPhase, WeekCount,
};
