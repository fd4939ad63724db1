//! Host-side application state: the ticket grid, the active run, and what the
//! screen shows about it.
//!
//! The UI never reads shared state from the trial thread. It owns a receiver
//! for [`TrialEvent`]s and drains it once per frame in
//! [`App::process_trial_events`].

use tokio::sync::mpsc;

use crusher_config::GameSettings;
use crusher_core::{
    Notice, NoticeLog, RandomSource, ThreadRandom, TicketDraft, ToggleOutcome, YearTally,
};
use crusher_types::{
    Difficulty, Draw, LOTTO_HIGH, LOTTO_LOW, Selection, TickInterval, TrialEvent, TrialPhase,
    WeekCount,
};

use crate::observer::ChannelObserver;
use crate::runner::TrialRunner;

/// Cells per grid row.
pub const GRID_COLUMNS: u32 = 7;

/// Upper bound on events applied per frame so a backlog cannot stall rendering.
const MAX_EVENTS_PER_FRAME: usize = 256;

/// Builds the random source for each new run.
pub type RngFactory = Box<dyn Fn() -> Box<dyn RandomSource>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
    First,
    Last,
}

/// Everything the grid needs to draw one number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub number: u32,
    pub picked: bool,
    pub locked: bool,
    pub drawn: bool,
    pub under_cursor: bool,
}

impl CellView {
    /// Picked on the ticket and present in the latest draw.
    #[must_use]
    pub fn is_hit(&self) -> bool {
        self.picked && self.drawn
    }
}

pub struct App {
    draft: TicketDraft,
    runner: TrialRunner,
    events: Option<mpsc::UnboundedReceiver<TrialEvent>>,
    rng_factory: RngFactory,
    phase: TrialPhase,
    weeks: WeekCount,
    last_draw: Option<Draw>,
    last_matches: usize,
    best_matches: usize,
    playing: Option<Selection>,
    notices: NoticeLog,
    cursor: u32,
    ascii_only: bool,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(settings: GameSettings, ascii_only: bool) -> Self {
        Self {
            draft: TicketDraft::new(settings.difficulty),
            runner: TrialRunner::new(settings.tick_interval),
            events: None,
            rng_factory: Box::new(|| -> Box<dyn RandomSource> { Box::new(ThreadRandom) }),
            phase: TrialPhase::Idle,
            weeks: 0,
            last_draw: None,
            last_matches: 0,
            best_matches: 0,
            playing: None,
            notices: NoticeLog::default(),
            cursor: LOTTO_LOW,
            ascii_only,
            should_quit: false,
        }
    }

    /// Replace the random source used for future runs.
    #[must_use]
    pub fn with_rng_factory(mut self, factory: RngFactory) -> Self {
        self.rng_factory = factory;
        self
    }

    // ------------------------------------------------------------------------
    // Ticket
    // ------------------------------------------------------------------------

    /// Toggle a number on the ticket. The ticket is frozen while a run is active.
    pub fn toggle_number(&mut self, number: u32) -> Option<ToggleOutcome> {
        if self.runner.is_running() {
            tracing::debug!(number, "Ticket is locked during a run");
            return None;
        }
        let outcome = self.draft.toggle(number);
        tracing::debug!(number, ?outcome, "Ticket toggled");
        Some(outcome)
    }

    pub fn toggle_at_cursor(&mut self) -> Option<ToggleOutcome> {
        self.toggle_number(self.cursor)
    }

    pub fn clear_ticket(&mut self) {
        if !self.runner.is_running() {
            self.draft.clear();
        }
    }

    /// Applies to the next ticket; the ticket in play keeps its size.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.runner.is_running() || difficulty == self.draft.difficulty() {
            return;
        }
        let dropped = self.draft.set_difficulty(difficulty);
        if !dropped.is_empty() {
            tracing::debug!(?dropped, "Picks dropped by smaller ticket");
        }
        self.notices.push(Notice::DifficultyChanged(difficulty));
    }

    pub fn move_cursor(&mut self, movement: CursorMove) {
        let cursor = self.cursor;
        self.cursor = match movement {
            CursorMove::Left => cursor.saturating_sub(1).max(LOTTO_LOW),
            CursorMove::Right => (cursor + 1).min(LOTTO_HIGH),
            CursorMove::Up if cursor >= LOTTO_LOW + GRID_COLUMNS => cursor - GRID_COLUMNS,
            CursorMove::Down if cursor + GRID_COLUMNS <= LOTTO_HIGH => cursor + GRID_COLUMNS,
            CursorMove::Up | CursorMove::Down => cursor,
            CursorMove::First => LOTTO_LOW,
            CursorMove::Last => LOTTO_HIGH,
        };
    }

    // ------------------------------------------------------------------------
    // Run control
    // ------------------------------------------------------------------------

    /// Start when idle, stop when running.
    pub fn toggle_run(&mut self) {
        if self.runner.is_running() {
            self.stop_run();
        } else {
            self.start_run();
        }
    }

    pub fn start_run(&mut self) {
        if self.runner.is_running() {
            return;
        }

        let Some(selection) = self.draft.to_selection() else {
            self.notices.push(Notice::TicketIncomplete {
                remaining: self.draft.remaining(),
            });
            return;
        };

        // Let the previous run finish reporting before its receiver is replaced.
        self.runner.join();
        self.process_trial_events();

        let (observer, rx) = ChannelObserver::channel();
        let rng = (self.rng_factory)();
        let interval = self.runner.tick_interval();
        match self
            .runner
            .start_with_rng(selection.clone(), interval, rng, observer)
        {
            Ok(()) => {
                self.events = Some(rx);
                self.phase = TrialPhase::Running;
                self.weeks = 0;
                self.last_draw = None;
                self.last_matches = 0;
                self.best_matches = 0;
                self.playing = Some(selection);
            }
            Err(err) => {
                tracing::warn!("Could not start run: {err}");
                self.notices.push(Notice::StartFailed {
                    reason: err.to_string(),
                });
            }
        }
    }

    pub fn stop_run(&mut self) {
        self.runner.stop_run();
    }

    pub fn faster(&mut self) {
        let interval = self.runner.faster();
        self.notices.push(Notice::SpeedChanged(interval));
    }

    pub fn slower(&mut self) {
        let interval = self.runner.slower();
        self.notices.push(Notice::SpeedChanged(interval));
    }

    /// Drain pending trial events into the view state.
    pub fn process_trial_events(&mut self) {
        let mut applied = 0;
        while applied < MAX_EVENTS_PER_FRAME {
            let Some(rx) = self.events.as_mut() else {
                return;
            };
            let event = match rx.try_recv() {
                Ok(event) => event,
                Err(mpsc::error::TryRecvError::Empty) => return,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    self.events = None;
                    return;
                }
            };
            self.apply_trial_event(event);
            applied += 1;
        }
    }

    pub fn apply_trial_event(&mut self, event: TrialEvent) {
        match event {
            TrialEvent::Tick {
                weeks,
                draw,
                matches,
            } => {
                self.weeks = weeks;
                self.last_matches = matches;
                self.best_matches = self.best_matches.max(matches);
                self.last_draw = Some(draw);
            }
            TrialEvent::Won { weeks, matches } => {
                self.weeks = weeks;
                self.phase = TrialPhase::Won;
                tracing::info!(weeks, "Run won");
                self.notices.push(Notice::Won { weeks, matches });
            }
            TrialEvent::Stopped { weeks } => {
                self.weeks = weeks;
                self.phase = TrialPhase::Stopped;
                self.notices.push(Notice::Stopped { weeks });
            }
        }
    }

    /// Stop any run and wait for its thread.
    pub fn shutdown(&mut self) {
        if let Some(phase) = self.runner.shutdown() {
            tracing::info!(phase = phase.as_str(), weeks = self.weeks, "Runner shut down");
        }
        self.process_trial_events();
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    // ------------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn cell(&self, number: u32) -> CellView {
        let picked = match (&self.playing, self.runner.is_running()) {
            (Some(selection), true) => selection.contains(number),
            _ => self.draft.is_picked(number),
        };
        CellView {
            number,
            picked,
            locked: self.draft.is_locked(number),
            drawn: self
                .last_draw
                .as_ref()
                .is_some_and(|draw| draw.contains(number)),
            under_cursor: self.cursor == number,
        }
    }

    #[must_use]
    pub fn draft(&self) -> &TicketDraft {
        &self.draft
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.draft.difficulty()
    }

    #[must_use]
    pub fn phase(&self) -> TrialPhase {
        self.phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.runner.is_running()
    }

    /// The run has been told to end but its final event is not drained yet.
    #[must_use]
    pub fn is_winding_down(&self) -> bool {
        self.phase == TrialPhase::Running && !self.runner.is_running()
    }

    #[must_use]
    pub fn weeks(&self) -> WeekCount {
        self.weeks
    }

    #[must_use]
    pub fn years(&self) -> YearTally {
        YearTally::from_weeks(self.weeks)
    }

    #[must_use]
    pub fn last_draw(&self) -> Option<&Draw> {
        self.last_draw.as_ref()
    }

    #[must_use]
    pub fn last_matches(&self) -> usize {
        self.last_matches
    }

    #[must_use]
    pub fn best_matches(&self) -> usize {
        self.best_matches
    }

    #[must_use]
    pub fn playing(&self) -> Option<&Selection> {
        self.playing.as_ref()
    }

    #[must_use]
    pub fn notices(&self) -> &NoticeLog {
        &self.notices
    }

    #[must_use]
    pub fn tick_interval(&self) -> TickInterval {
        self.runner.tick_interval()
    }

    #[must_use]
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    #[must_use]
    pub fn ascii_only(&self) -> bool {
        self.ascii_only
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.runner.stop_run();
    }
}
