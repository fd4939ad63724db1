//! Background execution of the trial loop.
//!
//! # Threading
//!
//! Each run owns one dedicated OS thread. The host and the thread share only a
//! [`RunControl`]: an atomic `running` flag and an atomic tick interval. The
//! ticket travels into the thread by value and is never touched again by the
//! host.
//!
//! ```text
//! host                         trial thread
//! ----                         ------------
//! start() ---- spawn ------->  loop {
//!                                check running ---- false --> on_stop, exit
//!                                draw, score, on_tick
//!                                won? ------------- yes ----> on_win, exit
//! stop() -- running=false -->    park until deadline or unpark
//!        -- unpark --------->  }
//! ```
//!
//! Cancellation is cooperative. A week already being scored finishes and is
//! reported, then the thread notices the flag and exits.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use thiserror::Error;

use crusher_core::{RandomSource, ThreadRandom, generate_lotto_draw};
use crusher_types::{IntervalError, Selection, SelectionError, TickInterval, TrialPhase};

use crate::observer::TrialObserver;
use crate::trial::{Step, TrialError, TrialLoop};

const THREAD_NAME: &str = "trial-loop";

#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid selection: {0}")]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Interval(#[from] IntervalError),
    #[error("a run is already in progress")]
    AlreadyRunning,
    #[error(transparent)]
    Trial(#[from] TrialError),
    #[error("failed to spawn trial thread")]
    Spawn(#[source] io::Error),
}

/// State shared between the host and one run's thread.
#[derive(Debug)]
struct RunControl {
    running: AtomicBool,
    interval_ms: AtomicU64,
}

impl RunControl {
    fn new(interval: TickInterval) -> Self {
        Self {
            running: AtomicBool::new(true),
            interval_ms: AtomicU64::new(interval.as_millis()),
        }
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.load(Ordering::Relaxed))
    }

    /// Sleep out one interval, returning early once the run is cancelled.
    ///
    /// `park_timeout` may return spuriously; the flag and the deadline are
    /// checked again after every wake.
    fn pause(&self) {
        let deadline = Instant::now() + self.interval();
        loop {
            if !self.is_running() {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            thread::park_timeout(deadline - now);
        }
    }
}

struct ActiveRun {
    control: Arc<RunControl>,
    handle: JoinHandle<TrialPhase>,
}

/// Host-side handle that starts, tunes and stops background runs.
///
/// At most one run is active at a time. Dropping the runner cancels the
/// active run without waiting for its thread.
pub struct TrialRunner {
    interval: TickInterval,
    active: Option<ActiveRun>,
}

impl TrialRunner {
    #[must_use]
    pub fn new(interval: TickInterval) -> Self {
        Self {
            interval,
            active: None,
        }
    }

    /// Validate raw inputs and start a run with the thread-local RNG.
    ///
    /// Rejects a ticket that is not 5, 6 or 7 distinct numbers from the grid,
    /// an interval outside 50..=3000 ms, and a second concurrent run.
    pub fn start_run(
        &mut self,
        numbers: impl IntoIterator<Item = u32>,
        tick_interval_ms: u64,
        observer: impl TrialObserver,
    ) -> Result<(), RunError> {
        let selection = Selection::new(numbers)?;
        let interval = TickInterval::from_millis(tick_interval_ms)?;
        self.start(selection, interval, observer)
    }

    pub fn start(
        &mut self,
        selection: Selection,
        interval: TickInterval,
        observer: impl TrialObserver,
    ) -> Result<(), RunError> {
        self.start_with_rng(selection, interval, ThreadRandom, observer)
    }

    /// Start a run drawing from `rng`.
    pub fn start_with_rng(
        &mut self,
        selection: Selection,
        interval: TickInterval,
        rng: impl RandomSource + 'static,
        observer: impl TrialObserver,
    ) -> Result<(), RunError> {
        if self.is_running() {
            return Err(RunError::AlreadyRunning);
        }
        // A finished (or finishing) thread is reaped before its successor starts.
        self.join();

        let mut trial = TrialLoop::new();
        trial.start(selection.clone())?;

        self.interval = interval;
        let control = Arc::new(RunControl::new(interval));
        let thread_control = Arc::clone(&control);

        let handle = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || run_trials(trial, &thread_control, rng, observer))
            .map_err(RunError::Spawn)?;

        tracing::info!(
            selection = %selection,
            interval_ms = interval.as_millis(),
            "Trial run started"
        );
        self.active = Some(ActiveRun { control, handle });
        Ok(())
    }

    /// Ask the active run to stop. Returns immediately.
    ///
    /// At most one more tick (the one in flight) is reported, followed by a
    /// single stop notification.
    pub fn stop_run(&mut self) {
        if let Some(run) = &self.active
            && run.control.running.swap(false, Ordering::AcqRel)
        {
            tracing::info!("Trial run stop requested");
            run.handle.thread().unpark();
        }
    }

    /// Takes effect from the next pause of the active run.
    pub fn set_tick_interval(&mut self, interval: TickInterval) {
        self.interval = interval;
        if let Some(run) = &self.active {
            run.control
                .interval_ms
                .store(interval.as_millis(), Ordering::Relaxed);
        }
        tracing::debug!(interval_ms = interval.as_millis(), "Tick interval changed");
    }

    pub fn set_tick_interval_ms(&mut self, value: u64) -> Result<TickInterval, RunError> {
        let interval = TickInterval::from_millis(value)?;
        self.set_tick_interval(interval);
        Ok(interval)
    }

    /// One speed step faster.
    pub fn faster(&mut self) -> TickInterval {
        self.set_tick_interval(self.interval.faster());
        self.interval
    }

    /// One speed step slower.
    pub fn slower(&mut self) -> TickInterval {
        self.set_tick_interval(self.interval.slower());
        self.interval
    }

    #[must_use]
    pub fn tick_interval(&self) -> TickInterval {
        self.interval
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|run| run.control.is_running())
    }

    /// Wait for the current run's thread to exit and return how it ended.
    ///
    /// Blocks until the run stops or wins. `None` when no run was started.
    pub fn join(&mut self) -> Option<TrialPhase> {
        let run = self.active.take()?;
        match run.handle.join() {
            Ok(phase) => Some(phase),
            Err(_) => {
                tracing::error!("Trial thread panicked");
                None
            }
        }
    }

    /// Stop and wait.
    pub fn shutdown(&mut self) -> Option<TrialPhase> {
        self.stop_run();
        self.join()
    }
}

impl Default for TrialRunner {
    fn default() -> Self {
        Self::new(TickInterval::default())
    }
}

impl Drop for TrialRunner {
    fn drop(&mut self) {
        // Best-effort stop; never block in Drop.
        self.stop_run();
    }
}

fn run_trials(
    mut trial: TrialLoop,
    control: &RunControl,
    mut rng: impl RandomSource,
    mut observer: impl TrialObserver,
) -> TrialPhase {
    loop {
        if !control.is_running() {
            return match trial.stop() {
                Ok(weeks) => {
                    tracing::info!(weeks, "Trial run stopped");
                    observer.on_stop(weeks);
                    TrialPhase::Stopped
                }
                Err(err) => {
                    tracing::error!("Trial loop could not stop: {err}");
                    trial.phase()
                }
            };
        }

        let draw = generate_lotto_draw(&mut rng);
        let step = match trial.step(&draw) {
            Ok(step) => step,
            Err(err) => {
                tracing::error!("Trial loop left the running state: {err}");
                control.running.store(false, Ordering::Release);
                return trial.phase();
            }
        };
        tracing::debug!(weeks = step.weeks(), matches = step.matches(), draw = %draw, "Week played");
        observer.on_tick(step.weeks(), &draw, step.matches());

        if let Step::Won { weeks, matches } = step {
            control.running.store(false, Ordering::Release);
            tracing::info!(weeks, matches, "Ticket came up in full");
            observer.on_win(weeks, matches);
            return TrialPhase::Won;
        }

        control.pause();
    }
}
