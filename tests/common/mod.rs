//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use ratatui::buffer::Buffer;

use crusher_core::ScriptedRandom;
use crusher_engine::{
    App, Draw, GameSettings, RandomSource, TickInterval, TrialEvent, TrialObserver, WeekCount,
};

pub fn draw(numbers: &[u32]) -> Draw {
    Draw::try_from_numbers(numbers.iter().copied()).expect("valid draw")
}

pub fn fastest() -> TickInterval {
    TickInterval::from_millis(TickInterval::MIN_MS).expect("minimum interval is valid")
}

/// App on the fastest interval whose runs replay `draws`.
pub fn scripted_app(settings: GameSettings, draws: &[Draw]) -> App {
    let rng = ScriptedRandom::from_draws(draws);
    let settings = GameSettings {
        tick_interval: fastest(),
        ..settings
    };
    App::new(settings, true).with_rng_factory(Box::new(move || -> Box<dyn RandomSource> {
        Box::new(rng.clone())
    }))
}

/// Poll `app` until `done` holds, failing after five seconds.
pub fn drive_until(app: &mut App, done: impl Fn(&App) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        app.process_trial_events();
        if done(app) {
            return;
        }
        thread::sleep(Duration::from_millis(5));
    }
    panic!("app did not settle in time");
}

/// Observer that records every notification and the thread it arrived on.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<TrialEvent>>>,
    threads: Arc<Mutex<Vec<Option<String>>>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<TrialEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn thread_names(&self) -> Vec<Option<String>> {
        self.threads.lock().unwrap().clone()
    }

    fn record(&self, event: TrialEvent) {
        self.threads
            .lock()
            .unwrap()
            .push(thread::current().name().map(str::to_string));
        self.events.lock().unwrap().push(event);
    }
}

impl TrialObserver for Recorder {
    fn on_tick(&mut self, weeks: WeekCount, draw: &Draw, matches: usize) {
        self.record(TrialEvent::Tick {
            weeks,
            draw: draw.clone(),
            matches,
        });
    }

    fn on_win(&mut self, weeks: WeekCount, matches: usize) {
        self.record(TrialEvent::Won { weeks, matches });
    }

    fn on_stop(&mut self, weeks: WeekCount) {
        self.record(TrialEvent::Stopped { weeks });
    }
}

/// Render a buffer as plain text, one line per row.
pub fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
