//! Background runner tests through the public engine API.

use std::thread;
use std::time::Duration;

use crusher_core::ScriptedRandom;
use crusher_engine::{RunError, Selection, TickInterval, TrialEvent, TrialPhase, TrialRunner};
use crusher_types::SelectionError;

use crate::common::{Recorder, draw, fastest};

fn assert_well_formed(events: &[TrialEvent]) {
    let (last, ticks) = events.split_last().expect("at least one event");
    assert!(last.is_terminal(), "run must end with a terminal event");
    for (i, event) in ticks.iter().enumerate() {
        match event {
            TrialEvent::Tick { weeks, .. } => assert_eq!(*weeks, i as u64 + 1),
            other => panic!("unexpected event before the end: {other:?}"),
        }
    }
    assert_eq!(last.weeks(), ticks.len() as u64);
}

#[test]
fn forced_jackpot_ends_the_run_on_that_week() {
    let rng = ScriptedRandom::from_draws([
        &draw(&[30, 31, 32, 33, 34, 35, 36]),
        &draw(&[8, 9, 10, 11, 12, 13, 14]),
        &draw(&[8, 9, 10, 11, 12, 13, 1]),
    ]);
    let recorder = Recorder::default();
    let mut runner = TrialRunner::new(fastest());
    runner
        .start_with_rng(
            Selection::new([8, 9, 10, 11, 12, 13]).unwrap(),
            fastest(),
            rng,
            recorder.clone(),
        )
        .unwrap();

    assert_eq!(runner.join(), Some(TrialPhase::Won));
    let events = recorder.events();
    assert_well_formed(&events);
    assert_eq!(
        events.last(),
        Some(&TrialEvent::Won {
            weeks: 2,
            matches: 6
        })
    );
}

#[test]
fn notifications_arrive_on_the_trial_thread() {
    let rng = ScriptedRandom::new(1..=7);
    let recorder = Recorder::default();
    let mut runner = TrialRunner::default();
    runner
        .start_with_rng(Selection::new(1..=7).unwrap(), fastest(), rng, recorder.clone())
        .unwrap();
    runner.join();

    let names = recorder.thread_names();
    assert_eq!(names.len(), 2);
    assert!(names.iter().all(|n| n.as_deref() == Some("trial-loop")));
}

#[test]
fn stopped_run_is_well_formed() {
    let recorder = Recorder::default();
    let mut runner = TrialRunner::default();
    runner
        .start_with_rng(
            Selection::new([1, 2, 3, 4, 5]).unwrap(),
            fastest(),
            ScriptedRandom::new(20..=26),
            recorder.clone(),
        )
        .unwrap();

    thread::sleep(Duration::from_millis(180));
    assert!(runner.is_running());
    assert_eq!(runner.shutdown(), Some(TrialPhase::Stopped));

    let events = recorder.events();
    assert_well_formed(&events);
    assert!(matches!(events.last(), Some(TrialEvent::Stopped { .. })));
    assert!(events.len() >= 2, "expected some weeks before the stop");
}

#[test]
fn raw_inputs_are_validated() {
    let mut runner = TrialRunner::default();
    assert!(matches!(
        runner.start_run([1, 2, 3, 4, 5, 5], 550, Recorder::default()),
        Err(RunError::Selection(SelectionError::Duplicate(5)))
    ));
    assert!(matches!(
        runner.start_run([0, 1, 2, 3, 4], 550, Recorder::default()),
        Err(RunError::Selection(SelectionError::OutOfRange { number: 0, .. }))
    ));
    assert!(matches!(
        runner.start_run([1, 2, 3, 4, 5], 3001, Recorder::default()),
        Err(RunError::Interval(_))
    ));
    assert!(!runner.is_running());
    assert_eq!(runner.join(), None);
}

#[test]
fn runner_can_be_reused_after_a_run() {
    let mut runner = TrialRunner::default();
    for _ in 0..3 {
        let recorder = Recorder::default();
        runner
            .start_with_rng(
                Selection::new(1..=7).unwrap(),
                fastest(),
                ScriptedRandom::new(1..=7),
                recorder.clone(),
            )
            .unwrap();
        assert_eq!(runner.join(), Some(TrialPhase::Won));
        assert_eq!(recorder.events().len(), 2);
    }
}

#[test]
fn speed_change_is_kept_between_runs() {
    let mut runner = TrialRunner::default();
    assert_eq!(runner.tick_interval(), TickInterval::DEFAULT);
    runner.faster();
    runner.faster();
    assert_eq!(runner.tick_interval().as_millis(), 350);
    assert!(runner.set_tick_interval_ms(20).is_err());
    assert_eq!(runner.tick_interval().as_millis(), 350);
}
