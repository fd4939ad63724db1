//! Full app runs rendered to an in-memory terminal.

use ratatui::{Terminal, backend::TestBackend};

use crusher_engine::{App, Difficulty, GameSettings, TrialPhase};
use crusher_tui::draw;

use crate::common::{buffer_text, draw as lotto_draw, drive_until, scripted_app};

fn render(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 26)).unwrap();
    terminal.draw(|frame| draw(frame, app)).unwrap();
    buffer_text(terminal.backend().buffer())
}

fn five_number_settings() -> GameSettings {
    GameSettings {
        difficulty: Difficulty::Five,
        ..GameSettings::default()
    }
}

#[test]
fn winning_run_ends_on_the_victory_screen() {
    let mut app = scripted_app(
        five_number_settings(),
        &[
            lotto_draw(&[20, 21, 22, 23, 24, 25, 26]),
            lotto_draw(&[11, 12, 13, 14, 15, 30, 31]),
        ],
    );
    for n in 11..=15 {
        app.toggle_number(n);
    }
    assert!(render(&app).contains("ready"));

    app.toggle_run();
    drive_until(&mut app, |app| app.phase() == TrialPhase::Won);

    let text = render(&app);
    assert!(text.contains("Winner"), "{text}");
    assert!(text.contains("2 weeks"));
    assert!(text.contains("0 years spent"));
    assert!(text.contains("5 matched"));
    assert!(text.contains("Found 5 of the same numbers"));
    app.shutdown();
}

#[test]
fn stopped_run_shows_the_stop_notice() {
    let mut app = scripted_app(
        five_number_settings(),
        &[lotto_draw(&[20, 21, 22, 23, 24, 25, 26])],
    );
    for n in 1..=5 {
        app.toggle_number(n);
    }
    app.toggle_run();
    drive_until(&mut app, |app| app.weeks() >= 1);
    let running = render(&app);
    assert!(running.contains("Drawing"));
    assert!(running.contains("enter stop"));

    app.toggle_run();
    drive_until(&mut app, |app| app.phase() == TrialPhase::Stopped);

    let text = render(&app);
    assert!(text.contains("Stopped after"), "{text}");
    assert!(text.contains("0 matched"));
    app.shutdown();
}

#[test]
fn incomplete_ticket_prompts_for_more_numbers() {
    let mut app = App::new(GameSettings::default(), true);
    app.toggle_number(4);
    app.toggle_run();

    let text = render(&app);
    assert!(text.contains("Pick 6 more numbers first."), "{text}");
    assert!(text.contains("6 to pick"));
}
