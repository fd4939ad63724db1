//! TUI rendering for dreamcrusher using ratatui.

mod input;
mod theme;

pub use input::{InputPump, apply_event, handle_events};
pub use theme::{Glyphs, Palette, glyphs, spinner_frame, styles};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
};

use crusher_engine::{App, CellView, GRID_COLUMNS, LOTTO_HIGH, LOTTO_LOW, TrialPhase};

/// Rows needed to lay out the whole grid.
const GRID_ROWS: u16 = ((LOTTO_HIGH - LOTTO_LOW) / GRID_COLUMNS + 1) as u16;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = Palette::standard();
    let glyphs = glyphs(app.ascii_only());
    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),             // Title
            Constraint::Length(GRID_ROWS + 2), // Grid
            Constraint::Length(3),             // Latest draw
            Constraint::Length(3),             // Tally
            Constraint::Min(1),                // Notices
            Constraint::Length(1),             // Key hints
        ])
        .split(frame.area());

    draw_title(frame, app, chunks[0], &palette, &glyphs);
    draw_grid(frame, app, chunks[1], &palette, &glyphs);
    draw_latest_draw(frame, app, chunks[2], &palette);
    draw_tally(frame, app, chunks[3], &palette, &glyphs);
    draw_notices(frame, app, chunks[4], &palette, &glyphs);
    draw_key_hints(frame, app, chunks[5], &palette);
}

fn panel<'a>(title: String, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_panel))
        .padding(Padding::horizontal(1))
        .title(Span::styled(
            title,
            Style::default().fg(palette.text_secondary),
        ))
}

fn phase_label(phase: TrialPhase, glyphs: &Glyphs) -> (&'static str, &'static str) {
    match phase {
        TrialPhase::Idle => (glyphs.idle, "Pick your numbers"),
        TrialPhase::Running => (glyphs.running, "Drawing"),
        TrialPhase::Stopped => (glyphs.stopped, "Stopped"),
        TrialPhase::Won => (glyphs.won, "Winner"),
    }
}

fn draw_title(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let (icon, label, style) = if app.is_winding_down() {
        (
            glyphs.stopped,
            "Stopping",
            Style::default().fg(palette.text_muted),
        )
    } else {
        let (icon, label) = phase_label(app.phase(), glyphs);
        (icon, label, phase_style(app.phase(), palette))
    };
    let mut spans = vec![
        Span::styled(
            "dreamcrusher",
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("{icon} {label}"), style),
    ];
    if app.is_running() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            spinner_frame(app.weeks(), app.ascii_only()),
            Style::default().fg(palette.accent),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn phase_style(phase: TrialPhase, palette: &Palette) -> Style {
    match phase {
        TrialPhase::Idle => Style::default().fg(palette.text_secondary),
        TrialPhase::Running => Style::default().fg(palette.accent),
        TrialPhase::Stopped => Style::default().fg(palette.warning),
        TrialPhase::Won => styles::victory(palette),
    }
}

/// Text and style for one grid cell.
pub fn cell_span(cell: CellView, palette: &Palette, glyphs: &Glyphs) -> Span<'static> {
    let (left, right) = if cell.under_cursor {
        (glyphs.cursor_left, glyphs.cursor_right)
    } else {
        (" ", " ")
    };
    let style = if cell.is_hit() {
        styles::cell_hit(palette)
    } else if cell.picked {
        styles::cell_picked(palette)
    } else if cell.drawn {
        styles::cell_drawn(palette)
    } else if cell.locked {
        styles::cell_locked(palette)
    } else {
        styles::cell_open(palette)
    };
    Span::styled(format!("{left}{:>2}{right}", cell.number), style)
}

fn draw_grid(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let draft = app.draft();
    let title = if app.is_running() {
        match app.playing() {
            Some(selection) => format!(" Playing {selection} "),
            None => " Ticket ".to_string(),
        }
    } else if draft.is_full() {
        format!(" Ticket {} {} ready ", glyphs.separator, app.difficulty())
    } else {
        format!(
            " Ticket {} {} to pick ",
            glyphs.separator,
            draft.remaining()
        )
    };

    let numbers: Vec<u32> = (LOTTO_LOW..=LOTTO_HIGH).collect();
    let lines: Vec<Line> = numbers
        .chunks(GRID_COLUMNS as usize)
        .map(|row| {
            let mut spans = Vec::with_capacity(row.len() * 2);
            for &number in row {
                spans.push(cell_span(app.cell(number), palette, glyphs));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(panel(title, palette)), area);
}

fn draw_latest_draw(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let line = match app.last_draw() {
        Some(draw) => {
            let mut spans = Vec::with_capacity(draw.len() * 2 + 1);
            for number in draw.iter() {
                let style = if app.cell(number).picked {
                    styles::cell_hit(palette)
                } else {
                    Style::default().fg(palette.text_primary)
                };
                spans.push(Span::styled(format!("{number:>2}"), style));
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!(" {} matched", app.last_matches()),
                Style::default().fg(palette.text_muted),
            ));
            Line::from(spans)
        }
        None => Line::from(Span::styled(
            "No numbers drawn yet",
            Style::default().fg(palette.text_muted),
        )),
    };
    let block = panel(" This week ".to_string(), palette);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_tally(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let sep = Span::styled(
        format!(" {} ", glyphs.separator),
        Style::default().fg(palette.text_muted),
    );
    let value = Style::default().fg(palette.text_primary);
    let line = Line::from(vec![
        Span::styled(format!("{} weeks", app.weeks()), value),
        sep.clone(),
        Span::styled(app.years().to_string(), value),
        sep.clone(),
        Span::styled(format!("best {}", app.best_matches()), value),
        sep.clone(),
        Span::styled(format!("{} per week", app.tick_interval()), value),
        sep,
        Span::styled(app.difficulty().to_string(), value),
    ]);
    let block = panel(" Tally ".to_string(), palette);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_notices(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    // Newest first.
    let lines: Vec<Line> = app
        .notices()
        .iter()
        .rev()
        .map(|notice| {
            let style = if notice.is_victory() {
                styles::victory(palette)
            } else {
                Style::default().fg(palette.text_secondary)
            };
            Line::from(vec![
                Span::styled(
                    format!("{} ", glyphs.bullet),
                    Style::default().fg(palette.text_muted),
                ),
                Span::styled(notice.format(), style),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn draw_key_hints(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let run_action = if app.is_running() { "stop" } else { "start" };
    let hints = [
        ("space", "pick"),
        ("enter", run_action),
        ("+/-", "speed"),
        ("5/6/7", "size"),
        ("c", "clear"),
        ("q", "quit"),
    ];
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, action) in hints {
        spans.push(Span::styled(key, styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {action}  "), styles::key_hint(palette)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use crusher_engine::{Draw, GameSettings, TrialEvent};

    use super::*;

    fn screen(buffer: &Buffer) -> String {
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

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        screen(terminal.backend().buffer())
    }

    #[test]
    fn idle_screen_shows_grid_and_hints() {
        let app = App::new(GameSettings::default(), true);
        let text = render(&app);
        assert!(text.contains("dreamcrusher"));
        assert!(text.contains("Pick your numbers"));
        assert!(text.contains("7 to pick"));
        assert!(text.contains("[ 1]"), "cursor starts on 1:\n{text}");
        assert!(text.contains(" 39 "));
        assert!(text.contains("No numbers drawn yet"));
        assert!(text.contains("0 weeks"));
        assert!(text.contains("enter start"));
    }

    #[test]
    fn won_screen_shows_victory_notice() {
        let mut app = App::new(GameSettings::default(), true);
        app.apply_trial_event(TrialEvent::Tick {
            weeks: 60,
            draw: Draw::try_from_numbers([1, 2, 3, 4, 5, 6, 7]).unwrap(),
            matches: 7,
        });
        app.apply_trial_event(TrialEvent::Won {
            weeks: 60,
            matches: 7,
        });
        let text = render(&app);
        assert!(text.contains("Winner"));
        assert!(text.contains("60 weeks"));
        assert!(text.contains("1 year spent"));
        assert!(text.contains("7 matched"));
        assert!(text.contains("You won!"));
    }

    #[test]
    fn title_and_hints_agree_while_a_stop_drains() {
        let mut app = App::new(GameSettings::default(), true);
        for n in 1..=7 {
            app.toggle_number(n);
        }
        app.start_run();
        assert!(app.is_running());
        assert!(render(&app).contains("Drawing"));

        app.stop_run();
        let text = render(&app);
        assert!(text.contains("Stopping"), "{text}");
        assert!(!text.contains("Drawing"));
        assert!(text.contains("enter start"));

        app.shutdown();
        assert!(render(&app).contains("Stopped"));
    }

    #[test]
    fn cell_span_marks_cursor() {
        let palette = Palette::standard();
        let cell = CellView {
            number: 7,
            picked: true,
            locked: false,
            drawn: true,
            under_cursor: true,
        };
        let span = cell_span(cell, &palette, &glyphs(true));
        assert_eq!(span.content, "[ 7]");
        assert_eq!(span.style, styles::cell_hit(&palette));

        let plain = CellView {
            under_cursor: false,
            picked: false,
            drawn: false,
            locked: true,
            ..cell
        };
        let span = cell_span(plain, &palette, &glyphs(true));
        assert_eq!(span.content, "  7 ");
        assert_eq!(span.style, styles::cell_locked(&palette));
    }
}
