pub mod app;
pub mod ui;

use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use shiftly_core::{Config, FileStore, Session};

use crate::tui::app::{App, InputMode};

pub fn run(session: Session<FileStore>, config: &Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, config);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "tui loop failed");
        println!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(std::time::Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Left | KeyCode::Char('h') => app.previous_day(),
                KeyCode::Right | KeyCode::Char('l') => app.next_day(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_week(),
                KeyCode::Down | KeyCode::Char('j') => app.next_week(),
                KeyCode::Char('s') => app.nudge_start(false),
                KeyCode::Char('S') => app.nudge_start(true),
                KeyCode::Char('e') => app.nudge_end(false),
                KeyCode::Char('E') => app.nudge_end(true),
                KeyCode::Enter | KeyCode::Char('w') => app.save(),
                KeyCode::Char('r') => app.enter_rate_mode(),
                KeyCode::Char('x') => app.request_settle(),
                _ => {}
            },
            InputMode::EditingRate => match key.code {
                KeyCode::Enter => app.submit_rate(),
                KeyCode::Esc => app.exit_input_mode(),
                KeyCode::Char(c) => app.input_char(c),
                KeyCode::Backspace => app.delete_char(),
                KeyCode::Left => app.move_cursor_left(),
                KeyCode::Right => app.move_cursor_right(),
                _ => {}
            },
            InputMode::ConfirmingSettle => match key.code {
                KeyCode::Char(c) => app.answer_settle(c),
                KeyCode::Enter | KeyCode::Esc => app.answer_settle('n'),
                _ => {}
            },
        }
    }
}
