use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::session::Session;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_up};

pub(crate) fn as_tui(session: &mut Session) -> Result<()> {
    let mut app = App::new();
    app.refresh(session.ledger());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("TUI exited with error: {e:#}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session: &mut Session,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, table borders and header, month summary
            let content_height = f.area().height.saturating_sub(9) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app, session.ledger());
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            handle_key(key, app, session)?;
        }
    }
    Ok(())
}

pub(crate) fn handle_key(key: event::KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, session),
        InputMode::Command => handle_command_input(key, app, session),
        InputMode::Confirm => {
            handle_confirm_input(key, app, session);
            Ok(())
        }
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('a') => {
            app.input_mode = InputMode::Command;
            app.command_input = "add ".into();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let page = app.visible_rows.max(1);
            scroll_down(&mut app.expense_index, &mut app.expense_scroll, app.rows.len(), page);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_up(&mut app.expense_index, &mut app.expense_scroll);
        }
        KeyCode::Char('g') => {
            app.expense_index = 0;
            app.expense_scroll = 0;
        }
        KeyCode::Char('G') => {
            let page = app.visible_rows.max(1);
            scroll_to_bottom(&mut app.expense_index, &mut app.expense_scroll, app.rows.len(), page);
        }
        KeyCode::Char('1') => switch_screen(app, session, Screen::Expenses),
        KeyCode::Char('2') => switch_screen(app, session, Screen::Chart),
        KeyCode::Tab | KeyCode::BackTab => {
            let next = match app.screen {
                Screen::Expenses => Screen::Chart,
                Screen::Chart => Screen::Expenses,
            };
            switch_screen(app, session, next);
        }
        KeyCode::Char('p') if app.screen == Screen::Expenses => {
            commands::handle_command("paid", app, session)?;
        }
        KeyCode::Char('D') if app.screen == Screen::Expenses => {
            commands::handle_command("delete", app, session)?;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, session)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, session: &mut Session) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                commands::confirm(action, app, session);
            }
        }
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.set_status("Cancelled");
        }
    }
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
}

fn switch_screen(app: &mut App, session: &Session, screen: Screen) {
    app.screen = screen;
    if screen == Screen::Expenses {
        app.refresh(session.ledger());
    }
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
