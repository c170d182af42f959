//! Interactive browser: an editor view of the selected match and a result
//! pane, driven by function keys like the classic cscope editor bindings.

pub mod app;
pub mod list;
mod ui;

use crate::query::{Operation, Selection};
use crate::utils::AppConfig;
use anyhow::{Context, Result};
use app::{Action, App, PromptKind};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run(config: &AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Clear the terminal to prevent any artifacts from previous content
    terminal.clear()?;

    let mut app = App::new(config);

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Term, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &*app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        // Only handle key press events, not release or repeat
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if let (KeyModifiers::CONTROL, KeyCode::Char('c')) = (key.modifiers, key.code) {
            return Ok(());
        }

        if app.prompt.is_some() {
            handle_prompt_key(app, key);
            continue;
        }

        match handle_browse_key(app, key) {
            Some(Action::Open(selection)) => {
                if let Err(e) = open_file_at_line(terminal, &app.editor, &selection) {
                    tracing::warn!(error = %e, "failed to open editor");
                    app.status_message = format!("Failed to open editor: {}", e);
                }
            }
            Some(Action::None) => {}
            None => return Ok(()),
        }
    }
}

fn handle_prompt_key(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('g')) => app.cancel_prompt(),
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => app.prompt_delete_word(),
        (KeyModifiers::CONTROL, KeyCode::Char('h')) => app.prompt_pop(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
            KeyCode::Esc => app.cancel_prompt(),
            KeyCode::Enter => app.submit_prompt(),
            KeyCode::Backspace => app.prompt_pop(),
            KeyCode::Char(c) => app.prompt_push(c),
            _ => {}
        },
        _ => {}
    }
}

/// Returns `None` when the user asked to quit
fn handle_browse_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        // delete-window: close the result pane
        (KeyModifiers::CONTROL, KeyCode::Char('g')) => app.close_results(),
        (KeyModifiers::CONTROL, KeyCode::Char('n')) => app.select_next(),
        (KeyModifiers::CONTROL, KeyCode::Char('p')) => app.select_prev(),
        (KeyModifiers::CONTROL, KeyCode::Char('d')) => app.select_page_down(),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.select_page_up(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
            KeyCode::F(2) => app.open_prompt(PromptKind::Query(Operation::Symbol)),
            KeyCode::F(3) => app.open_prompt(PromptKind::Query(Operation::Definition)),
            KeyCode::F(4) => app.open_prompt(PromptKind::Query(Operation::Callers)),
            KeyCode::F(12) => app.open_prompt(PromptKind::Directory),
            KeyCode::Enter | KeyCode::Right => return Some(app.select_current()),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::PageDown => app.select_page_down(),
            KeyCode::PageUp => app.select_page_up(),
            KeyCode::Home | KeyCode::Char('g') => app.select_first(),
            KeyCode::End | KeyCode::Char('G') => app.select_last(),
            KeyCode::Esc | KeyCode::Char('q') => return None,
            _ => {}
        },
        _ => {}
    }
    Some(Action::None)
}

/// Hand the terminal to the editor until it exits
fn open_file_at_line(terminal: &mut Term, editor: &str, selection: &Selection) -> Result<()> {
    let mut cmd = app::editor_command(editor, selection).context("No editor configured")?;
    tracing::debug!(
        editor,
        path = %selection.path.display(),
        line = selection.line,
        "opening editor"
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    let status = cmd
        .status()
        .with_context(|| format!("Failed to run {}", editor));

    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.clear()?;

    status.map(|_| ())
}
