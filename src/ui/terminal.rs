use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use super::app::App;

/// Spin up the terminal backend, enter the draw loop, and keep processing input
/// until the user quits. The terminal is restored even when the loop fails.
pub fn run_app(app: &mut App) -> Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal backend")?;

    let result = event_loop(&mut terminal, app);

    cleanup_terminal(&mut terminal)?;
    info!("ui closed");
    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?;

        if !event::poll(Duration::from_millis(250)).context("event polling failed")? {
            continue;
        }

        if let Event::Key(key_event) = event::read().context("failed to read event")? {
            if key_event.kind != KeyEventKind::Press {
                continue;
            }
            if key_event.modifiers.contains(KeyModifiers::CONTROL)
                && key_event.code == KeyCode::Char('c')
            {
                return Ok(());
            }
            if app.handle_key_event(key_event)? {
                return Ok(());
            }
        }
    }
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal
        .show_cursor()
        .context("failed to restore cursor visibility")
}
