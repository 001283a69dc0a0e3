//! Main TUI event loop
//!
//! Terminal setup, crossterm event stream, draw tick, and session
//! event polling.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc::UnboundedReceiver;

use scanlens_core::{ScanSession, SessionEvent};

use crate::tui::app::App;
use crate::tui::components;
use crate::tui::polling::poll_session_events;

/// Draw cadence; session events are polled on the same tick.
const TICK: Duration = Duration::from_millis(50);

pub async fn run(session: ScanSession, events: UnboundedReceiver<SessionEvent>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(session, events);

    // The original scanner starts itself shortly after load; do the
    // same so pointing a code at the camera is all it takes.
    app.start_scan().await;

    let result = event_loop(&mut terminal, &mut app).await;

    // Always release the camera before giving the terminal back.
    app.session.stop().await;
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut stream = EventStream::new();
    let mut ticker = tokio::time::interval(TICK);
    let mut dirty = true;

    while !app.should_quit {
        if dirty {
            terminal.draw(|frame| components::draw(frame, app))?;
            dirty = false;
        }

        tokio::select! {
            maybe_event = stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        super::keys::handle_key(app, key).await;
                        dirty = true;
                    }
                    Some(Ok(Event::Resize(..))) => dirty = true,
                    Some(Ok(_)) => {}
                    Some(Err(err)) => tracing::warn!("terminal event error: {err}"),
                    None => break,
                }
            }
            _ = ticker.tick() => {
                if poll_session_events(app).needs_redraw {
                    dirty = true;
                }
                if app.tick_ui() {
                    dirty = true;
                }
            }
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
