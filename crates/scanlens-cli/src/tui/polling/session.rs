//! Session event channel polling

use tokio::sync::mpsc::error::TryRecvError;

use super::PollResult;
use crate::tui::app::App;

/// Drain all queued session events into the app state (non-blocking).
pub fn poll_session_events(app: &mut App) -> PollResult {
    let mut result = PollResult::default();

    loop {
        match app.events.try_recv() {
            Ok(event) => {
                tracing::debug!(?event, "session event");
                app.apply_event(event);
                result.needs_redraw = true;
            }
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                // Session dropped its sender; nothing more will arrive.
                break;
            }
        }
    }

    result
}
