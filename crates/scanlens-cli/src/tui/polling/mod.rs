//! Session event polling
//!
//! Drains the session's event channel on the draw tick without ever
//! blocking the event loop.

mod session;

pub use session::poll_session_events;

/// Result of a polling pass.
#[derive(Debug, Default)]
pub struct PollResult {
    /// Whether any event arrived that requires a redraw.
    pub needs_redraw: bool,
}
