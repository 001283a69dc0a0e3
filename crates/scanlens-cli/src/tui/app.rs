//! Application state for the TUI
//!
//! `App` is the adapter between the terminal and the scan session: key
//! handlers call session methods, and session events drained by the
//! polling module mutate the UI state here.

use std::time::{Duration, Instant};

use arboard::Clipboard;
use tokio::sync::mpsc::UnboundedReceiver;

use scanlens_core::{CameraError, ScanResult, ScanSession, SessionEvent};

use super::theme::Theme;

/// How long the copy confirmation stays on the copy control.
const COPY_FLASH: Duration = Duration::from_secs(2);

/// Status line severity, used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

pub struct App {
    pub session: ScanSession,
    pub events: UnboundedReceiver<SessionEvent>,
    pub status: StatusLine,
    pub result: Option<ScanResult>,
    pub show_result: bool,
    pub copied_at: Option<Instant>,
    pub theme: Theme,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: ScanSession, events: UnboundedReceiver<SessionEvent>) -> Self {
        Self {
            session,
            events,
            status: StatusLine::info("Press s to start scanning."),
            result: None,
            show_result: false,
            copied_at: None,
            theme: Theme::default(),
            should_quit: false,
        }
    }

    /// The start/stop control pair mirrors the session state: start is
    /// shown while nothing is running, stop while a scan is active.
    pub fn start_visible(&self) -> bool {
        !self.session.state().is_active()
    }

    pub fn stop_visible(&self) -> bool {
        self.session.state().is_active()
    }

    pub async fn start_scan(&mut self) {
        self.status = StatusLine::info("Starting camera...");
        self.session.start().await;
    }

    pub async fn stop_scan(&mut self) {
        self.session.stop().await;
        if !self.show_result {
            self.status = StatusLine::info("Scanner stopped.");
        }
    }

    /// Hide the result panel and re-enter the scan lifecycle.
    pub async fn new_scan(&mut self) {
        self.show_result = false;
        self.result = None;
        self.copied_at = None;
        self.status = StatusLine::info("Starting camera...");
        self.session.reset().await;
    }

    pub fn copy_result(&mut self) {
        let Some(result) = &self.result else {
            return;
        };
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(result.text.clone())) {
            Ok(()) => self.copied_at = Some(Instant::now()),
            Err(err) => tracing::warn!("clipboard copy failed: {err}"),
        }
    }

    pub fn open_result(&self) {
        let Some(result) = &self.result else {
            return;
        };
        if !result.is_url {
            return;
        }
        if let Err(err) = webbrowser::open(&result.text) {
            tracing::warn!("failed to open link: {err}");
        }
    }

    pub fn copied_flash_active(&self) -> bool {
        self.copied_at.is_some_and(|at| at.elapsed() < COPY_FLASH)
    }

    /// Expire transient UI state. Returns true while a redraw is still
    /// needed to keep the display current.
    pub fn tick_ui(&mut self) -> bool {
        if let Some(at) = self.copied_at {
            if at.elapsed() >= COPY_FLASH {
                self.copied_at = None;
            }
            return true;
        }
        false
    }

    /// Apply one session event to the UI state.
    pub fn apply_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::ScanningStarted => {
                self.status = StatusLine::info("Scanning for QR codes...");
            }
            SessionEvent::StartFailed(err) => {
                self.status = match err {
                    CameraError::PermissionDenied => {
                        StatusLine::error("Camera access denied. Please allow camera permissions.")
                    }
                    CameraError::DeviceUnavailable(detail) => {
                        StatusLine::error(format!("Camera unavailable: {detail}"))
                    }
                    CameraError::Backend(detail) => {
                        StatusLine::error(format!("Camera error: {detail}"))
                    }
                };
            }
            SessionEvent::Detected(result) => {
                self.status = StatusLine::success("QR code detected!");
                self.session.note_detected(&result);
                self.result = Some(result);
                self.show_result = true;
            }
            SessionEvent::Stopped => {
                // Stream released; control visibility follows session
                // state on the next draw.
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use async_trait::async_trait;
    use scanlens_core::{
        CameraConstraints, CameraDevice, Decode, Decoded, Frame, FrameStream, Inversion,
        SessionOptions,
    };

    struct NullCamera;

    #[async_trait]
    impl CameraDevice for NullCamera {
        async fn open(
            &self,
            _constraints: &CameraConstraints,
        ) -> Result<Box<dyn FrameStream>, CameraError> {
            Err(CameraError::PermissionDenied)
        }
    }

    struct NullDecoder;

    impl Decode for NullDecoder {
        fn decode(&self, _frame: &Frame, _inversion: Inversion) -> Option<Decoded> {
            None
        }
    }

    fn test_app() -> App {
        let (session, events) = ScanSession::new(
            Arc::new(NullCamera),
            Arc::new(NullDecoder),
            SessionOptions::default(),
        );
        App::new(session, events)
    }

    #[test]
    fn test_detected_event_shows_result_panel() {
        let mut app = test_app();
        app.apply_event(SessionEvent::Detected(ScanResult::new(
            "https://example.com",
        )));

        assert!(app.show_result);
        assert_eq!(app.status.kind, StatusKind::Success);
        let result = app.result.as_ref().unwrap();
        assert!(result.is_url);
        // Session recorded the stop; the start control is visible again
        assert!(app.start_visible());
        assert!(!app.stop_visible());
    }

    #[test]
    fn test_denied_event_sets_error_status() {
        let mut app = test_app();
        app.apply_event(SessionEvent::StartFailed(CameraError::PermissionDenied));
        assert_eq!(app.status.kind, StatusKind::Error);
        assert!(app.status.text.contains("denied"));
        assert!(!app.show_result);
    }

    #[test]
    fn test_plain_text_result_hides_open_affordance() {
        let mut app = test_app();
        app.apply_event(SessionEvent::Detected(ScanResult::new("plain text")));
        assert!(!app.result.as_ref().unwrap().is_url);
    }

    #[tokio::test]
    async fn test_start_denied_leaves_start_visible() {
        let mut app = test_app();
        app.start_scan().await;
        // Drain the failure event the session queued
        while let Ok(event) = app.events.try_recv() {
            app.apply_event(event);
        }
        assert!(app.start_visible());
        assert_eq!(app.status.kind, StatusKind::Error);
    }

    #[test]
    fn test_copy_without_result_is_noop() {
        let mut app = test_app();
        app.copy_result();
        assert!(app.copied_at.is_none());
    }
}
