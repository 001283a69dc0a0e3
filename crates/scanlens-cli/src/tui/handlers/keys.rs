//! Key bindings
//!
//! Maps control keys onto session methods. Controls that are not
//! visible in the current state are ignored, mirroring the start/stop
//! button visibility.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::tui::app::App;

pub async fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('s') => {
            if app.start_visible() {
                app.start_scan().await;
            }
        }
        KeyCode::Char('x') => {
            if app.stop_visible() {
                app.stop_scan().await;
            }
        }
        KeyCode::Char('n') => {
            if app.show_result {
                app.new_scan().await;
            }
        }
        KeyCode::Char('c') => app.copy_result(),
        KeyCode::Char('o') => app.open_result(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use async_trait::async_trait;
    use scanlens_core::{
        CameraConstraints, CameraDevice, CameraError, Decode, Decoded, Frame, FrameStream,
        Inversion, ScanResult, ScanSession, SessionEvent, SessionOptions,
    };

    struct NullCamera;

    #[async_trait]
    impl CameraDevice for NullCamera {
        async fn open(
            &self,
            _constraints: &CameraConstraints,
        ) -> Result<Box<dyn FrameStream>, CameraError> {
            Err(CameraError::DeviceUnavailable("test".to_string()))
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

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_q_quits() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Char('q'))).await;
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits() {
        let mut app = test_app();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        )
        .await;
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_new_scan_ignored_without_result() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Char('n'))).await;
        // No result panel, so the key does nothing
        assert!(!app.show_result);
        assert_eq!(app.status.text, "Press s to start scanning.");
    }

    #[tokio::test]
    async fn test_new_scan_hides_result_and_restarts() {
        let mut app = test_app();
        app.apply_event(SessionEvent::Detected(ScanResult::new("hello")));
        assert!(app.show_result);

        handle_key(&mut app, press(KeyCode::Char('n'))).await;
        assert!(!app.show_result);
        assert!(app.result.is_none());
        assert!(app.session.last_result().is_none());
    }
}
