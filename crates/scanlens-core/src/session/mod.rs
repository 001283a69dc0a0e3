//! Scan session lifecycle
//!
//! [`ScanSession`] owns the camera-acquire, poll-frame, decode,
//! publish-result lifecycle. The sampling task owns the open stream,
//! so cancelling the task releases the timer and the device together;
//! there is no window where one outlives the other.

mod events;
mod state;

pub use events::SessionEvent;
pub use state::SessionState;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::camera::{CameraConstraints, CameraDevice, FrameStream};
use crate::decode::{Decode, Inversion};
use crate::result::ScanResult;

/// Tunables for a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Sampling cadence.
    pub tick_interval: Duration,
    /// Stream constraints handed to the camera device.
    pub constraints: CameraConstraints,
    /// Luma polarity the decoder attempts.
    pub inversion: Inversion,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            constraints: CameraConstraints::default(),
            inversion: Inversion::Both,
        }
    }
}

/// A camera scan session.
///
/// All state mutations happen on the caller's task; the spawned
/// sampling task communicates back through the event channel returned
/// by [`ScanSession::new`].
pub struct ScanSession {
    camera: Arc<dyn CameraDevice>,
    decoder: Arc<dyn Decode>,
    options: SessionOptions,
    state: SessionState,
    last_result: Option<ScanResult>,
    events: UnboundedSender<SessionEvent>,
    cancel: Option<CancellationToken>,
    task: Option<JoinHandle<()>>,
}

impl ScanSession {
    pub fn new(
        camera: Arc<dyn CameraDevice>,
        decoder: Arc<dyn Decode>,
        options: SessionOptions,
    ) -> (Self, UnboundedReceiver<SessionEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let session = Self {
            camera,
            decoder,
            options,
            state: SessionState::Idle,
            last_result: None,
            events,
            cancel: None,
            task: None,
        };
        (session, rx)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn last_result(&self) -> Option<&ScanResult> {
        self.last_result.as_ref()
    }

    /// Acquire the camera and begin periodic sampling.
    ///
    /// No-op while a start is in flight or sampling is running; the
    /// active stream is never disturbed. On acquisition failure the
    /// session emits [`SessionEvent::StartFailed`] and returns to Idle.
    pub async fn start(&mut self) {
        if self.state.is_active() {
            tracing::debug!("start ignored: session already active");
            return;
        }
        // Reap a sampling task left over from a previous run.
        self.teardown().await;

        self.state = SessionState::Starting;
        match self.camera.open(&self.options.constraints).await {
            Ok(stream) => {
                self.state = SessionState::Scanning;
                let cancel = CancellationToken::new();
                // Notify before spawning so adapters always observe
                // ScanningStarted ahead of any detection.
                let _ = self.events.send(SessionEvent::ScanningStarted);
                self.task = Some(tokio::spawn(sample_loop(
                    stream,
                    self.decoder.clone(),
                    self.options.clone(),
                    cancel.child_token(),
                    self.events.clone(),
                )));
                self.cancel = Some(cancel);
                tracing::info!("scanning started");
            }
            Err(err) => {
                tracing::warn!("camera acquisition failed: {err}");
                self.state = SessionState::Idle;
                let _ = self.events.send(SessionEvent::StartFailed(err));
            }
        }
    }

    /// Halt sampling and release the stream. Idempotent: calling with
    /// nothing running clears nothing and changes no state.
    pub async fn stop(&mut self) {
        self.teardown().await;
        if self.state.is_active() {
            self.state = SessionState::Stopped;
            tracing::info!("scanning stopped");
        }
    }

    /// Clear any published result and start over from the top.
    pub async fn reset(&mut self) {
        self.last_result = None;
        self.start().await;
    }

    /// Record a detection drained from the event channel. The sampling
    /// task is already exiting and will release the stream itself.
    pub fn note_detected(&mut self, result: &ScanResult) {
        self.last_result = Some(result.clone());
        self.state = SessionState::Stopped;
    }

    async fn teardown(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                tracing::warn!("sampling task failed: {err}");
            }
        }
    }
}

/// Repeating sampling tick. Owns the stream; exits on cancellation or
/// after the first successful decode, dropping the stream either way.
async fn sample_loop(
    mut stream: Box<dyn FrameStream>,
    decoder: Arc<dyn Decode>,
    options: SessionOptions,
    cancel: CancellationToken,
    events: UnboundedSender<SessionEvent>,
) {
    let mut ticker = tokio::time::interval(options.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                // No-op until the stream has a complete frame ready.
                let Some(frame) = stream.latest_frame() else {
                    continue;
                };
                let square = frame.center_square();
                if let Some(decoded) = decoder.decode(&square, options.inversion) {
                    tracing::info!("QR code detected");
                    let _ = events.send(SessionEvent::Detected(ScanResult::new(decoded.text)));
                    break;
                }
            }
        }
    }

    drop(stream);
    let _ = events.send(SessionEvent::Stopped);
}
