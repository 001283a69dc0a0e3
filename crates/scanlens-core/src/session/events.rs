//! Session events
//!
//! Emitted by the session and its sampling task, drained by the UI
//! adapter on its own tick.

use crate::camera::CameraError;
use crate::result::ScanResult;

/// Events the session publishes to its adapter.
#[derive(Debug)]
pub enum SessionEvent {
    /// Camera opened and periodic sampling began.
    ScanningStarted,
    /// Camera acquisition failed; the session stayed idle.
    StartFailed(CameraError),
    /// A frame decoded successfully. `Stopped` follows once the
    /// sampling task has released the stream.
    Detected(ScanResult),
    /// Sampling halted and the stream was released.
    Stopped,
}
