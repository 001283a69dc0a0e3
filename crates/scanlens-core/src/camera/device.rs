//! Camera device abstraction
//!
//! [`CameraDevice`] opens a [`FrameStream`] for a set of constraints.
//! The stream hands out the most recent complete frame without
//! blocking; callers poll it on their own cadence.

use async_trait::async_trait;

use super::types::{CameraConstraints, CameraError};
use crate::frame::Frame;

/// Grants access to a camera stream.
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// Open a stream matching the constraints as closely as possible.
    ///
    /// Fails with [`CameraError::PermissionDenied`] or
    /// [`CameraError::DeviceUnavailable`] when acquisition is refused.
    async fn open(
        &self,
        constraints: &CameraConstraints,
    ) -> Result<Box<dyn FrameStream>, CameraError>;
}

/// An open camera stream.
///
/// Dropping the stream halts capture and releases the device.
pub trait FrameStream: Send {
    /// The latest complete frame, or `None` if capture has not produced
    /// one since the last call.
    fn latest_frame(&mut self) -> Option<Frame>;
}
