//! Camera capture module for device access and frame capture.
//!
//! This module provides:
//! - Device enumeration via [`list_devices`]
//! - The [`CameraDevice`] / [`FrameStream`] seam the scan session polls
//! - A `nokhwa`-backed default device, [`NokhwaDevice`]

mod backend;
mod device;
mod types;

pub use backend::{list_devices, NokhwaDevice};
pub use device::{CameraDevice, FrameStream};
pub use types::{CameraConstraints, CameraError, CameraInfo, Facing};
