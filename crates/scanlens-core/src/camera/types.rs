//! Camera types and errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which way the preferred camera faces.
///
/// Desktop backends rarely expose facing metadata, so this is applied as
/// a device-name hint with a fallback to the first enumerated device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Front,
    #[default]
    Rear,
}

/// Requested stream properties: preferred facing plus an ideal
/// resolution the backend gets as close to as it can.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraConstraints {
    pub facing: Facing,
    pub ideal_width: u32,
    pub ideal_height: u32,
    /// Explicit device index; overrides the facing hint when set.
    pub device: Option<u32>,
}

impl Default for CameraConstraints {
    fn default() -> Self {
        Self {
            facing: Facing::Rear,
            ideal_width: 640,
            ideal_height: 640,
            device: None,
        }
    }
}

/// A camera visible to the backend.
#[derive(Debug, Clone)]
pub struct CameraInfo {
    pub index: u32,
    pub name: String,
    pub description: String,
}

/// Camera acquisition and capture failures.
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("camera access denied")]
    PermissionDenied,
    #[error("no usable camera device: {0}")]
    DeviceUnavailable(String),
    #[error("camera backend error: {0}")]
    Backend(String),
}
