//! Nokhwa capture backend
//!
//! The capture thread owns the `nokhwa` camera for its whole lifetime
//! and keeps a shared latest-frame slot filled, so the sampling task
//! never blocks on the device. Dropping the stream stops the thread and
//! releases the camera.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use nokhwa::pixel_format::RgbAFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
    Resolution,
};
use nokhwa::Camera;

use super::device::{CameraDevice, FrameStream};
use super::types::{CameraConstraints, CameraError, CameraInfo, Facing};
use crate::frame::Frame;

/// Wait between grab attempts after a capture error.
const GRAB_RETRY: Duration = Duration::from_millis(30);

/// Default capture backend using `nokhwa`.
#[derive(Debug, Default)]
pub struct NokhwaDevice;

impl NokhwaDevice {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CameraDevice for NokhwaDevice {
    async fn open(
        &self,
        constraints: &CameraConstraints,
    ) -> Result<Box<dyn FrameStream>, CameraError> {
        let constraints = constraints.clone();
        // Device negotiation blocks on driver calls; keep it off the
        // async executor.
        let stream = tokio::task::spawn_blocking(move || NokhwaStream::open(&constraints))
            .await
            .map_err(|err| CameraError::Backend(err.to_string()))??;
        Ok(Box::new(stream))
    }
}

/// List cameras visible to the native backend.
pub fn list_devices() -> Result<Vec<CameraInfo>, CameraError> {
    let devices = nokhwa::query(ApiBackend::Auto).map_err(map_nokhwa_error)?;
    Ok(devices
        .iter()
        .enumerate()
        .map(|(position, info)| CameraInfo {
            index: match info.index() {
                CameraIndex::Index(i) => *i,
                CameraIndex::String(_) => position as u32,
            },
            name: info.human_name().to_string(),
            description: info.description().to_string(),
        })
        .collect())
}

struct NokhwaStream {
    latest: Arc<Mutex<Option<Frame>>>,
    running: Arc<AtomicBool>,
    pump: Option<thread::JoinHandle<()>>,
}

impl NokhwaStream {
    /// Spawn the capture thread and wait for it to report whether the
    /// device opened. Blocking; call from a blocking-friendly context.
    fn open(constraints: &CameraConstraints) -> Result<Self, CameraError> {
        let latest = Arc::new(Mutex::new(None));
        let running = Arc::new(AtomicBool::new(true));
        let (ready_tx, ready_rx): (
            Sender<Result<(), CameraError>>,
            Receiver<Result<(), CameraError>>,
        ) = mpsc::channel();

        let pump = thread::Builder::new()
            .name("scanlens-camera".to_string())
            .spawn({
                let constraints = constraints.clone();
                let latest = latest.clone();
                let running = running.clone();
                move || pump_loop(&constraints, &latest, &running, &ready_tx)
            })
            .map_err(|err| CameraError::Backend(err.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                latest,
                running,
                pump: Some(pump),
            }),
            Ok(Err(err)) => {
                let _ = pump.join();
                Err(err)
            }
            Err(_) => {
                let _ = pump.join();
                Err(CameraError::Backend(
                    "capture thread exited before reporting".to_string(),
                ))
            }
        }
    }
}

impl FrameStream for NokhwaStream {
    fn latest_frame(&mut self) -> Option<Frame> {
        self.latest.lock().ok()?.take()
    }
}

impl Drop for NokhwaStream {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(pump) = self.pump.take() {
            if pump.join().is_err() {
                tracing::warn!("camera capture thread panicked");
            }
        }
    }
}

/// Capture thread body: open the device, report readiness, then keep
/// the latest-frame slot filled until asked to stop.
fn pump_loop(
    constraints: &CameraConstraints,
    latest: &Mutex<Option<Frame>>,
    running: &AtomicBool,
    ready: &Sender<Result<(), CameraError>>,
) {
    let mut camera = match acquire(constraints) {
        Ok(camera) => {
            let _ = ready.send(Ok(()));
            camera
        }
        Err(err) => {
            let _ = ready.send(Err(err));
            return;
        }
    };

    while running.load(Ordering::Relaxed) {
        match camera.frame() {
            Ok(buffer) => match buffer.decode_image::<RgbAFormat>() {
                Ok(decoded) => {
                    let (width, height) = decoded.dimensions();
                    if let Some(frame) = Frame::from_rgba(width, height, decoded.into_raw()) {
                        if let Ok(mut slot) = latest.lock() {
                            *slot = Some(frame);
                        }
                    }
                }
                Err(err) => tracing::debug!("frame decode failed: {err}"),
            },
            Err(err) => {
                tracing::debug!("frame grab failed: {err}");
                thread::sleep(GRAB_RETRY);
            }
        }
    }

    if let Err(err) = camera.stop_stream() {
        tracing::debug!("stream shutdown failed: {err}");
    }
}

fn acquire(constraints: &CameraConstraints) -> Result<Camera, CameraError> {
    let devices = nokhwa::query(ApiBackend::Auto).map_err(map_nokhwa_error)?;
    let index = pick_device(&devices, constraints)?;

    let requested = RequestedFormat::new::<RgbAFormat>(RequestedFormatType::Closest(
        CameraFormat::new(
            Resolution::new(constraints.ideal_width, constraints.ideal_height),
            FrameFormat::MJPEG,
            30,
        ),
    ));

    let mut camera = Camera::new(index, requested).map_err(map_nokhwa_error)?;
    camera.open_stream().map_err(map_nokhwa_error)?;
    let resolution = camera.resolution();
    tracing::info!(
        width = resolution.width(),
        height = resolution.height(),
        "camera stream open"
    );
    Ok(camera)
}

/// Pick an explicit index when given, otherwise prefer a device whose
/// name matches the facing hint, falling back to the first device.
fn pick_device(
    devices: &[nokhwa::utils::CameraInfo],
    constraints: &CameraConstraints,
) -> Result<CameraIndex, CameraError> {
    if devices.is_empty() {
        return Err(CameraError::DeviceUnavailable(
            "no cameras detected".to_string(),
        ));
    }

    if let Some(index) = constraints.device {
        return Ok(CameraIndex::Index(index));
    }

    let hints: [&str; 2] = match constraints.facing {
        Facing::Rear => ["back", "rear"],
        Facing::Front => ["front", "user"],
    };
    let matched = devices.iter().find(|device| {
        let name = device.human_name().to_lowercase();
        hints.iter().any(|hint| name.contains(hint))
    });

    Ok(matched.unwrap_or(&devices[0]).index().clone())
}

fn map_nokhwa_error(err: nokhwa::NokhwaError) -> CameraError {
    let text = err.to_string();
    let lowered = text.to_lowercase();
    if lowered.contains("permission") || lowered.contains("denied") || lowered.contains("authoriz")
    {
        CameraError::PermissionDenied
    } else if lowered.contains("device") || lowered.contains("not found") || lowered.contains("busy")
    {
        CameraError::DeviceUnavailable(text)
    } else {
        CameraError::Backend(text)
    }
}
