//! Camera access boundary

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

/// Camera request failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("{0}")]
    Denied(String),

    #[error("no camera found at {0}")]
    NotFound(String),

    #[error("camera busy: {0}")]
    Busy(String),

    #[error("{0}")]
    Other(String),
}

/// Media constraints for a stream request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoConstraints {
    pub video: bool,
    pub audio: bool,
}

impl VideoConstraints {
    /// Video only, no audio
    pub fn video_only() -> Self {
        Self {
            video: true,
            audio: false,
        }
    }
}

/// Permission-gated access to a video stream
#[async_trait]
pub trait CameraAccess: Send + Sync {
    /// Resolve once the stream is granted; the stream itself is released immediately
    async fn request_stream(&self, constraints: VideoConstraints) -> Result<(), CameraError>;
}

/// Camera backed by a video device node
#[derive(Debug, Clone)]
pub struct DeviceCamera {
    device: PathBuf,
}

impl DeviceCamera {
    pub fn new(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
        }
    }
}

#[async_trait]
impl CameraAccess for DeviceCamera {
    async fn request_stream(&self, constraints: VideoConstraints) -> Result<(), CameraError> {
        if !constraints.video {
            return Err(CameraError::Other("no video track requested".to_string()));
        }

        tokio::fs::OpenOptions::new()
            .read(true)
            .open(&self.device)
            .await
            .map(drop)
            .map_err(|e| self.map_io_error(e))
    }
}

/// `EBUSY` on Linux and the BSDs
#[cfg(unix)]
const EBUSY: i32 = 16;

impl DeviceCamera {
    fn map_io_error(&self, e: io::Error) -> CameraError {
        let device = self.device.display().to_string();

        #[cfg(unix)]
        if e.raw_os_error() == Some(EBUSY) {
            return CameraError::Busy(device);
        }

        match e.kind() {
            io::ErrorKind::NotFound => CameraError::NotFound(device),
            io::ErrorKind::PermissionDenied => {
                CameraError::Denied(format!("permission denied for {}", device))
            }
            _ => CameraError::Other(e.to_string()),
        }
    }
}
