use crate::CaptureError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for opening a capture session.
#[derive(Clone, Debug)]
pub struct CaptureConfig {
    device: PathBuf,
    exposure: Option<i32>,
    gain: Option<i32>,
    buffer_count: u32,
    timeout: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from("/dev/video0"),
            exposure: None,
            gain: None,
            buffer_count: 4,
            timeout: Duration::from_millis(1000),
        }
    }
}

impl CaptureConfig {
    /// Set the device path (e.g., "/dev/video0").
    pub fn with_device(mut self, device: impl Into<PathBuf>) -> Self {
        self.device = device.into();
        self
    }

    /// Set the exposure control. `None` leaves the device default.
    pub fn with_exposure(mut self, exposure: Option<i32>) -> Self {
        self.exposure = exposure;
        self
    }

    /// Set the analog gain control. `None` leaves the device default.
    pub fn with_gain(mut self, gain: Option<i32>) -> Self {
        self.gain = gain;
        self
    }

    /// Set the number of mmap buffers queued to the driver.
    pub fn with_buffer_count(mut self, buffer_count: u32) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    /// Set how long a single frame pull may wait before answering `Retry`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn device(&self) -> &Path {
        &self.device
    }

    pub fn exposure(&self) -> Option<i32> {
        self.exposure
    }

    pub fn gain(&self) -> Option<i32> {
        self.gain
    }

    pub fn buffer_count(&self) -> u32 {
        self.buffer_count
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Checks everything that can be checked without talking to a driver.
    ///
    /// # Errors
    ///
    /// - `CaptureError::NotFound` if the device path does not exist
    /// - `CaptureError::InvalidConfig` if the buffer count is zero
    pub fn validate(&self) -> Result<(), CaptureError> {
        if !self.device.exists() {
            return Err(CaptureError::NotFound(self.device.clone()));
        }
        if self.buffer_count == 0 {
            return Err(CaptureError::InvalidConfig(
                "buffer count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
