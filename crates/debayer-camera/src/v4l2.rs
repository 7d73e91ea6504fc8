use crate::queue::{self, BufferQueue, Dequeued, QueueTracker};
use crate::{CaptureConfig, CaptureDevice, CaptureError, FrameOutcome};
use debayer_base::{CancelToken, Geometry};
use std::io;
use v4l::buffer::Type;
use v4l::control::{Control, Value};
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

// V4L2_CID_BASE + 17 / + 19
const V4L2_CID_EXPOSURE: u32 = 0x0098_0911;
const V4L2_CID_GAIN: u32 = 0x0098_0913;

const RGGB: &[u8; 4] = b"RGGB";

/// V4L2 capture session producing 8-bit RGGB frames.
pub struct V4l2Camera {
    config: CaptureConfig,
    device: Option<Device>,
    stream: Option<MmapStream<'static>>,
    tracker: QueueTracker,
    geometry: Geometry,
    stride: usize,
    cancel: CancelToken,
}

impl std::fmt::Debug for V4l2Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Camera")
            .field("config", &self.config)
            .field("device", &self.device.as_ref().map(|_| "<v4l::Device>"))
            .field("stream", &self.stream.is_some())
            .field("geometry", &self.geometry)
            .field("stride", &self.stride)
            .finish()
    }
}

impl V4l2Camera {
    /// Open and configure the device at `config.device()`.
    ///
    /// Keeps the device's current resolution, switches it to RGGB, applies
    /// exposure and gain if set, and queues the mmap buffers. `cancel` is
    /// checked at the top of every frame pull.
    ///
    /// # Errors
    ///
    /// - `CaptureError::NotFound` / `PermissionDenied` if the path is missing
    ///   or inaccessible (checked before any driver call for `NotFound`)
    /// - `CaptureError::InvalidConfig` if the driver refuses RGGB, a control
    ///   value, or the stream setup
    pub fn open(config: CaptureConfig, cancel: CancelToken) -> Result<Self, CaptureError> {
        config.validate()?;

        let path = config.device();
        let device = Device::with_path(path).map_err(|e| CaptureError::from_open(path, e))?;

        let current = Capture::format(&device).map_err(|e| CaptureError::from_open(path, e))?;
        let requested = Format::new(current.width, current.height, FourCC::new(RGGB));
        let actual = Capture::set_format(&device, &requested)
            .map_err(|e| CaptureError::InvalidConfig(format!("set format: {e}")))?;

        if actual.fourcc != FourCC::new(RGGB) {
            return Err(CaptureError::InvalidConfig(format!(
                "device does not support RGGB, got {}",
                actual.fourcc
            )));
        }

        let geometry = Geometry::new(actual.width, actual.height);
        geometry
            .validate_bayer()
            .map_err(|e| CaptureError::InvalidConfig(e.to_string()))?;
        let stride = match actual.stride as usize {
            0 => actual.width as usize,
            stride => stride,
        };

        if let Some(exposure) = config.exposure() {
            set_integer_control(&device, V4L2_CID_EXPOSURE, "exposure", exposure)?;
        }
        if let Some(gain) = config.gain() {
            set_integer_control(&device, V4L2_CID_GAIN, "gain", gain)?;
        }

        let mut stream =
            MmapStream::with_buffers(&device, Type::VideoCapture, config.buffer_count())
                .map_err(|e| CaptureError::InvalidConfig(format!("mmap stream: {e}")))?;
        stream.set_timeout(config.timeout());

        log::info!(
            "opened {}: {} RGGB, stride {}, {} buffers",
            path.display(),
            geometry,
            stride,
            config.buffer_count()
        );

        Ok(Self {
            config,
            device: Some(device),
            stream: Some(stream),
            tracker: QueueTracker::default(),
            geometry,
            stride,
            cancel,
        })
    }
}

fn set_integer_control(device: &Device, id: u32, name: &str, value: i32) -> Result<(), CaptureError> {
    let controls = device
        .query_controls()
        .map_err(|e| CaptureError::InvalidConfig(format!("query controls: {e}")))?;
    let description = controls
        .iter()
        .find(|description| description.id == id)
        .ok_or_else(|| CaptureError::InvalidConfig(format!("device has no {name} control")))?;

    let value = value as i64;
    if value < description.minimum || value > description.maximum {
        return Err(CaptureError::InvalidConfig(format!(
            "{name} {value} outside [{}, {}]",
            description.minimum, description.maximum
        )));
    }

    device
        .set_control(Control {
            id,
            value: Value::Integer(value),
        })
        .map_err(|e| CaptureError::InvalidConfig(format!("set {name} to {value}: {e}")))?;
    log::debug!("{name} set to {value}");
    Ok(())
}

impl BufferQueue for MmapStream<'static> {
    fn next(&mut self) -> io::Result<Dequeued<'_>> {
        let (data, metadata) = CaptureStream::next(self)?;
        Ok(Dequeued {
            data,
            bytesused: metadata.bytesused,
            sequence: metadata.sequence,
        })
    }

    fn dequeue(&mut self) -> io::Result<()> {
        CaptureStream::dequeue(self).map(|_| ())
    }
}

impl CaptureDevice for V4l2Camera {
    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn next_frame(&mut self) -> FrameOutcome<'_> {
        if self.cancel.is_cancelled() {
            return FrameOutcome::Cancelled;
        }

        let (geometry, stride) = (self.geometry, self.stride);
        let Some(stream) = self.stream.as_mut() else {
            return FrameOutcome::Fault(CaptureError::DeviceFault("session is closed".to_string()));
        };

        let result = self.tracker.pull(stream);
        queue::classify(result, geometry, stride)
    }

    fn close(&mut self) {
        // stream first: it unmaps buffers that reference the device
        let had_stream = self.stream.take().is_some();
        let had_device = self.device.take().is_some();
        if had_stream || had_device {
            log::info!("closed {}", self.config.device().display());
        }
    }
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        self.close();
    }
}
