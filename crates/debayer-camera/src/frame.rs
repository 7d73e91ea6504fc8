use crate::CaptureError;
use debayer_base::Geometry;

/// One RGGB frame borrowed from the capture session.
///
/// The borrow ends at the next frame pull; the driver may requeue and
/// overwrite the memory after that.
#[derive(Debug, Clone, Copy)]
pub struct RawFrame<'a> {
    data: &'a [u8],
    geometry: Geometry,
    stride: usize,
    sequence: u32,
}

impl<'a> RawFrame<'a> {
    /// Wrap `data` holding `geometry.height` rows of `stride` bytes each.
    ///
    /// The last row only needs `geometry.width` bytes.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::DeviceFault` if the stride is narrower than a
    /// row or the buffer is too short for the geometry.
    pub fn new(
        data: &'a [u8],
        geometry: Geometry,
        stride: usize,
        sequence: u32,
    ) -> Result<Self, CaptureError> {
        let width = geometry.width as usize;
        if stride < width {
            return Err(CaptureError::DeviceFault(format!(
                "row stride {stride} is narrower than frame width {width}"
            )));
        }
        let needed = Self::min_len(geometry, stride);
        if data.len() < needed {
            return Err(CaptureError::DeviceFault(format!(
                "short frame: {} bytes, expected at least {needed}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            geometry,
            stride,
            sequence,
        })
    }

    /// Smallest buffer that holds a frame of `geometry` with `stride`.
    pub fn min_len(geometry: Geometry, stride: usize) -> usize {
        match geometry.height as usize {
            0 => 0,
            rows => stride * (rows - 1) + geometry.width as usize,
        }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// The `width` samples of row `y`, without padding.
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.geometry.width as usize]
    }
}

/// Result of one frame pull.
#[derive(Debug)]
pub enum FrameOutcome<'a> {
    /// A frame is ready.
    Frame(RawFrame<'a>),
    /// No frame yet; pull again.
    Retry,
    /// The session ended cleanly.
    Cancelled,
    /// The session is unusable.
    Fault(CaptureError),
}
