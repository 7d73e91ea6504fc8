use debayer_base::{CHANNEL_EXPANSION, Geometry};

/// Host buffer holding one converted RGBA frame.
///
/// Allocated once per run and overwritten by every [`Converter::wait`].
///
/// [`Converter::wait`]: crate::Converter::wait
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedFrame {
    geometry: Geometry,
    data: Vec<u8>,
}

impl ConvertedFrame {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            data: vec![0u8; geometry.converted_len()],
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// RGBA bytes, row-major, no padding.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.geometry.width as usize + x as usize) * CHANNEL_EXPANSION;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }
}

/// Whether `convert` returns right after the launch or after completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    #[default]
    Async,
    Blocking,
}

/// Handle for one launched conversion.
///
/// Must be handed back to [`Converter::wait`] before the converted frame is
/// read.
///
/// [`Converter::wait`]: crate::Converter::wait
#[must_use = "the conversion result is only visible after waiting on its token"]
#[derive(Debug, PartialEq, Eq)]
pub struct StreamToken {
    sequence: u64,
    complete: bool,
}

impl StreamToken {
    /// Token for work still running on the stream.
    pub fn pending(sequence: u64) -> Self {
        Self {
            sequence,
            complete: false,
        }
    }

    /// Token for work that finished before `convert` returned.
    pub fn completed(sequence: u64) -> Self {
        Self {
            sequence,
            complete: true,
        }
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
