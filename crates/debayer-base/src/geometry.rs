use std::fmt;

/// Bytes per converted pixel (RGBA).
pub const CHANNEL_EXPANSION: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    Empty { width: u32, height: u32 },
    Odd { width: u32, height: u32 },
    Overflow,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::Empty { width, height } => {
                write!(f, "frame geometry {width}x{height} has no pixels")
            }
            GeometryError::Odd { width, height } => {
                write!(f, "frame geometry {width}x{height} is not a whole number of Bayer quads")
            }
            GeometryError::Overflow => write!(f, "frame geometry overflows buffer size"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Width and height of a frame in pixels.
///
/// A capture session reports its geometry once at open time; everything
/// downstream (GPU buffers, converted frames, the display window) is sized
/// from that single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size in bytes of a tightly packed single-channel raw frame.
    pub fn raw_len(&self) -> usize {
        self.pixels()
    }

    /// Size in bytes of the converted RGBA frame.
    pub fn converted_len(&self) -> usize {
        self.pixels() * CHANNEL_EXPANSION
    }

    /// Checks that the geometry can hold RGGB quads: non-zero, even in both
    /// dimensions, and small enough that every buffer size fits in `usize`.
    pub fn validate_bayer(&self) -> Result<(), GeometryError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(GeometryError::Empty { width, height });
        }
        if width % 2 != 0 || height % 2 != 0 {
            return Err(GeometryError::Odd { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(CHANNEL_EXPANSION))
            .ok_or(GeometryError::Overflow)?;
        Ok(())
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
