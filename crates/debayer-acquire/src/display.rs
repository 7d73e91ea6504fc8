use debayer_base::CHANNEL_EXPANSION;
use debayer_gpu::ConvertedFrame;
use std::fmt;

#[derive(Debug)]
pub struct DisplayError(String);

impl DisplayError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "display failed: {}", self.0)
    }
}

impl std::error::Error for DisplayError {}

/// Receives every converted frame, in acquisition order.
///
/// The frame is only lent for the duration of the call.
pub trait DisplaySink {
    fn show(&mut self, frame: &ConvertedFrame) -> Result<(), DisplayError>;
}

impl<D: DisplaySink + ?Sized> DisplaySink for Box<D> {
    fn show(&mut self, frame: &ConvertedFrame) -> Result<(), DisplayError> {
        (**self).show(frame)
    }
}

#[inline]
fn pack_u32(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Pack RGBA bytes into `0xAARRGGBB` words as window buffers expect.
///
/// Alpha is forced opaque. `out` is cleared first and reused.
pub fn pack_rgba(rgba: &[u8], out: &mut Vec<u32>) {
    out.clear();
    out.extend(
        rgba.chunks_exact(CHANNEL_EXPANSION)
            .map(|px| pack_u32(px[0], px[1], px[2])),
    );
}

#[cfg(feature = "window")]
mod window {
    use super::{DisplayError, DisplaySink, pack_rgba};
    use debayer_base::CancelToken;
    use debayer_gpu::ConvertedFrame;
    use minifb::{Key, Window, WindowOptions};

    /// Shows frames in a desktop window.
    ///
    /// The window is created on the first frame, sized to it. Closing the
    /// window or pressing Escape sets the cancel token; the capture side
    /// then stops cleanly at its next pull.
    pub struct WindowSink {
        title: String,
        window: Option<Window>,
        cancel: CancelToken,
        buffer: Vec<u32>,
    }

    impl WindowSink {
        pub fn new(title: impl Into<String>, cancel: CancelToken) -> Self {
            Self {
                title: title.into(),
                window: None,
                cancel,
                buffer: Vec::new(),
            }
        }
    }

    impl DisplaySink for WindowSink {
        fn show(&mut self, frame: &ConvertedFrame) -> Result<(), DisplayError> {
            let width = frame.geometry().width as usize;
            let height = frame.geometry().height as usize;

            let window = match &mut self.window {
                Some(window) => window,
                slot @ None => {
                    log::debug!("opening {}x{} window", width, height);
                    let window = Window::new(&self.title, width, height, WindowOptions::default())
                        .map_err(|e| DisplayError::new(format!("failed to open window: {e}")))?;
                    slot.insert(window)
                }
            };

            pack_rgba(frame.data(), &mut self.buffer);
            window
                .update_with_buffer(&self.buffer, width, height)
                .map_err(|e| DisplayError::new(e.to_string()))?;

            if !window.is_open() || window.is_key_down(Key::Escape) {
                log::info!("display closed, stopping");
                self.cancel.cancel();
            }
            Ok(())
        }
    }
}

#[cfg(feature = "window")]
pub use window::WindowSink;
