use crate::{ConvertError, ConvertedFrame, StreamToken, SyncMode};
use debayer_base::Geometry;
use debayer_camera::RawFrame;

/// A conversion context bound to one frame geometry.
pub trait Converter {
    /// Geometry the context's buffers were sized for.
    fn geometry(&self) -> Geometry;

    /// Launch the demosaic of `frame`.
    ///
    /// The raw frame is consumed before this returns, so the capture
    /// session may reuse its buffer right after. With `SyncMode::Blocking`
    /// the returned token is already complete. A launch while an earlier
    /// token is unresolved drains the earlier work first.
    fn convert(&mut self, frame: &RawFrame<'_>, mode: SyncMode) -> Result<StreamToken, ConvertError>;

    /// Block until `token`'s work is done and copy the result into `output`.
    ///
    /// Only the token of the most recent launch is accepted.
    fn wait(&mut self, token: StreamToken, output: &mut ConvertedFrame) -> Result<(), ConvertError>;

    /// Release all buffers and the stream. Calling it again is a no-op.
    fn destroy(&mut self) -> Result<(), ConvertError>;
}

impl<C: Converter + ?Sized> Converter for Box<C> {
    fn geometry(&self) -> Geometry {
        (**self).geometry()
    }

    fn convert(&mut self, frame: &RawFrame<'_>, mode: SyncMode) -> Result<StreamToken, ConvertError> {
        (**self).convert(frame, mode)
    }

    fn wait(&mut self, token: StreamToken, output: &mut ConvertedFrame) -> Result<(), ConvertError> {
        (**self).wait(token, output)
    }

    fn destroy(&mut self) -> Result<(), ConvertError> {
        (**self).destroy()
    }
}
