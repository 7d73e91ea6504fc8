use crate::FrameOutcome;
use debayer_base::Geometry;

/// An open capture session.
///
/// Sessions are created by a backend-specific `open` and owned by a single
/// caller that pulls frames one at a time.
pub trait CaptureDevice {
    /// Frame geometry, fixed for the lifetime of the session.
    fn geometry(&self) -> Geometry;

    /// Pull the next frame.
    ///
    /// May block for a bounded time waiting for the driver. The returned
    /// frame borrows the session, so it cannot outlive the next pull.
    fn next_frame(&mut self) -> FrameOutcome<'_>;

    /// Release all device resources. Calling it again is a no-op.
    fn close(&mut self);
}

impl<C: CaptureDevice + ?Sized> CaptureDevice for Box<C> {
    fn geometry(&self) -> Geometry {
        (**self).geometry()
    }

    fn next_frame(&mut self) -> FrameOutcome<'_> {
        (**self).next_frame()
    }

    fn close(&mut self) {
        (**self).close()
    }
}
