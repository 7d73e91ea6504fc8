//! Buffer ownership across frame pulls.
//!
//! An mmap stream's `next` hands the previously returned buffer back to the
//! driver before it dequeues a new one. If that dequeue then times out, the
//! buffer is already queued and a plain retry would queue it a second time.
//! [`QueueTracker`] remembers that and takes one buffer back first.

use crate::{CaptureError, FrameOutcome, RawFrame};
use debayer_base::Geometry;
use std::io;

/// One filled buffer returned by the driver.
#[derive(Debug)]
pub(crate) struct Dequeued<'a> {
    pub data: &'a [u8],
    pub bytesused: u32,
    pub sequence: u32,
}

/// The part of a capture stream a session drives.
pub(crate) trait BufferQueue {
    /// Requeue the buffer last returned (starting the stream on first use),
    /// then dequeue the next filled one.
    fn next(&mut self) -> io::Result<Dequeued<'_>>;

    /// Dequeue one filled buffer without requeueing anything.
    fn dequeue(&mut self) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Ownership {
    /// Stream not started yet.
    Idle,
    /// The caller holds the last dequeued buffer.
    Holding,
    /// The held buffer went back to the driver but nothing came out.
    Owed,
}

#[derive(Debug)]
pub(crate) struct QueueTracker {
    state: Ownership,
}

impl Default for QueueTracker {
    fn default() -> Self {
        Self {
            state: Ownership::Idle,
        }
    }
}

impl QueueTracker {
    #[cfg(test)]
    pub(crate) fn state(&self) -> Ownership {
        self.state
    }

    /// Pull the next filled buffer from `queue`.
    ///
    /// When a buffer is owed, the one taken back to settle it is dropped
    /// unread; the caller sees the buffer after it.
    pub(crate) fn pull<'q, Q: BufferQueue>(&mut self, queue: &'q mut Q) -> io::Result<Dequeued<'q>> {
        if self.state == Ownership::Owed {
            queue.dequeue()?;
            log::debug!("recovered a buffer after an interrupted dequeue, dropping one frame");
            self.state = Ownership::Holding;
        }

        match queue.next() {
            Ok(buffer) => {
                self.state = Ownership::Holding;
                Ok(buffer)
            }
            Err(err) => {
                if is_transient(&err) {
                    self.state = Ownership::Owed;
                }
                Err(err)
            }
        }
    }
}

pub(crate) fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
    )
}

/// Map a pull result to the session's frame outcome.
pub(crate) fn classify(
    result: io::Result<Dequeued<'_>>,
    geometry: Geometry,
    stride: usize,
) -> FrameOutcome<'_> {
    match result {
        Ok(buffer) => {
            // some drivers leave bytesused at zero for fixed-size formats
            let used = match buffer.bytesused as usize {
                0 => buffer.data.len(),
                used => used.min(buffer.data.len()),
            };
            match RawFrame::new(&buffer.data[..used], geometry, stride, buffer.sequence) {
                Ok(frame) => FrameOutcome::Frame(frame),
                Err(err) => FrameOutcome::Fault(err),
            }
        }
        Err(err) if is_transient(&err) => FrameOutcome::Retry,
        Err(err) => FrameOutcome::Fault(CaptureError::from(err)),
    }
}
