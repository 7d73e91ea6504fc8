use crate::{AcquireError, DisplaySink};
use debayer_base::Geometry;
use debayer_camera::{CaptureDevice, CaptureError, FrameOutcome};
use debayer_gpu::{ConvertError, ConvertedFrame, Converter, SyncMode};

/// Lifecycle of one acquisition run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Init,
    Ready,
    Running,
    Draining,
    Failed,
    Closed,
}

/// Configuration for an acquisition run.
#[derive(Clone, Debug, Default)]
pub struct AcquireConfig {
    display: bool,
    sync_mode: SyncMode,
}

impl AcquireConfig {
    /// Enable the capture/display pipeline. When disabled a run opens nothing.
    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    pub fn with_sync_mode(mut self, sync_mode: SyncMode) -> Self {
        self.sync_mode = sync_mode;
        self
    }

    pub fn display(&self) -> bool {
        self.display
    }

    pub fn sync_mode(&self) -> SyncMode {
        self.sync_mode
    }
}

/// Counters reported by a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Frames converted and shown.
    pub frames: u64,
    /// `Retry` answers from the capture session.
    pub retries: u64,
    /// State the run ended in before release: `Draining` after a clean
    /// stop, `Init` when display was disabled and nothing was opened.
    pub state: State,
}

/// Owns the capture session and the conversion context of one run.
///
/// Each resource sits in its own slot from the moment it is acquired until
/// it is released. Release happens at the end of [`Acquisition::run`] and
/// again from `Drop`, so a panic inside a sink still closes the device.
pub struct Acquisition<C: CaptureDevice, G: Converter> {
    state: State,
    capture: Option<C>,
    converter: Option<G>,
}

impl<C: CaptureDevice, G: Converter> Default for Acquisition<C, G> {
    fn default() -> Self {
        Self {
            state: State::Init,
            capture: None,
            converter: None,
        }
    }
}

impl<C: CaptureDevice, G: Converter> Acquisition<C, G> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Open the session with `open`, create a context for its geometry with
    /// `create`, then convert and show frames until the session is cancelled
    /// or something fails.
    ///
    /// Both resources are released before this returns, context first.
    ///
    /// # Errors
    ///
    /// The first failure of the run, by kind. A teardown failure is only
    /// reported when the run itself succeeded; otherwise it is logged and the
    /// original error is returned.
    pub fn run<O, F, D>(
        &mut self,
        config: &AcquireConfig,
        open: O,
        create: F,
        sink: &mut D,
    ) -> Result<RunSummary, AcquireError>
    where
        O: FnOnce() -> Result<C, CaptureError>,
        F: FnOnce(Geometry) -> Result<G, ConvertError>,
        D: DisplaySink + ?Sized,
    {
        let mut summary = RunSummary::default();
        if !config.display() {
            log::info!("not displayed");
            self.state = State::Closed;
            return Ok(summary);
        }

        let outcome = self.drive(config.sync_mode(), open, create, sink, &mut summary);
        self.state = if outcome.is_ok() {
            State::Draining
        } else {
            State::Failed
        };
        summary.state = self.state;
        let teardown = self.release();

        match (outcome, teardown) {
            (Ok(()), Ok(())) => {
                log::info!(
                    "acquisition stopped after {} frames ({} retries)",
                    summary.frames,
                    summary.retries
                );
                Ok(summary)
            }
            (Ok(()), Err(err)) => Err(err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(teardown)) => {
                log::error!("{}", teardown);
                Err(err)
            }
        }
    }

    fn drive<O, F, D>(
        &mut self,
        sync_mode: SyncMode,
        open: O,
        create: F,
        sink: &mut D,
        summary: &mut RunSummary,
    ) -> Result<(), AcquireError>
    where
        O: FnOnce() -> Result<C, CaptureError>,
        F: FnOnce(Geometry) -> Result<G, ConvertError>,
        D: DisplaySink + ?Sized,
    {
        self.state = State::Init;
        let capture = self.capture.insert(open().map_err(AcquireError::Open)?);
        let geometry = capture.geometry();
        log::info!("capture session open, {}", geometry);

        let converter = self
            .converter
            .insert(create(geometry).map_err(AcquireError::GpuInit)?);
        if converter.geometry() != geometry {
            return Err(AcquireError::GpuInit(ConvertError::GeometryMismatch {
                expected: geometry,
                got: converter.geometry(),
            }));
        }
        self.state = State::Ready;

        let mut output = ConvertedFrame::new(geometry);
        self.state = State::Running;
        loop {
            match capture.next_frame() {
                FrameOutcome::Frame(frame) => {
                    let token = converter
                        .convert(&frame, sync_mode)
                        .map_err(AcquireError::Conversion)?;
                    converter
                        .wait(token, &mut output)
                        .map_err(AcquireError::Conversion)?;
                    log::trace!("frame {} converted", frame.sequence());
                    sink.show(&output)?;
                    summary.frames += 1;
                }
                FrameOutcome::Retry => summary.retries += 1,
                FrameOutcome::Cancelled => {
                    log::info!("capture cancelled");
                    return Ok(());
                }
                FrameOutcome::Fault(err) => return Err(AcquireError::DeviceFault(err)),
            }
        }
    }

    /// Release whatever is held: destroy the context, then close the
    /// session. Both steps always run. Slots already empty are skipped.
    ///
    /// # Errors
    ///
    /// `AcquireError::Teardown` if destroying the context failed.
    pub fn release(&mut self) -> Result<(), AcquireError> {
        let mut result = Ok(());
        if let Some(mut converter) = self.converter.take() {
            if let Err(err) = converter.destroy() {
                result = Err(AcquireError::Teardown(err));
            }
        }
        if let Some(mut capture) = self.capture.take() {
            capture.close();
        }
        if self.state != State::Init {
            self.state = State::Closed;
        }
        result
    }
}

impl<C: CaptureDevice, G: Converter> Drop for Acquisition<C, G> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            log::error!("{}", err);
        }
    }
}
