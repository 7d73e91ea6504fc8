use debayer_base::Geometry;
use debayer_camera::{CaptureDevice, CaptureError, FrameOutcome, RawFrame};
use std::collections::VecDeque;

enum Step {
    Frame(u8),
    Retry,
    Cancel,
    Fault,
}

// Mock implementation for testing
struct MockCamera {
    script: VecDeque<Step>,
    buffer: Vec<u8>,
    pulls: usize,
    closes: usize,
}

impl MockCamera {
    fn new(script: Vec<Step>) -> Self {
        Self {
            script: script.into(),
            buffer: vec![0u8; 4],
            pulls: 0,
            closes: 0,
        }
    }
}

impl CaptureDevice for MockCamera {
    fn geometry(&self) -> Geometry {
        Geometry::new(2, 2)
    }

    fn next_frame(&mut self) -> FrameOutcome<'_> {
        self.pulls += 1;
        match self.script.pop_front() {
            Some(Step::Frame(value)) => {
                self.buffer.fill(value);
                match RawFrame::new(&self.buffer, Geometry::new(2, 2), 2, self.pulls as u32) {
                    Ok(frame) => FrameOutcome::Frame(frame),
                    Err(err) => FrameOutcome::Fault(err),
                }
            }
            Some(Step::Retry) => FrameOutcome::Retry,
            Some(Step::Cancel) | None => FrameOutcome::Cancelled,
            Some(Step::Fault) => FrameOutcome::Fault(CaptureError::DeviceFault("mock".into())),
        }
    }

    fn close(&mut self) {
        self.closes += 1;
    }
}

/// Pull until the session stops, summing the first sample of every frame.
fn drain(camera: &mut impl CaptureDevice) -> Result<(u32, usize), CaptureError> {
    let mut sum = 0u32;
    let mut retries = 0;
    loop {
        match camera.next_frame() {
            FrameOutcome::Frame(frame) => sum += frame.data()[0] as u32,
            FrameOutcome::Retry => retries += 1,
            FrameOutcome::Cancelled => return Ok((sum, retries)),
            FrameOutcome::Fault(err) => return Err(err),
        }
    }
}

#[test]
fn test_capture_trait_polymorphism() {
    let mut camera = MockCamera::new(vec![
        Step::Retry,
        Step::Frame(5),
        Step::Retry,
        Step::Frame(7),
        Step::Cancel,
    ]);

    let (sum, retries) = drain(&mut camera).unwrap();
    assert_eq!(sum, 12);
    assert_eq!(retries, 2);
    assert_eq!(camera.pulls, 5);
}

#[test]
fn test_capture_trait_fault() {
    let mut camera = MockCamera::new(vec![Step::Frame(1), Step::Fault]);

    let result = drain(&mut camera);
    assert!(matches!(result, Err(CaptureError::DeviceFault(_))));
    assert_eq!(camera.geometry(), Geometry::new(2, 2));

    camera.close();
    assert_eq!(camera.closes, 1);
}
