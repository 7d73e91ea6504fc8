use crate::DisplayError;
use debayer_camera::CaptureError;
use debayer_gpu::ConvertError;
use std::fmt;

/// What went wrong, without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Open,
    GpuInit,
    DeviceFault,
    Conversion,
    Display,
    Teardown,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Open => "open",
            FailureKind::GpuInit => "gpu init",
            FailureKind::DeviceFault => "device fault",
            FailureKind::Conversion => "conversion",
            FailureKind::Display => "display",
            FailureKind::Teardown => "teardown",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub enum AcquireError {
    /// The capture session could not be opened.
    Open(CaptureError),
    /// The conversion context could not be created.
    GpuInit(ConvertError),
    /// The capture session failed while streaming.
    DeviceFault(CaptureError),
    Conversion(ConvertError),
    Display(DisplayError),
    /// Releasing the conversion context failed after an otherwise clean run.
    Teardown(ConvertError),
}

impl AcquireError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AcquireError::Open(_) => FailureKind::Open,
            AcquireError::GpuInit(_) => FailureKind::GpuInit,
            AcquireError::DeviceFault(_) => FailureKind::DeviceFault,
            AcquireError::Conversion(_) => FailureKind::Conversion,
            AcquireError::Display(_) => FailureKind::Display,
            AcquireError::Teardown(_) => FailureKind::Teardown,
        }
    }
}

impl fmt::Display for AcquireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquireError::Open(err) => write!(f, "failed to open capture device: {err}"),
            AcquireError::GpuInit(err) => write!(f, "failed to create conversion context: {err}"),
            AcquireError::DeviceFault(err) => write!(f, "capture failed: {err}"),
            AcquireError::Conversion(err) => write!(f, "{err}"),
            AcquireError::Display(err) => write!(f, "{err}"),
            AcquireError::Teardown(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AcquireError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AcquireError::Open(err) | AcquireError::DeviceFault(err) => Some(err),
            AcquireError::GpuInit(err) | AcquireError::Conversion(err) | AcquireError::Teardown(err) => {
                Some(err)
            }
            AcquireError::Display(err) => Some(err),
        }
    }
}

impl From<DisplayError> for AcquireError {
    fn from(err: DisplayError) -> Self {
        AcquireError::Display(err)
    }
}
