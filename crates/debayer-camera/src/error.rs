use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum CaptureError {
    NotFound(PathBuf),
    PermissionDenied(PathBuf),
    InvalidConfig(String),
    DeviceFault(String),
    Unsupported(String),
}

impl CaptureError {
    /// Classify an I/O error raised while opening `path`.
    pub fn from_open(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => CaptureError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => CaptureError::PermissionDenied(path.to_path_buf()),
            _ => CaptureError::InvalidConfig(format!("{}: {err}", path.display())),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::NotFound(path) => write!(f, "device {} does not exist", path.display()),
            CaptureError::PermissionDenied(path) => {
                write!(f, "permission denied opening {}", path.display())
            }
            CaptureError::InvalidConfig(msg) => write!(f, "invalid capture configuration: {msg}"),
            CaptureError::DeviceFault(msg) => write!(f, "device fault: {msg}"),
            CaptureError::Unsupported(msg) => write!(f, "unsupported: {msg}"),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<io::Error> for CaptureError {
    fn from(err: io::Error) -> Self {
        CaptureError::DeviceFault(err.to_string())
    }
}
