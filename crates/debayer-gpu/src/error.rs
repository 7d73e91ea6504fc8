use debayer_base::{Geometry, GeometryError};
use std::fmt;

#[derive(Debug)]
pub enum ConvertError {
    OutOfMemory(String),
    DeviceInit(String),
    InvalidGeometry(GeometryError),
    GeometryMismatch { expected: Geometry, got: Geometry },
    StaleToken { expected: Option<u64>, got: u64 },
    Conversion(String),
    Teardown(String),
    Destroyed,
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::OutOfMemory(msg) => write!(f, "out of memory: {msg}"),
            ConvertError::DeviceInit(msg) => write!(f, "device init failed: {msg}"),
            ConvertError::InvalidGeometry(err) => write!(f, "invalid geometry: {err}"),
            ConvertError::GeometryMismatch { expected, got } => {
                write!(f, "frame is {got}, context was created for {expected}")
            }
            ConvertError::StaleToken {
                expected: Some(expected),
                got,
            } => write!(f, "token {got} is stale, latest launch is {expected}"),
            ConvertError::StaleToken {
                expected: None,
                got,
            } => write!(f, "token {got} is stale, nothing was launched"),
            ConvertError::Conversion(msg) => write!(f, "conversion failed: {msg}"),
            ConvertError::Teardown(msg) => write!(f, "teardown failed: {msg}"),
            ConvertError::Destroyed => write!(f, "context already destroyed"),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::InvalidGeometry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GeometryError> for ConvertError {
    fn from(err: GeometryError) -> Self {
        ConvertError::InvalidGeometry(err)
    }
}
