//! Shared plumbing for the debayer workspace: logging, frame geometry and
//! the cooperative cancellation flag passed between capture and display.

pub mod cancel;
pub mod geometry;
pub mod logging;

pub use cancel::CancelToken;
pub use geometry::{CHANNEL_EXPANSION, Geometry, GeometryError};
pub use logging::{ConsoleLogger, FileLogger, init_console_logger, init_file_logger};

// Re-export log crate so downstream crates can use debayer_base::log::*
pub use log;
