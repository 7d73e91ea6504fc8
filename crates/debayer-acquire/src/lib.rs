//! Acquisition loop: pulls raw Bayer frames from a capture session, converts
//! them on a conversion context and hands the result to a display sink.
//!
//! The loop owns both resources and releases them in reverse order on every
//! exit path, including early returns and panics.

pub mod cli;
pub mod display;
pub mod error;
pub mod pipeline;

pub use cli::Cli;
pub use display::{DisplayError, DisplaySink, pack_rgba};
pub use error::{AcquireError, FailureKind};
pub use pipeline::{AcquireConfig, Acquisition, RunSummary, State};

#[cfg(feature = "window")]
pub use display::WindowSink;
