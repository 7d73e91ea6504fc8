//! Raw Bayer frame capture.
//!
//! This crate provides the pull-based `CaptureDevice` contract used by the
//! acquisition loop, with a V4L2 backend behind the `v4l2` feature.

pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

#[cfg(any(feature = "v4l2", test))]
mod queue;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::CaptureConfig;
pub use error::CaptureError;
pub use frame::{FrameOutcome, RawFrame};
pub use traits::CaptureDevice;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;
