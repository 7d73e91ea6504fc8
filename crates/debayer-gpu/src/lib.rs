//! Bayer to RGBA conversion contexts.
//!
//! A conversion context is bound to one frame geometry at creation. Work is
//! launched with [`Converter::convert`], which hands back a [`StreamToken`];
//! the converted pixels only become readable through [`Converter::wait`].
//!
//! Two backends implement the contract: a CUDA context (feature `cuda`) and
//! a host reference used without a GPU and as the CUDA kernel's reference.

pub mod backend;
pub mod demosaic;
pub mod error;
pub mod frame;
pub mod host;
pub mod traits;

mod tracker;

#[cfg(feature = "cuda")]
pub mod cuda;

pub use backend::Backend;
pub use error::ConvertError;
pub use frame::{ConvertedFrame, StreamToken, SyncMode};
pub use host::HostConverter;
pub use traits::Converter;

#[cfg(feature = "cuda")]
pub use cuda::CudaConverter;
