use crate::{ConvertError, Converter, HostConverter};
use debayer_base::Geometry;
use std::fmt;
use std::str::FromStr;

/// Which conversion context to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// CUDA device with the given ordinal.
    Cuda { ordinal: usize },
    /// Reference demosaic on the CPU.
    Host,
}

impl Default for Backend {
    fn default() -> Self {
        if cfg!(feature = "cuda") {
            Backend::Cuda { ordinal: 0 }
        } else {
            Backend::Host
        }
    }
}

impl Backend {
    /// Create a conversion context for `geometry` on this backend.
    ///
    /// # Errors
    ///
    /// Whatever the backend's `create` reports; `ConvertError::DeviceInit`
    /// for CUDA when built without the `cuda` feature.
    pub fn create(self, geometry: Geometry) -> Result<Box<dyn Converter>, ConvertError> {
        match self {
            Backend::Host => Ok(Box::new(HostConverter::create(geometry)?)),
            #[cfg(feature = "cuda")]
            Backend::Cuda { ordinal } => Ok(Box::new(crate::CudaConverter::create(geometry, ordinal)?)),
            #[cfg(not(feature = "cuda"))]
            Backend::Cuda { .. } => Err(ConvertError::DeviceInit(
                "built without CUDA support (enable the `cuda` feature)".to_string(),
            )),
        }
    }

    /// The same backend on another GPU. The host backend is unaffected.
    pub fn with_ordinal(self, ordinal: usize) -> Self {
        match self {
            Backend::Cuda { .. } => Backend::Cuda { ordinal },
            Backend::Host => Backend::Host,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Cuda { ordinal } => write!(f, "cuda:{ordinal}"),
            Backend::Host => write!(f, "host"),
        }
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(Backend::Host),
            "cuda" => Ok(Backend::Cuda { ordinal: 0 }),
            other => match other.strip_prefix("cuda:").map(str::parse) {
                Some(Ok(ordinal)) => Ok(Backend::Cuda { ordinal }),
                _ => Err(format!("unknown backend '{other}', expected host, cuda or cuda:<n>")),
            },
        }
    }
}
