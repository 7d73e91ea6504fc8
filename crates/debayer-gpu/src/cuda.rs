use crate::tracker::LaunchTracker;
use crate::{ConvertError, ConvertedFrame, Converter, StreamToken, SyncMode};
use cudarc::driver::sys::CUresult;
use cudarc::driver::{
    CudaContext, CudaEvent, CudaFunction, CudaSlice, CudaStream, DriverError, LaunchConfig,
    PushKernelArg,
};
use debayer_base::Geometry;
use debayer_camera::RawFrame;
use std::sync::Arc;

const KERNEL_SOURCE: &str = include_str!("debayer.cu");
const KERNEL_NAME: &str = "rggb_to_rgba";

// threads per block in each dimension; each thread covers one 2x2 quad
const BLOCK: u32 = 16;

struct Resources {
    stream: Arc<CudaStream>,
    function: CudaFunction,
    raw: CudaSlice<u8>,
    rgba: CudaSlice<u8>,
    event: Option<CudaEvent>,
}

/// Conversion context on one CUDA device with its own stream.
pub struct CudaConverter {
    geometry: Geometry,
    ordinal: usize,
    resources: Option<Resources>,
    tracker: LaunchTracker,
}

impl std::fmt::Debug for CudaConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CudaConverter")
            .field("geometry", &self.geometry)
            .field("ordinal", &self.ordinal)
            .field("live", &self.resources.is_some())
            .finish()
    }
}

fn init_error(what: &str, err: DriverError) -> ConvertError {
    if err.0 == CUresult::CUDA_ERROR_OUT_OF_MEMORY {
        ConvertError::OutOfMemory(format!("{what}: {err:?}"))
    } else {
        ConvertError::DeviceInit(format!("{what}: {err:?}"))
    }
}

fn conversion_error(what: &str, err: DriverError) -> ConvertError {
    ConvertError::Conversion(format!("{what}: {err:?}"))
}

impl CudaConverter {
    /// Create a context on GPU `ordinal` with buffers sized for `geometry`.
    ///
    /// Compiles the demosaic kernel with NVRTC, creates a dedicated stream
    /// and allocates the raw input and RGBA output buffers.
    ///
    /// # Errors
    ///
    /// - `ConvertError::InvalidGeometry` for empty or odd geometry
    /// - `ConvertError::OutOfMemory` if a device allocation fails for lack of memory
    /// - `ConvertError::DeviceInit` for any other driver or compile failure
    pub fn create(geometry: Geometry, ordinal: usize) -> Result<Self, ConvertError> {
        geometry.validate_bayer()?;

        let context = CudaContext::new(ordinal).map_err(|e| init_error("context", e))?;
        let stream = context.new_stream().map_err(|e| init_error("stream", e))?;

        let ptx = cudarc::nvrtc::compile_ptx(KERNEL_SOURCE)
            .map_err(|e| ConvertError::DeviceInit(format!("kernel compile: {e:?}")))?;
        let module = context
            .load_module(ptx)
            .map_err(|e| init_error("load module", e))?;
        let function = module
            .load_function(KERNEL_NAME)
            .map_err(|e| init_error("load function", e))?;

        let raw = stream
            .alloc_zeros::<u8>(geometry.raw_len())
            .map_err(|e| init_error("raw buffer", e))?;
        let rgba = stream
            .alloc_zeros::<u8>(geometry.converted_len())
            .map_err(|e| init_error("rgba buffer", e))?;

        log::info!("CUDA converter created on device {} for {}", ordinal, geometry);
        Ok(Self {
            geometry,
            ordinal,
            resources: Some(Resources {
                stream,
                function,
                raw,
                rgba,
                event: None,
            }),
            tracker: LaunchTracker::default(),
        })
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

impl Converter for CudaConverter {
    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn convert(&mut self, frame: &RawFrame<'_>, mode: SyncMode) -> Result<StreamToken, ConvertError> {
        let res = self.resources.as_mut().ok_or(ConvertError::Destroyed)?;
        if frame.geometry() != self.geometry {
            return Err(ConvertError::GeometryMismatch {
                expected: self.geometry,
                got: frame.geometry(),
            });
        }

        // the previous result was never collected; finish it before reusing buffers
        if self.tracker.has_unresolved() {
            if let Some(event) = res.event.take() {
                event
                    .synchronize()
                    .map_err(|e| conversion_error("drain previous launch", e))?;
            }
        }

        let upload = &frame.data()[..RawFrame::min_len(frame.geometry(), frame.stride())];
        if upload.len() > res.raw.len() {
            log::debug!("growing raw buffer to {} bytes for stride {}", upload.len(), frame.stride());
            res.raw = res
                .stream
                .alloc_zeros::<u8>(upload.len())
                .map_err(|e| conversion_error("grow raw buffer", e))?;
        }

        let mut raw_view = res.raw.slice_mut(0..upload.len());
        res.stream
            .memcpy_htod(upload, &mut raw_view)
            .map_err(|e| conversion_error("upload", e))?;

        let width = self.geometry.width;
        let height = self.geometry.height;
        let stride = frame.stride() as u32;
        let config = LaunchConfig {
            grid_dim: ((width / 2).div_ceil(BLOCK), (height / 2).div_ceil(BLOCK), 1),
            block_dim: (BLOCK, BLOCK, 1),
            shared_mem_bytes: 0,
        };

        let mut launch = res.stream.launch_builder(&res.function);
        launch.arg(&res.raw);
        launch.arg(&mut res.rgba);
        launch.arg(&width);
        launch.arg(&height);
        launch.arg(&stride);
        // SAFETY: argument types and order match the kernel signature in
        // debayer.cu, and the grid never addresses past width x height
        unsafe { launch.launch(config) }.map_err(|e| conversion_error("launch", e))?;

        let event = res
            .stream
            .record_event(None)
            .map_err(|e| conversion_error("record event", e))?;

        let sequence = self.tracker.launch();
        match mode {
            SyncMode::Async => {
                res.event = Some(event);
                Ok(StreamToken::pending(sequence))
            }
            SyncMode::Blocking => {
                event
                    .synchronize()
                    .map_err(|e| conversion_error("synchronize", e))?;
                Ok(StreamToken::completed(sequence))
            }
        }
    }

    fn wait(&mut self, token: StreamToken, output: &mut ConvertedFrame) -> Result<(), ConvertError> {
        let res = self.resources.as_mut().ok_or(ConvertError::Destroyed)?;
        self.tracker.check(&token)?;
        if output.geometry() != self.geometry {
            return Err(ConvertError::GeometryMismatch {
                expected: self.geometry,
                got: output.geometry(),
            });
        }

        if let Some(event) = res.event.take() {
            event
                .synchronize()
                .map_err(|e| conversion_error("wait", e))?;
        }
        res.stream
            .memcpy_dtoh(&res.rgba, output.data_mut())
            .map_err(|e| conversion_error("download", e))?;
        res.stream
            .synchronize()
            .map_err(|e| conversion_error("download synchronize", e))?;

        self.tracker.resolve();
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), ConvertError> {
        let Some(res) = self.resources.take() else {
            return Ok(());
        };

        // buffers are freed when `res` drops, whether or not the sync succeeds
        let result = res
            .stream
            .synchronize()
            .map_err(|e| ConvertError::Teardown(format!("{e:?}")));
        drop(res);
        log::info!("CUDA converter on device {} destroyed", self.ordinal);
        result
    }
}

impl Drop for CudaConverter {
    fn drop(&mut self) {
        if let Err(err) = self.destroy() {
            log::error!("{}", err);
        }
    }
}
