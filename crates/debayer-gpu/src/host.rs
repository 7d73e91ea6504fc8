use crate::tracker::LaunchTracker;
use crate::{ConvertError, ConvertedFrame, Converter, StreamToken, SyncMode, demosaic};
use debayer_base::Geometry;
use debayer_camera::RawFrame;

/// Conversion context that runs the reference demosaic on the CPU.
///
/// Work completes inside `convert`, so every token it returns is already
/// complete; `wait` only publishes the staged result.
#[derive(Debug)]
pub struct HostConverter {
    geometry: Geometry,
    staging: Option<Vec<u8>>,
    tracker: LaunchTracker,
}

impl HostConverter {
    /// # Errors
    ///
    /// - `ConvertError::InvalidGeometry` for empty or odd geometry
    /// - `ConvertError::OutOfMemory` if the staging buffer cannot be allocated
    pub fn create(geometry: Geometry) -> Result<Self, ConvertError> {
        geometry.validate_bayer()?;

        let len = geometry.converted_len();
        let mut staging = Vec::new();
        staging
            .try_reserve_exact(len)
            .map_err(|e| ConvertError::OutOfMemory(format!("{len} byte staging buffer: {e}")))?;
        staging.resize(len, 0);

        log::debug!("host converter created for {}", geometry);
        Ok(Self {
            geometry,
            staging: Some(staging),
            tracker: LaunchTracker::default(),
        })
    }
}

impl Converter for HostConverter {
    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn convert(&mut self, frame: &RawFrame<'_>, _mode: SyncMode) -> Result<StreamToken, ConvertError> {
        let staging = self.staging.as_mut().ok_or(ConvertError::Destroyed)?;
        if frame.geometry() != self.geometry {
            return Err(ConvertError::GeometryMismatch {
                expected: self.geometry,
                got: frame.geometry(),
            });
        }

        demosaic::rggb_to_rgba(frame, staging);
        let sequence = self.tracker.launch();
        Ok(StreamToken::completed(sequence))
    }

    fn wait(&mut self, token: StreamToken, output: &mut ConvertedFrame) -> Result<(), ConvertError> {
        let staging = self.staging.as_ref().ok_or(ConvertError::Destroyed)?;
        self.tracker.check(&token)?;
        if output.geometry() != self.geometry {
            return Err(ConvertError::GeometryMismatch {
                expected: self.geometry,
                got: output.geometry(),
            });
        }

        output.data_mut().copy_from_slice(staging);
        self.tracker.resolve();
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), ConvertError> {
        if self.staging.take().is_some() {
            log::debug!("host converter destroyed");
        }
        Ok(())
    }
}
