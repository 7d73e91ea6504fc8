use crate::AcquireConfig;
use clap::Parser;
use debayer_base::log::LevelFilter;
use debayer_camera::CaptureConfig;
use debayer_gpu::{Backend, SyncMode};
use std::path::{Path, PathBuf};

const DEFAULT_DEVICE: &str = "/dev/video0";

fn existing_device(arg: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(arg);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("device {arg} does not exist"))
    }
}

/// Capture raw Bayer frames, convert them to RGBA and show them live.
#[derive(Parser, Debug)]
#[command(name = "cuda-debayer", version)]
pub struct Cli {
    /// Video device name [default: /dev/video0]
    #[arg(short, long, value_name = "PATH", value_parser = existing_device)]
    pub device: Option<PathBuf>,

    /// Set exposure time
    #[arg(short, long, allow_negative_numbers = true)]
    pub exposure: Option<i32>,

    /// Set analog gain
    #[arg(short, long, allow_negative_numbers = true)]
    pub gain: Option<i32>,

    /// Output the stream to screen
    #[arg(short, long)]
    pub output: bool,

    /// Conversion backend: cuda, cuda:<n> or host
    #[arg(long, default_value_t = Backend::default())]
    pub backend: Backend,

    /// CUDA device ordinal, overrides the one in --backend
    #[arg(long, value_name = "ORDINAL")]
    pub gpu: Option<usize>,

    /// Block in convert until the conversion has finished
    #[arg(long)]
    pub sync: bool,

    /// Number of capture buffers queued to the driver
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
    pub buffers: u32,

    /// Write logs to date-named files in DIR instead of stderr
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn device(&self) -> &Path {
        self.device
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_DEVICE))
    }

    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig::default()
            .with_device(self.device())
            .with_exposure(self.exposure)
            .with_gain(self.gain)
            .with_buffer_count(self.buffers)
    }

    pub fn acquire_config(&self) -> AcquireConfig {
        let sync_mode = if self.sync {
            SyncMode::Blocking
        } else {
            SyncMode::Async
        };
        AcquireConfig::default()
            .with_display(self.output)
            .with_sync_mode(sync_mode)
    }

    pub fn backend(&self) -> Backend {
        match self.gpu {
            Some(ordinal) => self.backend.with_ordinal(ordinal),
            None => self.backend,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            debayer_base::logging::default_level()
        }
    }
}
