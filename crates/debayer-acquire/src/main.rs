use clap::Parser;
use debayer_acquire::{AcquireError, Acquisition, Cli, DisplayError, DisplaySink, RunSummary};
use debayer_base::{CancelToken, init_console_logger, init_file_logger};
use debayer_camera::{CaptureConfig, CaptureDevice, CaptureError};
use std::process::ExitCode;

fn init_logging(cli: &Cli) {
    let level = cli.log_level();
    match &cli.log_dir {
        Some(dir) => {
            if let Err(err) = init_file_logger(dir, level) {
                init_console_logger(level);
                log::warn!("cannot log to {}: {}, using stderr", dir.display(), err);
            }
        }
        None => init_console_logger(level),
    }
}

#[cfg(feature = "v4l2")]
fn open_camera(
    config: CaptureConfig,
    cancel: CancelToken,
) -> Result<Box<dyn CaptureDevice>, CaptureError> {
    Ok(Box::new(debayer_camera::V4l2Camera::open(config, cancel)?))
}

#[cfg(not(feature = "v4l2"))]
fn open_camera(
    config: CaptureConfig,
    _cancel: CancelToken,
) -> Result<Box<dyn CaptureDevice>, CaptureError> {
    config.validate()?;
    Err(CaptureError::Unsupported(
        "built without V4L2 support (enable the `v4l2` feature)".to_string(),
    ))
}

#[cfg(feature = "window")]
fn open_sink(cancel: CancelToken) -> Result<Box<dyn DisplaySink>, DisplayError> {
    Ok(Box::new(debayer_acquire::WindowSink::new(
        "Display - ESC to exit",
        cancel,
    )))
}

#[cfg(not(feature = "window"))]
fn open_sink(_cancel: CancelToken) -> Result<Box<dyn DisplaySink>, DisplayError> {
    Err(DisplayError::new(
        "built without window support (enable the `window` feature)",
    ))
}

fn run(cli: &Cli) -> Result<RunSummary, AcquireError> {
    let cancel = CancelToken::new();
    let mut sink = open_sink(cancel.clone())?;
    let capture_config = cli.capture_config();
    let backend = cli.backend();
    log::info!(
        "device {}, backend {}, {:?} conversion",
        cli.device().display(),
        backend,
        cli.acquire_config().sync_mode()
    );

    let mut acquisition = Acquisition::new();
    acquisition.run(
        &cli.acquire_config(),
        || open_camera(capture_config, cancel),
        |geometry| backend.create(geometry),
        sink.as_mut(),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    if !cli.output {
        log::info!("not displayed");
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(summary) => {
            log::debug!("{:?}", summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{} error: {}", err.kind(), err);
            ExitCode::FAILURE
        }
    }
}
