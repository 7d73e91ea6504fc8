use clap::Parser;
use clap::error::ErrorKind;
use debayer_acquire::Cli;
use debayer_gpu::{Backend, SyncMode};
use std::path::Path;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("cuda-debayer").chain(args.iter().copied()))
}

#[test]
fn test_defaults() {
    let cli = parse(&[]).unwrap();

    assert_eq!(cli.device(), Path::new("/dev/video0"));
    assert_eq!(cli.exposure, None);
    assert_eq!(cli.gain, None);
    assert!(!cli.output);
    assert!(!cli.acquire_config().display());
    assert_eq!(cli.acquire_config().sync_mode(), SyncMode::Async);
    assert_eq!(cli.backend(), Backend::default());

    let capture = cli.capture_config();
    assert_eq!(capture.buffer_count(), 4);
    assert_eq!(capture.exposure(), None);
}

#[test]
fn test_help() {
    let err = parse(&["-h"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    assert_eq!(err.exit_code(), 0);
}

#[test]
fn test_full_options() {
    let cli = parse(&[
        "-d", "/dev/null", "-e", "30000", "-g", "-5", "-o", "--sync", "--buffers", "2",
    ])
    .unwrap();

    assert_eq!(cli.device(), Path::new("/dev/null"));
    assert!(cli.acquire_config().display());
    assert_eq!(cli.acquire_config().sync_mode(), SyncMode::Blocking);

    let capture = cli.capture_config();
    assert_eq!(capture.device(), Path::new("/dev/null"));
    assert_eq!(capture.exposure(), Some(30000));
    assert_eq!(capture.gain(), Some(-5));
    assert_eq!(capture.buffer_count(), 2);
}

#[test]
fn test_long_options() {
    let cli = parse(&["--device=/dev/null", "--exposure=100", "--gain=7", "--output"]).unwrap();
    assert_eq!(cli.exposure, Some(100));
    assert_eq!(cli.gain, Some(7));
    assert!(cli.output);
}

#[test]
fn test_missing_device_rejected() {
    let err = parse(&["-d", "/nonexistent", "-o"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
    assert!(err.to_string().contains("/nonexistent does not exist"));
}

#[test]
fn test_bad_numbers_rejected() {
    assert!(parse(&["-e", "fast"]).is_err());
    assert!(parse(&["-g", "2147483648"]).is_err());
    assert!(parse(&["-e", "-2147483649"]).is_err());
    assert!(parse(&["--buffers", "0"]).is_err());
}

#[test]
fn test_unknown_option_rejected() {
    let err = parse(&["--scale", "2"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_backend_selection() {
    assert_eq!(parse(&["--backend", "host"]).unwrap().backend(), Backend::Host);
    assert_eq!(
        parse(&["--backend", "cuda:1"]).unwrap().backend(),
        Backend::Cuda { ordinal: 1 }
    );
    assert_eq!(
        parse(&["--backend", "cuda", "--gpu", "3"]).unwrap().backend(),
        Backend::Cuda { ordinal: 3 }
    );
    assert!(parse(&["--backend", "opencl"]).is_err());
}

#[test]
fn test_verbose_level() {
    use debayer_base::log::LevelFilter;

    assert_eq!(parse(&["-v"]).unwrap().log_level(), LevelFilter::Debug);
}
