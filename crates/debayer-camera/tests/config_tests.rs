use debayer_camera::{CaptureConfig, CaptureError};
use std::path::Path;
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = CaptureConfig::default();
    assert_eq!(config.device(), Path::new("/dev/video0"));
    assert_eq!(config.exposure(), None);
    assert_eq!(config.gain(), None);
    assert_eq!(config.buffer_count(), 4);
    assert_eq!(config.timeout(), Duration::from_millis(1000));
}

#[test]
fn test_builder_chain() {
    let config = CaptureConfig::default()
        .with_device("/dev/video2")
        .with_exposure(Some(30000))
        .with_gain(Some(-5))
        .with_buffer_count(8)
        .with_timeout(Duration::from_millis(250));

    assert_eq!(config.device(), Path::new("/dev/video2"));
    assert_eq!(config.exposure(), Some(30000));
    assert_eq!(config.gain(), Some(-5));
    assert_eq!(config.buffer_count(), 8);
    assert_eq!(config.timeout(), Duration::from_millis(250));
}

#[test]
fn test_validate_missing_device() {
    let config = CaptureConfig::default().with_device("/nonexistent");

    match config.validate() {
        Err(CaptureError::NotFound(path)) => assert_eq!(path, Path::new("/nonexistent")),
        other => panic!("Expected CaptureError::NotFound, got {:?}", other),
    }
}

#[test]
fn test_validate_zero_buffers() {
    // any existing path passes the existence check
    let config = CaptureConfig::default()
        .with_device(std::env::temp_dir())
        .with_buffer_count(0);

    assert!(matches!(config.validate(), Err(CaptureError::InvalidConfig(_))));
}

#[test]
fn test_validate_existing_path() {
    let config = CaptureConfig::default().with_device(std::env::temp_dir());
    assert!(config.validate().is_ok());
}
