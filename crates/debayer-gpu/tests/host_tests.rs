use debayer_base::Geometry;
use debayer_camera::RawFrame;
use debayer_gpu::{ConvertError, ConvertedFrame, Converter, HostConverter, SyncMode};

/// 4x2 RGGB frame: two quads with distinct samples.
fn two_quads() -> Vec<u8> {
    vec![
        100, 40, 110, 60, // R Gr R Gr
        20, 5, 80, 7, // Gb B Gb B
    ]
}

#[test]
fn test_create_rejects_bad_geometry() {
    assert!(matches!(
        HostConverter::create(Geometry::new(0, 4)),
        Err(ConvertError::InvalidGeometry(_))
    ));
    assert!(matches!(
        HostConverter::create(Geometry::new(5, 4)),
        Err(ConvertError::InvalidGeometry(_))
    ));
}

#[test]
fn test_convert_then_wait() {
    let geometry = Geometry::new(4, 2);
    let mut converter = HostConverter::create(geometry).unwrap();
    let mut output = ConvertedFrame::new(geometry);

    let raw = two_quads();
    let frame = RawFrame::new(&raw, geometry, 4, 0).unwrap();
    let token = converter.convert(&frame, SyncMode::Async).unwrap();
    assert!(token.is_complete());

    converter.wait(token, &mut output).unwrap();

    assert_eq!(output.pixel(0, 0), [100, 30, 5, 255]);
    assert_eq!(output.pixel(1, 0), [100, 40, 5, 255]);
    assert_eq!(output.pixel(0, 1), [100, 20, 5, 255]);
    assert_eq!(output.pixel(1, 1), [100, 30, 5, 255]);
    assert_eq!(output.pixel(2, 0), [110, 70, 7, 255]);
    assert_eq!(output.pixel(3, 1), [110, 70, 7, 255]);
}

#[test]
fn test_output_untouched_until_wait() {
    let geometry = Geometry::new(4, 2);
    let mut converter = HostConverter::create(geometry).unwrap();
    let mut output = ConvertedFrame::new(geometry);

    let raw = two_quads();
    let frame = RawFrame::new(&raw, geometry, 4, 0).unwrap();
    let token = converter.convert(&frame, SyncMode::Blocking).unwrap();
    assert!(output.data().iter().all(|&b| b == 0));

    converter.wait(token, &mut output).unwrap();
    assert!(output.data().iter().any(|&b| b != 0));
}

#[test]
fn test_stride_padding_is_skipped() {
    let geometry = Geometry::new(2, 2);
    let mut converter = HostConverter::create(geometry).unwrap();
    let mut output = ConvertedFrame::new(geometry);

    // 2 samples + 2 padding bytes per row
    let raw = [50, 60, 255, 255, 70, 80];
    let frame = RawFrame::new(&raw, geometry, 4, 0).unwrap();
    let token = converter.convert(&frame, SyncMode::Async).unwrap();
    converter.wait(token, &mut output).unwrap();

    assert_eq!(output.pixel(0, 0), [50, 65, 80, 255]);
    assert_eq!(output.pixel(1, 0), [50, 60, 80, 255]);
    assert_eq!(output.pixel(0, 1), [50, 70, 80, 255]);
}

#[test]
fn test_geometry_mismatch_rejected() {
    let mut converter = HostConverter::create(Geometry::new(4, 2)).unwrap();

    let raw = vec![0u8; 16];
    let frame = RawFrame::new(&raw, Geometry::new(4, 4), 4, 0).unwrap();
    match converter.convert(&frame, SyncMode::Async) {
        Err(ConvertError::GeometryMismatch { expected, got }) => {
            assert_eq!(expected, Geometry::new(4, 2));
            assert_eq!(got, Geometry::new(4, 4));
        }
        other => panic!("Expected GeometryMismatch, got {:?}", other),
    }
}

#[test]
fn test_stale_token_rejected() {
    let geometry = Geometry::new(4, 2);
    let mut converter = HostConverter::create(geometry).unwrap();
    let mut output = ConvertedFrame::new(geometry);
    let raw = two_quads();
    let frame = RawFrame::new(&raw, geometry, 4, 0).unwrap();

    let first = converter.convert(&frame, SyncMode::Async).unwrap();
    let second = converter.convert(&frame, SyncMode::Async).unwrap();
    assert_eq!(second.sequence(), first.sequence() + 1);

    assert!(matches!(
        converter.wait(first, &mut output),
        Err(ConvertError::StaleToken { .. })
    ));
    assert!(converter.wait(second, &mut output).is_ok());
}

#[test]
fn test_destroy_is_idempotent() {
    let geometry = Geometry::new(4, 2);
    let mut converter = HostConverter::create(geometry).unwrap();

    assert!(converter.destroy().is_ok());
    assert!(converter.destroy().is_ok());

    let raw = two_quads();
    let frame = RawFrame::new(&raw, geometry, 4, 0).unwrap();
    assert!(matches!(
        converter.convert(&frame, SyncMode::Async),
        Err(ConvertError::Destroyed)
    ));
}
