#[cfg(feature = "cuda")]
mod cuda_tests {
    use debayer_base::Geometry;
    use debayer_camera::RawFrame;
    use debayer_gpu::{ConvertedFrame, Converter, CudaConverter, HostConverter, SyncMode};

    fn pattern(geometry: Geometry, stride: usize) -> Vec<u8> {
        (0..stride * geometry.height as usize)
            .map(|i| (i * 37 % 251) as u8)
            .collect()
    }

    #[test]
    #[ignore] // Requires CUDA
    fn test_cuda_matches_host_reference() {
        let geometry = Geometry::new(64, 48);
        let stride = 80;
        let raw = pattern(geometry, stride);
        let frame = RawFrame::new(&raw, geometry, stride, 0).unwrap();

        let mut host = HostConverter::create(geometry).unwrap();
        let mut expected = ConvertedFrame::new(geometry);
        let token = host.convert(&frame, SyncMode::Async).unwrap();
        host.wait(token, &mut expected).unwrap();

        let mut cuda = CudaConverter::create(geometry, 0).expect("Failed to create CUDA converter");
        let mut actual = ConvertedFrame::new(geometry);
        let token = cuda.convert(&frame, SyncMode::Async).unwrap();
        assert!(!token.is_complete());
        cuda.wait(token, &mut actual).unwrap();

        assert_eq!(actual, expected);
        assert!(cuda.destroy().is_ok());
        assert!(cuda.destroy().is_ok());
    }

    #[test]
    #[ignore] // Requires CUDA
    fn test_cuda_blocking_token_is_complete() {
        let geometry = Geometry::new(16, 16);
        let raw = pattern(geometry, 16);
        let frame = RawFrame::new(&raw, geometry, 16, 0).unwrap();

        let mut cuda = CudaConverter::create(geometry, 0).unwrap();
        let token = cuda.convert(&frame, SyncMode::Blocking).unwrap();
        assert!(token.is_complete());

        let mut output = ConvertedFrame::new(geometry);
        cuda.wait(token, &mut output).unwrap();
        assert_eq!(output.pixel(0, 0)[3], 255);
    }
}
