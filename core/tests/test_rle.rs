#[cfg(test)]
mod tests {
    use fastcrypt_core::compression::{rle_compress, rle_decompress};
    use fastcrypt_core::types::DecodeError;
    use proptest::prelude::*;

    #[test]
    fn test_empty() {
        assert!(rle_compress(&[]).is_empty());
        assert!(rle_decompress(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_runs_shrink() {
        let data = [vec![1u8; 200], vec![2u8; 200], b"tail".to_vec()].concat();
        let packed = rle_compress(&data);
        assert_eq!(packed.len(), 10);
        assert_eq!(rle_decompress(&packed).unwrap(), data);
    }

    #[test]
    fn test_marker_heavy_input() {
        let data = [0xFF, 0x00, 0xFF, 0xFF, 0x01, 0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(rle_decompress(&rle_compress(&data)).unwrap(), data.to_vec());
    }

    #[test]
    fn test_truncated_stream() {
        assert!(matches!(
            rle_decompress(&[0xFF, 3]),
            Err(DecodeError::TruncatedToken { offset: 0, .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
            prop_assert_eq!(rle_decompress(&rle_compress(&data)).unwrap(), data);
        }

        // Small alphabets produce long runs and many markers.
        #[test]
        fn prop_roundtrip_runs(data in proptest::collection::vec(prop_oneof![Just(0u8), Just(0xFFu8), Just(7u8)], 0..4096)) {
            prop_assert_eq!(rle_decompress(&rle_compress(&data)).unwrap(), data);
        }

        // Worst case is a lone marker: three output bytes per input byte.
        #[test]
        fn prop_bounded_expansion(data in proptest::collection::vec(any::<u8>(), 0..1024)) {
            prop_assert!(rle_compress(&data).len() <= data.len() * 3);
        }

        #[test]
        fn prop_garbage_never_panics(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let _ = rle_decompress(&data);
        }
    }
}
