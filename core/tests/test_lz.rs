#[cfg(test)]
mod tests {
    use fastcrypt_core::compression::{lz_compress, lz_decompress, lz_tokens, Token};
    use fastcrypt_core::types::DecodeError;
    use proptest::prelude::*;

    #[test]
    fn test_empty() {
        assert!(lz_compress(&[]).is_empty());
        assert!(lz_decompress(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_repetitive_text_shrinks() {
        let data = b"the quick brown fox jumps over the lazy dog. ".repeat(40);
        let packed = lz_compress(&data);
        assert!(packed.len() < data.len() / 4, "{} vs {}", packed.len(), data.len());
        assert_eq!(lz_decompress(&packed).unwrap(), data);
    }

    #[test]
    fn test_long_run_caps_match_length() {
        let data = vec![b'z'; 1000];
        for token in lz_tokens(&data) {
            if let Token::Match { length, distance } = token {
                assert!(length <= 258);
                assert_eq!(distance, 1);
            }
        }
        assert_eq!(lz_decompress(&lz_compress(&data)).unwrap(), data);
    }

    #[test]
    fn test_match_at_start_rejected() {
        assert!(matches!(
            lz_decompress(&[0xFF, 0, 1]),
            Err(DecodeError::DistanceOutOfRange { distance: 1, available: 0, .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
            prop_assert_eq!(lz_decompress(&lz_compress(&data)).unwrap(), data);
        }

        #[test]
        fn prop_roundtrip_repetitive(seed in proptest::collection::vec(any::<u8>(), 1..16), reps in 1usize..64) {
            let data = seed.repeat(reps);
            prop_assert_eq!(lz_decompress(&lz_compress(&data)).unwrap(), data);
        }

        #[test]
        fn prop_tokens_within_limits(data in proptest::collection::vec(0u8..4, 0..2048)) {
            for token in lz_tokens(&data) {
                if let Token::Match { length, distance } = token {
                    prop_assert!((3..=258).contains(&length));
                    prop_assert!((1..=255).contains(&distance));
                }
            }
        }

        #[test]
        fn prop_garbage_never_panics(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let _ = lz_decompress(&data);
        }
    }
}
