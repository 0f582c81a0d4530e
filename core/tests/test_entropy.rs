#[cfg(test)]
mod tests {
    use fastcrypt_core::analysis::{byte_histogram, shannon_entropy};
    use fastcrypt_core::secure::secure_random;
    use proptest::prelude::*;

    #[test]
    fn test_empty_and_constant_are_zero() {
        assert_eq!(shannon_entropy(&[]), 0.0);
        assert_eq!(shannon_entropy(&[0x41; 1000]), 0.0);
    }

    #[test]
    fn test_two_symbols_is_one_bit() {
        let data: Vec<u8> = (0..1000).map(|i| if i % 2 == 0 { 0 } else { 1 }).collect();
        assert!((shannon_entropy(&data) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_every_byte_once_is_eight_bits() {
        let data: Vec<u8> = (0..=255u8).collect();
        assert!((shannon_entropy(&data) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_random_bytes_near_eight() {
        let data = secure_random(100_000).unwrap();
        let h = shannon_entropy(&data);
        assert!(h > 7.9 && h <= 8.0, "entropy {}", h);
    }

    #[test]
    fn test_histogram_counts() {
        let bins = byte_histogram(b"aab");
        assert_eq!(bins[b'a' as usize], 2);
        assert_eq!(bins[b'b' as usize], 1);
        assert_eq!(bins.iter().sum::<u64>(), 3);
    }

    proptest! {
        #[test]
        fn prop_entropy_in_range(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let h = shannon_entropy(&data);
            prop_assert!((0.0..=8.0).contains(&h));
        }

        #[test]
        fn prop_histogram_sums_to_len(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
            prop_assert_eq!(byte_histogram(&data).iter().sum::<u64>(), data.len() as u64);
        }
    }
}
