#[cfg(test)]
mod tests {
    use fastcrypt_core::types::CoreError;
    use fastcrypt_core::utils::{xor_in_place, xor_repeating};
    use proptest::prelude::*;

    #[test]
    fn test_key_repeats() {
        assert_eq!(xor_repeating(&[1, 2, 3, 4, 5], &[0xFF, 0x0F]).unwrap(), vec![0xFE, 0x0D, 0xFC, 0x0B, 0xFA]);
    }

    #[test]
    fn test_key_longer_than_data() {
        assert_eq!(xor_repeating(&[1], &[3, 9, 9]).unwrap(), vec![2]);
        assert!(xor_repeating(&[], &[1]).unwrap().is_empty());
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(xor_repeating(b"abc", &[]), Err(CoreError::InvalidArgument(_))));
        let mut buf = [1u8, 2];
        assert!(xor_in_place(&mut buf, &[]).is_err());
        assert_eq!(buf, [1, 2]);
    }

    proptest! {
        #[test]
        fn prop_involution(
            data in proptest::collection::vec(any::<u8>(), 0..512),
            key in proptest::collection::vec(any::<u8>(), 1..40),
        ) {
            let once = xor_repeating(&data, &key).unwrap();
            prop_assert_eq!(xor_repeating(&once, &key).unwrap(), data);
        }
    }
}
