#[cfg(test)]
mod tests {
    use fastcrypt_core::crypto::{pbkdf2_hmac_sha256, pbkdf2_hmac_sha256_with, HashBackend};
    use fastcrypt_core::types::CoreError;
    use proptest::prelude::*;

    fn derive_hex(iterations: u32, len: usize) -> String {
        hex::encode(pbkdf2_hmac_sha256(b"password", b"salt", iterations, len).unwrap().as_bytes())
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            derive_hex(1, 32),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
        assert_eq!(
            derive_hex(2, 32),
            "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43"
        );
        assert_eq!(
            derive_hex(4096, 32),
            "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a"
        );
    }

    #[test]
    fn test_output_prefix_is_stable() {
        // A longer request extends, never changes, the shorter one.
        let short = derive_hex(2, 20);
        let long = derive_hex(2, 80);
        assert_eq!(long.len(), 160);
        assert!(long.starts_with(&short));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let err = pbkdf2_hmac_sha256(b"password", b"salt", 0, 32).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[test]
    fn test_zero_length_is_empty() {
        let key = pbkdf2_hmac_sha256(b"password", b"salt", 1, 0).unwrap();
        assert!(key.is_empty());
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = pbkdf2_hmac_sha256(b"password", b"salt", 1, 32).unwrap();
        let shown = format!("{:?}", key);
        assert!(!shown.contains("120fb6"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_deterministic_and_backend_neutral(
            pwd in proptest::collection::vec(any::<u8>(), 0..40),
            salt in proptest::collection::vec(any::<u8>(), 0..24),
            iterations in 1u32..8,
            len in 1usize..70,
        ) {
            let a = pbkdf2_hmac_sha256_with(HashBackend::Portable, &pwd, &salt, iterations, len).unwrap();
            let b = pbkdf2_hmac_sha256_with(HashBackend::Accelerated, &pwd, &salt, iterations, len).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
            prop_assert_eq!(a.len(), len);
        }

        #[test]
        fn prop_salt_changes_key(s1 in any::<[u8; 16]>(), s2 in any::<[u8; 16]>()) {
            prop_assume!(s1 != s2);
            let k1 = pbkdf2_hmac_sha256(b"pw", &s1, 2, 32).unwrap();
            let k2 = pbkdf2_hmac_sha256(b"pw", &s2, 2, 32).unwrap();
            prop_assert_ne!(k1.as_bytes(), k2.as_bytes());
        }
    }
}
