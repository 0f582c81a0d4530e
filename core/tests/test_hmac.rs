#[cfg(test)]
mod tests {
    use fastcrypt_core::crypto::{hmac_sha256, hmac_sha256_with, HashBackend, HmacContext};
    use proptest::prelude::*;

    #[test]
    fn test_rfc4231_case_1() {
        let key = [0x0b; 20];
        assert_eq!(
            hex::encode(hmac_sha256(&key, b"Hi There")),
            "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7"
        );
    }

    #[test]
    fn test_rfc4231_case_2() {
        assert_eq!(
            hex::encode(hmac_sha256(b"Jefe", b"what do ya want for nothing?")),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_rfc4231_case_6_long_key() {
        let key = [0xaa; 131];
        let msg = b"Test Using Larger Than Block-Size Key - Hash Key First";
        for backend in [HashBackend::Portable, HashBackend::Accelerated] {
            assert_eq!(
                hex::encode(hmac_sha256_with(backend, &key, msg)),
                "60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54"
            );
        }
    }

    #[test]
    fn test_streaming_context() {
        let mut mac = HmacContext::new(HashBackend::Portable, b"Jefe");
        mac.update(b"what do ya want ");
        mac.update(b"for nothing?");
        assert_eq!(mac.finalize(), hmac_sha256(b"Jefe", b"what do ya want for nothing?"));
    }

    proptest! {
        #[test]
        fn prop_backends_agree(key in proptest::collection::vec(any::<u8>(), 0..150), msg in proptest::collection::vec(any::<u8>(), 0..300)) {
            prop_assert_eq!(
                hmac_sha256_with(HashBackend::Portable, &key, &msg),
                hmac_sha256_with(HashBackend::Accelerated, &key, &msg)
            );
        }
    }
}
