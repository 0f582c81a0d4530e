//! crypto/hmac.rs
//! HMAC-SHA256 (RFC 2104) over either SHA-256 backend.
//!
//! Design:
//! - The key pad is the key itself, zero-padded to 64 bytes, or SHA-256(key)
//!   when the key is longer than one block.
//! - inner = H((K ^ ipad) || msg), outer = H((K ^ opad) || inner).
//! - A keyed context can be cloned to MAC many messages under one key without
//!   redoing the pad rounds (used by the KDF loop). A context itself is
//!   single-use.
//! - The key pad is wiped before `new` returns. A context only carries the two
//!   hash states, so dropping it unfinalized leaves no copy of the key behind.

use zeroize::Zeroize;

use crate::constants::{SHA256_BLOCK_LEN, SHA256_OUTPUT_LEN};
use crate::crypto::digest::{HashBackend, Sha256Hasher};
use crate::secure::wipe::secure_wipe;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// Inner and outer hash states keyed for one message.
#[derive(Clone)]
pub struct HmacContext {
    inner: Sha256Hasher,
    outer: Sha256Hasher,
}

impl HmacContext {
    pub fn new(backend: HashBackend, key: &[u8]) -> Self {
        let mut key_pad = [0u8; SHA256_BLOCK_LEN];
        if key.len() > SHA256_BLOCK_LEN {
            let mut h = backend.hasher();
            h.update(key);
            let mut digest = h.finalize();
            key_pad[..SHA256_OUTPUT_LEN].copy_from_slice(&digest);
            secure_wipe(&mut digest);
        } else {
            key_pad[..key.len()].copy_from_slice(key);
        }

        let mut ipad = [0u8; SHA256_BLOCK_LEN];
        let mut opad = [0u8; SHA256_BLOCK_LEN];
        for (i, k) in key_pad.iter().enumerate() {
            ipad[i] = k ^ IPAD;
            opad[i] = k ^ OPAD;
        }

        let mut inner = backend.hasher();
        let mut outer = backend.hasher();
        inner.update(&ipad);
        outer.update(&opad);

        secure_wipe(&mut ipad);
        secure_wipe(&mut opad);
        secure_wipe(&mut key_pad);

        Self { inner, outer }
    }

    pub fn backend(&self) -> HashBackend {
        self.inner.backend()
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Produce the 32-byte tag. Consumes the context.
    pub fn finalize(self) -> [u8; SHA256_OUTPUT_LEN] {
        let mut inner_hash = self.inner.finalize();
        let mut outer = self.outer;
        outer.update(&inner_hash);
        inner_hash.zeroize();
        outer.finalize()
    }
}

/// HMAC-SHA256 with the in-crate engine.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; SHA256_OUTPUT_LEN] {
    hmac_sha256_with(HashBackend::Portable, key, message)
}

/// HMAC-SHA256 on a chosen backend.
pub fn hmac_sha256_with(
    backend: HashBackend,
    key: &[u8],
    message: &[u8],
) -> [u8; SHA256_OUTPUT_LEN] {
    let mut ctx = HmacContext::new(backend, key);
    ctx.update(message);
    ctx.finalize()
}
