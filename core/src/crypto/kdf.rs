//! crypto/kdf.rs
//! PBKDF2-HMAC-SHA256 (RFC 8018) key stretching.
//!
//! Design:
//! - Output is produced in 32-byte blocks T_i, i starting at 1.
//! - U_1 = HMAC(P, S || BE32(i)), U_j = HMAC(P, U_{j-1}), T_i = U_1 ^ ... ^ U_c.
//! - The password-keyed HMAC context is built once and cloned per U_j.
//! - Intermediate U/T buffers are wiped before returning.
//!
//! Security notes:
//! - This is the only key derivation offered. There is no fast non-HMAC
//!   variant under any name.
//! - The returned `DerivedKey` wipes itself on drop.

use std::fmt;
use std::ops::Deref;

use crate::constants::SHA256_OUTPUT_LEN;
use crate::crypto::digest::HashBackend;
use crate::crypto::hmac::HmacContext;
use crate::secure::wipe::secure_wipe;
use crate::types::CoreError;

/// Caller-owned derived key material. Zeroed on drop.
pub struct DerivedKey {
    bytes: Vec<u8>,
}

impl DerivedKey {
    fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Zero the key now; the buffer keeps its length.
    pub fn wipe(&mut self) {
        secure_wipe(&mut self.bytes);
    }

    /// Hand the raw bytes to a caller that takes over wiping them.
    pub fn into_vec(mut self) -> Vec<u8> {
        std::mem::take(&mut self.bytes)
    }
}

impl Deref for DerivedKey {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivedKey([REDACTED; {}])", self.bytes.len())
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        secure_wipe(&mut self.bytes);
    }
}

/// PBKDF2-HMAC-SHA256 with the in-crate engine.
///
/// Errors:
/// - `iterations == 0` returns `CoreError::InvalidArgument`.
/// - `out_len == 0` returns an empty key.
pub fn pbkdf2_hmac_sha256(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out_len: usize,
) -> Result<DerivedKey, CoreError> {
    pbkdf2_hmac_sha256_with(HashBackend::Portable, password, salt, iterations, out_len)
}

/// PBKDF2-HMAC-SHA256 on a chosen backend.
pub fn pbkdf2_hmac_sha256_with(
    backend: HashBackend,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out_len: usize,
) -> Result<DerivedKey, CoreError> {
    if iterations == 0 {
        return Err(CoreError::invalid("iteration count must be at least 1"));
    }
    if out_len == 0 {
        return Ok(DerivedKey::new(Vec::new()));
    }

    // Block index is a u32 on the wire.
    let max_len = u32::MAX as u64 * SHA256_OUTPUT_LEN as u64;
    if out_len as u64 > max_len {
        return Err(CoreError::invalid(format!(
            "requested {} bytes exceeds PBKDF2 limit {}",
            out_len, max_len
        )));
    }

    let prf = HmacContext::new(backend, password);
    let mut out = vec![0u8; out_len];
    let mut u = [0u8; SHA256_OUTPUT_LEN];
    let mut t = [0u8; SHA256_OUTPUT_LEN];

    for (idx, block) in out.chunks_mut(SHA256_OUTPUT_LEN).enumerate() {
        let block_index = (idx as u32) + 1;

        let mut mac = prf.clone();
        mac.update(salt);
        mac.update(&block_index.to_be_bytes());
        u = mac.finalize();
        t = u;

        for _ in 1..iterations {
            let mut mac = prf.clone();
            mac.update(&u);
            u = mac.finalize();
            for (acc, x) in t.iter_mut().zip(u.iter()) {
                *acc ^= x;
            }
        }

        block.copy_from_slice(&t[..block.len()]);
    }

    secure_wipe(&mut u);
    secure_wipe(&mut t);

    Ok(DerivedKey::new(out))
}
