//! crypto/sha256.rs
//! Streaming SHA-256 (FIPS 180-4) over eight 32-bit words.
//!
//! Design:
//! - `update` buffers partial 64-byte blocks across calls; every full block
//!   runs one compression round.
//! - `finalize` appends 0x80, zero-fills, writes the 64-bit big-endian bit
//!   length and emits the big-endian digest. It consumes the state.
//! - `finalize_reset` is the explicit "finalize then reset" path for callers
//!   that reuse one context across messages.
//!
//! Invariants:
//! - `buffer_len < 64` between calls to `update`.
//! - All arithmetic is modulo 2^32.

use byteorder::{BigEndian, ByteOrder};
use zeroize::Zeroize;

use crate::constants::{SHA256_BLOCK_LEN, SHA256_OUTPUT_LEN};

/// Round constants: first 32 bits of the fractional parts of the cube roots
/// of the first 64 primes.
const K: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

/// Initial hash value H(0).
const H0: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a,
    0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// Offset of the 64-bit length field inside the final block.
const LENGTH_OFFSET: usize = SHA256_BLOCK_LEN - 8;

#[inline(always)]
fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

#[inline(always)]
fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
fn gamma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn gamma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

/// One compression round over a single 64-byte block.
fn compress(state: &mut [u32; 8], block: &[u8]) {
    debug_assert_eq!(block.len(), SHA256_BLOCK_LEN);

    let mut w = [0u32; 64];
    BigEndian::read_u32_into(block, &mut w[..16]);
    for t in 16..64 {
        w[t] = gamma1(w[t - 2])
            .wrapping_add(w[t - 7])
            .wrapping_add(gamma0(w[t - 15]))
            .wrapping_add(w[t - 16]);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for t in 0..64 {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(K[t])
            .wrapping_add(w[t]);
        let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *s = s.wrapping_add(v);
    }

    w.zeroize();
}

/// Running SHA-256 context.
///
/// Not safe for concurrent mutation; use one context per logical hash.
/// Buffered bytes and chaining words are zeroed on drop.
#[derive(Clone)]
pub struct HashState {
    state: [u32; 8],
    buffer: [u8; SHA256_BLOCK_LEN],
    buffer_len: usize,
    total_len: u64,
}

impl Default for HashState {
    fn default() -> Self {
        Self::new()
    }
}

impl HashState {
    pub fn new() -> Self {
        Self {
            state: H0,
            buffer: [0u8; SHA256_BLOCK_LEN],
            buffer_len: 0,
            total_len: 0,
        }
    }

    /// Restore H(0), zero length and an empty buffer.
    pub fn reset(&mut self) {
        self.state = H0;
        self.buffer.zeroize();
        self.buffer_len = 0;
        self.total_len = 0;
    }

    /// Total bytes absorbed since the last reset.
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Bytes waiting for a full block. Always < 64.
    pub fn buffered(&self) -> usize {
        self.buffer_len
    }

    /// Absorb arbitrary-length input.
    pub fn update(&mut self, mut data: &[u8]) {
        self.total_len = self.total_len.wrapping_add(data.len() as u64);

        // Top up a partially filled block first.
        if self.buffer_len > 0 {
            let take = (SHA256_BLOCK_LEN - self.buffer_len).min(data.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&data[..take]);
            self.buffer_len += take;
            data = &data[take..];

            if self.buffer_len < SHA256_BLOCK_LEN {
                return;
            }
            compress(&mut self.state, &self.buffer);
            self.buffer_len = 0;
        }

        let mut blocks = data.chunks_exact(SHA256_BLOCK_LEN);
        for block in &mut blocks {
            compress(&mut self.state, block);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffer_len = rest.len();
    }

    /// Pad, run the last round(s) and emit the digest. Single use.
    pub fn finalize(mut self) -> [u8; SHA256_OUTPUT_LEN] {
        self.finish()
    }

    /// Finalize and re-arm the context for a new message.
    pub fn finalize_reset(&mut self) -> [u8; SHA256_OUTPUT_LEN] {
        let digest = self.finish();
        self.reset();
        digest
    }

    fn finish(&mut self) -> [u8; SHA256_OUTPUT_LEN] {
        let bit_len = self.total_len.wrapping_mul(8);

        let mut pos = self.buffer_len;
        self.buffer[pos] = 0x80;
        pos += 1;

        // No room for the length field: flush an extra block.
        if pos > LENGTH_OFFSET {
            self.buffer[pos..].fill(0);
            compress(&mut self.state, &self.buffer);
            pos = 0;
        }

        self.buffer[pos..LENGTH_OFFSET].fill(0);
        BigEndian::write_u64(&mut self.buffer[LENGTH_OFFSET..], bit_len);
        compress(&mut self.state, &self.buffer);
        self.buffer_len = 0;

        let mut digest = [0u8; SHA256_OUTPUT_LEN];
        BigEndian::write_u32_into(&self.state, &mut digest);
        digest
    }
}

impl Drop for HashState {
    fn drop(&mut self) {
        self.state.zeroize();
        self.buffer.zeroize();
    }
}

/// One-shot SHA-256 with the in-crate engine.
pub fn sha256(data: &[u8]) -> [u8; SHA256_OUTPUT_LEN] {
    let mut st = HashState::new();
    st.update(data);
    st.finalize()
}

/// Lowercase hex digest.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_occupancy_stays_below_block() {
        let mut st = HashState::new();
        for n in [1usize, 63, 64, 65, 127, 200] {
            st.update(&vec![0x61; n]);
            assert!(st.buffered() < SHA256_BLOCK_LEN);
        }
        assert_eq!(st.total_len(), 1 + 63 + 64 + 65 + 127 + 200);
    }

    #[test]
    fn split_updates_match_one_shot() {
        let data: Vec<u8> = (0..1000u32).map(|i| (i * 7 % 251) as u8).collect();
        let whole = sha256(&data);

        for split in [0usize, 1, 55, 56, 63, 64, 65, 999] {
            let mut st = HashState::new();
            st.update(&data[..split]);
            st.update(&data[split..]);
            assert_eq!(st.finalize(), whole, "split at {}", split);
        }
    }

    #[test]
    fn finalize_reset_rearms_context() {
        let mut st = HashState::new();
        st.update(b"abc");
        let first = st.finalize_reset();
        assert_eq!(st.total_len(), 0);
        st.update(b"abc");
        assert_eq!(st.finalize_reset(), first);
    }

    #[test]
    fn padding_boundary_lengths() {
        // 55 bytes fit padding in one block; 56 forces a second one.
        let a = sha256(&[0u8; 55]);
        let b = sha256(&[0u8; 56]);
        assert_ne!(a, b);
        assert_eq!(
            hex::encode(sha256(&[])),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
