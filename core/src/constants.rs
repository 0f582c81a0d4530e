//! constants.rs
//! Stable ids, sizes and defaults shared across modules.
//!
//! Notes:
//! - Codec wire-format limits live in `compression::constants`.
//! - Ids are mirrored on the Python side; keep them stable.

/// SHA-256 digest length in bytes.
pub const SHA256_OUTPUT_LEN: usize = 32;

/// SHA-256 block length in bytes (also the HMAC key pad length).
pub const SHA256_BLOCK_LEN: usize = 64;

/// Randomized overwrite passes before the final zero pass.
pub const DEFAULT_WIPE_PASSES: u8 = 3;

/// Upper bound accepted from configuration.
pub const MAX_WIPE_PASSES: u8 = 16;

/// Smallest radix accepted by the base encoder.
pub const MIN_RADIX: usize = 2;

/// Hash backend identifiers.
pub mod backend_ids {
    pub const PORTABLE: u16    = 0x0001;
    pub const ACCELERATED: u16 = 0x0002;
}
