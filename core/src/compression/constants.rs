//! compression/constants.rs
//! Stable codec ids and wire-format limits.
//!
//! Both codecs share one escape byte. Every literal occurrence of it in the
//! input is written as an escape token, so a decoder never has to guess.

/// Stable codec IDs (u16) for the orchestration layer.
pub mod codec_ids {
    pub const RLE: u16 = 0x0001;
    pub const LZ: u16  = 0x0002;
}

/// Escape byte shared by the RLE and match-based codecs.
pub const CODEC_MARKER: u8 = 0xFF;

/// RLE run bounds: runs shorter than `RLE_MIN_RUN` stay literal (unless they
/// are marker bytes); one triple describes at most `RLE_MAX_RUN` bytes.
pub const RLE_MIN_RUN: usize = 3;
pub const RLE_MAX_RUN: usize = 255;

/// LZ match length bounds. The length byte stores `len - LZ_MIN_MATCH`.
pub const LZ_MIN_MATCH: usize = 3;
pub const LZ_MAX_MATCH: usize = 258;

/// Match distance is one byte; 0 is reserved for the literal-marker escape,
/// which caps the search window at 255 bytes behind the cursor.
pub const LZ_MAX_DISTANCE: usize = 255;

/// Every token is three bytes: `[marker, a, b]`.
pub const TOKEN_LEN: usize = 3;
