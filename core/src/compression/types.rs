//! compression/types.rs
//! Codec registry enum and the compressor / decompressor seams.
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::compression::constants::codec_ids;
use crate::types::CoreError;

/// FFI-safe enum for codec identifiers.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionCodec {
    Rle = codec_ids::RLE,
    Lz  = codec_ids::LZ,
}

impl CompressionCodec {
    pub const ALL: [CompressionCodec; 2] = [CompressionCodec::Rle, CompressionCodec::Lz];

    pub fn name(self) -> &'static str {
        match self {
            CompressionCodec::Rle => "rle",
            CompressionCodec::Lz => "lz",
        }
    }
}

// Require Send so trait objects can cross thread boundaries.
pub trait Compressor: Send {
    fn codec(&self) -> CompressionCodec;
    /// Compress one independent buffer, appending to `out`.
    fn compress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CoreError>;
}

pub trait Decompressor: Send {
    fn codec(&self) -> CompressionCodec;
    /// Decompress one independent buffer, appending to `out`.
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CoreError>;
}
