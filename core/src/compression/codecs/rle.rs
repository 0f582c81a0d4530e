//! codecs/rle.rs
//! Run-length codec with a mandatory marker escape.
//!
//! Wire format:
//! - Run triple `[0xFF, count, value]`, `count` in `1..=255`.
//! - Any other byte is a literal.
//!
//! Encoding rules:
//! - Runs of 3 or more become a triple.
//! - Shorter runs are copied literally, except runs of the marker byte
//!   itself, which are always written as a triple (so `0xFF` becomes
//!   `[0xFF, 1, 0xFF]`).
//! - Runs longer than 255 are split.

use crate::compression::constants::{CODEC_MARKER, RLE_MAX_RUN, RLE_MIN_RUN, TOKEN_LEN};
use crate::compression::types::{CompressionCodec, Compressor, Decompressor};
use crate::types::{CoreError, DecodeError};

const CODEC: &str = "rle";

/// Compress `input`. Never fails.
pub fn rle_compress(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    rle_compress_into(input, &mut out);
    out
}

fn rle_compress_into(input: &[u8], out: &mut Vec<u8>) {
    let mut i = 0;
    while i < input.len() {
        let value = input[i];
        let mut run = 1;
        while i + run < input.len() && input[i + run] == value && run < RLE_MAX_RUN {
            run += 1;
        }

        if run >= RLE_MIN_RUN || value == CODEC_MARKER {
            out.extend_from_slice(&[CODEC_MARKER, run as u8, value]);
        } else {
            out.extend(std::iter::repeat(value).take(run));
        }

        i += run;
    }
}

/// Inverse of [`rle_compress`].
///
/// Errors:
/// - A marker without two following bytes is `TruncatedToken`.
/// - A triple with `count == 0` is `EmptyRun`.
pub fn rle_decompress(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(input.len());
    rle_decompress_into(input, &mut out)?;
    Ok(out)
}

fn rle_decompress_into(input: &[u8], out: &mut Vec<u8>) -> Result<(), DecodeError> {
    let mut i = 0;
    while i < input.len() {
        let byte = input[i];
        if byte != CODEC_MARKER {
            out.push(byte);
            i += 1;
            continue;
        }

        if i + TOKEN_LEN > input.len() {
            return Err(DecodeError::TruncatedToken { codec: CODEC, offset: i });
        }

        let count = input[i + 1] as usize;
        let value = input[i + 2];
        if count == 0 {
            return Err(DecodeError::EmptyRun { codec: CODEC, offset: i });
        }

        out.resize(out.len() + count, value);
        i += TOKEN_LEN;
    }
    Ok(())
}

/// Registry adapter.
pub struct RleCompressor;

impl Compressor for RleCompressor {
    fn codec(&self) -> CompressionCodec {
        CompressionCodec::Rle
    }

    fn compress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CoreError> {
        rle_compress_into(input, out);
        Ok(())
    }
}

/// Registry adapter.
pub struct RleDecompressor;

impl Decompressor for RleDecompressor {
    fn codec(&self) -> CompressionCodec {
        CompressionCodec::Rle
    }

    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CoreError> {
        rle_decompress_into(input, out)?;
        Ok(())
    }
}
