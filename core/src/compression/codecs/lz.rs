//! codecs/lz.rs
//! Sliding-window match codec (LZ77 family) with a one-byte distance.
//!
//! Wire format (all tokens start with the marker):
//! - Match:           `[0xFF, len - 3, distance]`, len in `3..=258`, distance in `1..=255`.
//! - Escaped marker:  `[0xFF, 0x00, 0x00]` (distance 0 never names a match).
//! - Any other byte is a literal.
//!
//! Encoder:
//! - Keeps the most recent position of every 3-byte prefix seen so far.
//! - At each cursor, looks up the current prefix; if the candidate lies within
//!   255 bytes it extends the match greedily up to 258 bytes or input end.
//! - Every consumed position is indexed, so later cursors can match against it.
//!
//! Decoder:
//! - Copies `len` bytes from `distance` behind the output cursor, byte by byte
//!   when the ranges overlap (`distance < len`).
//! - Never reads past the input; bad tokens surface as `DecodeError`.

use std::collections::HashMap;

use crate::compression::constants::{
    CODEC_MARKER, LZ_MAX_DISTANCE, LZ_MAX_MATCH, LZ_MIN_MATCH, TOKEN_LEN,
};
use crate::compression::types::{CompressionCodec, Compressor, Decompressor};
use crate::types::{CoreError, DecodeError};

const CODEC: &str = "lz";

/// Token stream element, as produced by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Literal(u8),
    Match { length: usize, distance: usize },
}

impl Token {
    fn write(self, out: &mut Vec<u8>) {
        match self {
            Token::Literal(CODEC_MARKER) => out.extend_from_slice(&[CODEC_MARKER, 0, 0]),
            Token::Literal(b) => out.push(b),
            Token::Match { length, distance } => {
                debug_assert!((LZ_MIN_MATCH..=LZ_MAX_MATCH).contains(&length));
                debug_assert!((1..=LZ_MAX_DISTANCE).contains(&distance));
                out.extend_from_slice(&[
                    CODEC_MARKER,
                    (length - LZ_MIN_MATCH) as u8,
                    distance as u8,
                ]);
            }
        }
    }
}

type PrefixIndex = HashMap<[u8; 3], usize>;

#[inline]
fn prefix_at(input: &[u8], pos: usize) -> Option<[u8; 3]> {
    input.get(pos..pos + 3).map(|s| [s[0], s[1], s[2]])
}

#[inline]
fn remember(index: &mut PrefixIndex, input: &[u8], pos: usize) {
    if let Some(prefix) = prefix_at(input, pos) {
        index.insert(prefix, pos);
    }
}

/// Longest match for the cursor against the indexed candidate, if any.
fn find_match(input: &[u8], pos: usize, index: &PrefixIndex) -> Option<Token> {
    let prefix = prefix_at(input, pos)?;
    let candidate = *index.get(&prefix)?;

    let distance = pos - candidate;
    if distance == 0 || distance > LZ_MAX_DISTANCE {
        return None;
    }

    let max_len = (input.len() - pos).min(LZ_MAX_MATCH);
    let mut length = 0;
    while length < max_len && input[candidate + length] == input[pos + length] {
        length += 1;
    }

    (length >= LZ_MIN_MATCH).then_some(Token::Match { length, distance })
}

/// Tokenize `input` without serializing. Exposed for inspection and tests.
pub fn lz_tokens(input: &[u8]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut index = PrefixIndex::new();
    let mut pos = 0;

    while pos < input.len() {
        match find_match(input, pos, &index) {
            Some(token @ Token::Match { length, .. }) => {
                for p in pos..pos + length {
                    remember(&mut index, input, p);
                }
                tokens.push(token);
                pos += length;
            }
            _ => {
                remember(&mut index, input, pos);
                tokens.push(Token::Literal(input[pos]));
                pos += 1;
            }
        }
    }
    tokens
}

/// Compress `input`. Never fails.
pub fn lz_compress(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    lz_compress_into(input, &mut out);
    out
}

fn lz_compress_into(input: &[u8], out: &mut Vec<u8>) {
    for token in lz_tokens(input) {
        token.write(out);
    }
}

/// Inverse of [`lz_compress`].
///
/// Errors:
/// - A marker without two following bytes is `TruncatedToken`.
/// - Distance 0 with a nonzero length byte is `InvalidEscape`.
/// - A distance reaching before the start of the output is `DistanceOutOfRange`.
pub fn lz_decompress(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(input.len().saturating_mul(2));
    lz_decompress_into(input, &mut out)?;
    Ok(out)
}

fn lz_decompress_into(input: &[u8], out: &mut Vec<u8>) -> Result<(), DecodeError> {
    // Matches may only reference bytes produced by this call.
    let base = out.len();
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

        let len_byte = input[i + 1];
        let distance = input[i + 2] as usize;

        if distance == 0 {
            if len_byte != 0 {
                return Err(DecodeError::InvalidEscape { codec: CODEC, offset: i });
            }
            out.push(CODEC_MARKER);
        } else {
            let available = out.len() - base;
            if distance > available {
                return Err(DecodeError::DistanceOutOfRange {
                    codec: CODEC,
                    offset: i,
                    distance,
                    available,
                });
            }

            let length = len_byte as usize + LZ_MIN_MATCH;
            let start = out.len() - distance;
            if distance >= length {
                out.extend_from_within(start..start + length);
            } else {
                out.reserve(length);
                for k in 0..length {
                    let b = out[start + k];
                    out.push(b);
                }
            }
        }

        i += TOKEN_LEN;
    }
    Ok(())
}

/// Registry adapter.
pub struct LzCompressor;

impl Compressor for LzCompressor {
    fn codec(&self) -> CompressionCodec {
        CompressionCodec::Lz
    }

    fn compress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CoreError> {
        lz_compress_into(input, out);
        Ok(())
    }
}

/// Registry adapter.
pub struct LzDecompressor;

impl Decompressor for LzDecompressor {
    fn codec(&self) -> CompressionCodec {
        CompressionCodec::Lz
    }

    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CoreError> {
        lz_decompress_into(input, out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_phrase_becomes_match() {
        let tokens = lz_tokens(b"abcabcabc");
        assert_eq!(
            tokens,
            vec![
                Token::Literal(b'a'),
                Token::Literal(b'b'),
                Token::Literal(b'c'),
                Token::Match { length: 6, distance: 3 },
            ]
        );
        assert_eq!(lz_compress(b"abcabcabc"), vec![b'a', b'b', b'c', 0xFF, 3, 3]);
    }

    #[test]
    fn overlapping_copy_expands_run() {
        // "a" then a match of 9 at distance 1.
        assert_eq!(lz_decompress(&[b'a', 0xFF, 6, 1]).unwrap(), vec![b'a'; 10]);
    }

    #[test]
    fn marker_literal_is_escaped() {
        assert_eq!(lz_compress(&[0xFF]), vec![0xFF, 0, 0]);
        assert_eq!(lz_decompress(&[0xFF, 0, 0]).unwrap(), vec![0xFF]);
    }

    #[test]
    fn match_never_exceeds_distance_limit() {
        let mut data = b"xyz".to_vec();
        data.extend((0..300u32).map(|i| (i % 200) as u8 + 30));
        data.extend_from_slice(b"xyz");
        for token in lz_tokens(&data) {
            if let Token::Match { distance, length } = token {
                assert!(distance <= LZ_MAX_DISTANCE);
                assert!((LZ_MIN_MATCH..=LZ_MAX_MATCH).contains(&length));
            }
        }
    }

    #[test]
    fn distance_beyond_output_rejected() {
        assert_eq!(
            lz_decompress(&[b'a', 0xFF, 0, 2]),
            Err(DecodeError::DistanceOutOfRange {
                codec: "lz",
                offset: 1,
                distance: 2,
                available: 1
            })
        );
    }

    #[test]
    fn bad_escape_rejected() {
        assert_eq!(
            lz_decompress(&[0xFF, 4, 0]),
            Err(DecodeError::InvalidEscape { codec: "lz", offset: 0 })
        );
    }

    #[test]
    fn truncated_token_rejected() {
        assert!(matches!(
            lz_decompress(&[b'a', 0xFF, 1]),
            Err(DecodeError::TruncatedToken { offset: 1, .. })
        ));
    }
}
