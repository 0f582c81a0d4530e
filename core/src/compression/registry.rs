//! compression/registry.rs
//! Codec registry and factory functions.

use num_enum::TryFromPrimitive;
use serde::Serialize;

use crate::compression::codecs::{lz, rle};
use crate::compression::constants::TOKEN_LEN;
use crate::compression::types::{CompressionCodec, Compressor, Decompressor};
use crate::types::CoreError;
use crate::utils::enum_name_or_hex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodecInfo {
    pub id: u16,
    pub name: &'static str,
    /// Worst-case output bytes per input byte.
    pub max_expansion: usize,
}

pub fn codec_from_id(codec_id: u16) -> Result<CompressionCodec, CoreError> {
    CompressionCodec::try_from_primitive(codec_id).map_err(|_| {
        CoreError::invalid(format!(
            "unsupported compression codec: {}",
            enum_name_or_hex::<CompressionCodec>(codec_id)
        ))
    })
}

pub fn resolve(codec_id: u16) -> Result<CodecInfo, CoreError> {
    let codec = codec_from_id(codec_id)?;
    // Both codecs expand a lone marker byte into one full token.
    Ok(CodecInfo { id: codec as u16, name: codec.name(), max_expansion: TOKEN_LEN })
}

pub fn registered_codecs() -> Vec<CodecInfo> {
    CompressionCodec::ALL
        .iter()
        .filter_map(|c| resolve(*c as u16).ok())
        .collect()
}

pub fn create_compressor(codec_id: u16) -> Result<Box<dyn Compressor + Send>, CoreError> {
    match codec_from_id(codec_id)? {
        CompressionCodec::Rle => Ok(Box::new(rle::RleCompressor)),
        CompressionCodec::Lz => Ok(Box::new(lz::LzCompressor)),
    }
}

pub fn create_decompressor(codec_id: u16) -> Result<Box<dyn Decompressor + Send>, CoreError> {
    match codec_from_id(codec_id)? {
        CompressionCodec::Rle => Ok(Box::new(rle::RleDecompressor)),
        CompressionCodec::Lz => Ok(Box::new(lz::LzDecompressor)),
    }
}

/// One-shot compress through the registry.
pub fn compress(codec_id: u16, input: &[u8]) -> Result<Vec<u8>, CoreError> {
    let mut c = create_compressor(codec_id)?;
    let mut out = Vec::with_capacity(input.len());
    c.compress_chunk(input, &mut out)?;
    Ok(out)
}

/// One-shot decompress through the registry.
pub fn decompress(codec_id: u16, input: &[u8]) -> Result<Vec<u8>, CoreError> {
    let mut d = create_decompressor(codec_id)?;
    let mut out = Vec::with_capacity(input.len());
    d.decompress_chunk(input, &mut out)?;
    Ok(out)
}
