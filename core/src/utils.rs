use std::fmt;
use num_enum::TryFromPrimitive;

use crate::types::CoreError;

/// Render a raw registry id as its enum variant name, or hex when unknown.
pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

/// XOR `data` with `key` repeated cyclically, returning a new buffer.
///
/// Applying the same key twice restores the input.
/// Errors:
/// - Empty key returns `CoreError::InvalidArgument`.
pub fn xor_repeating(data: &[u8], key: &[u8]) -> Result<Vec<u8>, CoreError> {
    let mut out = data.to_vec();
    xor_in_place(&mut out, key)?;
    Ok(out)
}

/// In-place variant of [`xor_repeating`].
pub fn xor_in_place(data: &mut [u8], key: &[u8]) -> Result<(), CoreError> {
    if key.is_empty() {
        return Err(CoreError::invalid("xor key must not be empty"));
    }

    // Whole key-length strides first, then the tail.
    let mut chunks = data.chunks_exact_mut(key.len());
    for chunk in &mut chunks {
        for (b, k) in chunk.iter_mut().zip(key) {
            *b ^= k;
        }
    }
    for (b, k) in chunks.into_remainder().iter_mut().zip(key) {
        *b ^= k;
    }
    Ok(())
}
