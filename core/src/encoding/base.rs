//! encoding/base.rs
//! Arbitrary-radix encoding with a caller-supplied alphabet.
//!
//! Design:
//! - Input is a big-endian unsigned integer of any length. Encoding repeatedly
//!   divides it by the radix (schoolbook long division over the byte array)
//!   and emits digits most-significant first.
//! - Each leading 0x00 byte is written as one leading first-symbol, so the
//!   round trip is lossless for every input, the way base58 keeps leading
//!   zeros.
//! - The integer zero is written as one first-symbol. Empty input therefore
//!   encodes to exactly one first-symbol; `[0x00]` encodes to two.
//!
//! Errors:
//! - Alphabet with fewer than two symbols, or with a repeated symbol.
//! - Decoding a character that is not in the alphabet.

use std::collections::HashMap;

use crate::constants::MIN_RADIX;
use crate::types::CoreError;

/// Validated alphabet with reverse lookup.
#[derive(Debug, Clone)]
pub struct Charset {
    symbols: Vec<char>,
    lookup: HashMap<char, u64>,
}

impl Charset {
    pub fn new(alphabet: &str) -> Result<Self, CoreError> {
        let symbols: Vec<char> = alphabet.chars().collect();
        if symbols.len() < MIN_RADIX {
            return Err(CoreError::invalid(format!(
                "charset needs at least {} symbols, got {}",
                MIN_RADIX,
                symbols.len()
            )));
        }

        let mut lookup = HashMap::with_capacity(symbols.len());
        for (digit, &c) in symbols.iter().enumerate() {
            if lookup.insert(c, digit as u64).is_some() {
                return Err(CoreError::invalid(format!("charset repeats symbol {:?}", c)));
            }
        }

        Ok(Self { symbols, lookup })
    }

    pub fn radix(&self) -> usize {
        self.symbols.len()
    }

    pub fn encode(&self, data: &[u8]) -> String {
        let zero = self.symbols[0];
        let radix = self.symbols.len() as u64;

        let leading = data.iter().take_while(|&&b| b == 0).count();

        // Remaining magnitude, big-endian, divided in place.
        let mut num = data[leading..].to_vec();
        let mut digits: Vec<usize> = Vec::new(); // least significant first
        let mut start = 0;
        while start < num.len() {
            let mut rem: u64 = 0;
            for byte in num[start..].iter_mut() {
                let acc = (rem << 8) | *byte as u64;
                *byte = (acc / radix) as u8;
                rem = acc % radix;
            }
            digits.push(rem as usize);
            while start < num.len() && num[start] == 0 {
                start += 1;
            }
        }

        let mut out = String::with_capacity(leading + digits.len() + 1);
        out.extend(std::iter::repeat(zero).take(leading));
        if digits.is_empty() {
            out.push(zero);
        }
        out.extend(digits.iter().rev().map(|&d| self.symbols[d]));
        out
    }

    pub fn decode(&self, encoded: &str) -> Result<Vec<u8>, CoreError> {
        let digits = encoded
            .chars()
            .map(|c| {
                self.lookup
                    .get(&c)
                    .copied()
                    .ok_or_else(|| CoreError::invalid(format!("character {:?} is not in charset", c)))
            })
            .collect::<Result<Vec<u64>, CoreError>>()?;

        if digits.is_empty() {
            return Ok(Vec::new());
        }

        let leading = digits.iter().take_while(|&&d| d == 0).count();
        if leading == digits.len() {
            // n zero symbols: n - 1 zero bytes plus the integer zero.
            return Ok(vec![0u8; leading - 1]);
        }

        let radix = self.symbols.len() as u64;
        let mut num: Vec<u8> = Vec::new(); // little-endian while accumulating
        for &d in &digits[leading..] {
            let mut carry = d;
            for byte in num.iter_mut() {
                let acc = (*byte as u64) * radix + carry;
                *byte = (acc & 0xFF) as u8;
                carry = acc >> 8;
            }
            while carry > 0 {
                num.push((carry & 0xFF) as u8);
                carry >>= 8;
            }
        }

        let mut out = vec![0u8; leading];
        out.extend(num.iter().rev());
        Ok(out)
    }
}

/// Encode `data` with the symbols of `charset`.
pub fn base_encode(data: &[u8], charset: &str) -> Result<String, CoreError> {
    Ok(Charset::new(charset)?.encode(data))
}

/// Decode `encoded` with the symbols of `charset`.
pub fn base_decode(encoded: &str, charset: &str) -> Result<Vec<u8>, CoreError> {
    Charset::new(charset)?.decode(encoded)
}
