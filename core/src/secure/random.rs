//! secure/random.rs
//! OS-backed CSPRNG access behind an injectable `EntropySource`.
//!
//! Design:
//! - `OsEntropy` draws from `rand::rngs::OsRng` (getrandom(2) on Linux,
//!   BCryptGenRandom on Windows, SecRandomCopyBytes on Apple targets).
//! - Failure surfaces as `CoreError::EntropySourceUnavailable`. There is no
//!   fallback to a seeded or non-cryptographic generator.
//! - Components that need randomness take `&mut dyn EntropySource` (or a
//!   generic) instead of reaching for process-global state. Tests inject a
//!   seeded `RngEntropy` for reproducible fixtures.
//!
//! Concurrency:
//! - `OsEntropy` is a zero-sized handle; concurrent calls are safe because the
//!   kernel interfaces above are thread-safe.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::types::CoreError;

/// Source of random bytes.
pub trait EntropySource {
    /// Fill `dest` completely or fail.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), CoreError>;
}

/// Operating-system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), CoreError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CoreError::EntropySourceUnavailable(e.to_string()))
    }
}

/// Adapter over any `RngCore`, for explicit injection (e.g. seeded fixtures).
#[derive(Debug, Clone)]
pub struct RngEntropy<R: RngCore>(pub R);

impl<R: RngCore> EntropySource for RngEntropy<R> {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), CoreError> {
        self.0
            .try_fill_bytes(dest)
            .map_err(|e| CoreError::EntropySourceUnavailable(e.to_string()))
    }
}

/// `len` bytes from the OS CSPRNG.
pub fn secure_random(len: usize) -> Result<Vec<u8>, CoreError> {
    secure_random_from(&mut OsEntropy, len)
}

/// `len` bytes from an injected source.
pub fn secure_random_from<E>(source: &mut E, len: usize) -> Result<Vec<u8>, CoreError>
where
    E: EntropySource + ?Sized,
{
    let mut out = vec![0u8; len];
    if len > 0 {
        source.fill(&mut out)?;
    }
    Ok(out)
}
