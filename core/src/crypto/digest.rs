//! crypto/digest.rs
//! SHA-256 backend strategy selected once at construction.
//!
//! Design:
//! - `HashBackend::Portable`: the in-crate state machine (`HashState`).
//! - `HashBackend::Accelerated`: `sha2::Sha256`, which uses SHA-NI / ARMv8
//!   crypto extensions when the CPU has them.
//! - Both produce bit-identical digests; the choice is a capability decision,
//!   made once, never a per-call string switch.

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use sha2::Digest as _;

use crate::constants::{backend_ids, SHA256_OUTPUT_LEN};
use crate::crypto::sha256::HashState;
use crate::types::{BackendPreference, CoreError};
use crate::utils::enum_name_or_hex;

/// FFI-safe backend identifier.
#[repr(u16)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashBackend {
    #[default]
    Portable    = backend_ids::PORTABLE,
    Accelerated = backend_ids::ACCELERATED,
}

impl HashBackend {
    /// Pick `Accelerated` when the CPU advertises SHA instructions.
    pub fn detect() -> Self {
        if cpu_has_sha_extensions() {
            HashBackend::Accelerated
        } else {
            HashBackend::Portable
        }
    }

    pub fn from_preference(pref: BackendPreference) -> Self {
        match pref {
            BackendPreference::Auto => Self::detect(),
            BackendPreference::Portable => HashBackend::Portable,
            BackendPreference::Accelerated => HashBackend::Accelerated,
        }
    }

    /// Resolve a raw id coming across the FFI boundary.
    pub fn from_id(raw: u16) -> Result<Self, CoreError> {
        HashBackend::try_from_primitive(raw).map_err(|_| {
            CoreError::invalid(format!(
                "unknown hash backend: {}",
                enum_name_or_hex::<HashBackend>(raw)
            ))
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            HashBackend::Portable => "portable",
            HashBackend::Accelerated => "accelerated",
        }
    }

    #[inline]
    pub fn hasher(self) -> Sha256Hasher {
        Sha256Hasher::new(self)
    }
}

/// Runtime CPU capability check for hardware SHA-256.
pub fn cpu_has_sha_extensions() -> bool {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        std::is_x86_feature_detected!("sha") && std::is_x86_feature_detected!("sse4.1")
    }
    #[cfg(target_arch = "aarch64")]
    {
        std::arch::is_aarch64_feature_detected!("sha2")
    }
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
    {
        false
    }
}

/// Hashing state bound to one backend.
#[derive(Clone)]
pub enum Sha256Hasher {
    Portable(HashState),
    Accelerated(sha2::Sha256),
}

impl Sha256Hasher {
    #[inline]
    pub fn new(backend: HashBackend) -> Self {
        match backend {
            HashBackend::Portable => Sha256Hasher::Portable(HashState::new()),
            HashBackend::Accelerated => Sha256Hasher::Accelerated(sha2::Sha256::new()),
        }
    }

    pub fn backend(&self) -> HashBackend {
        match self {
            Sha256Hasher::Portable(_) => HashBackend::Portable,
            Sha256Hasher::Accelerated(_) => HashBackend::Accelerated,
        }
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Sha256Hasher::Portable(h) => h.update(data),
            Sha256Hasher::Accelerated(h) => h.update(data),
        }
    }

    #[inline]
    pub fn finalize(self) -> [u8; SHA256_OUTPUT_LEN] {
        match self {
            Sha256Hasher::Portable(h) => h.finalize(),
            Sha256Hasher::Accelerated(h) => {
                let out = h.finalize();
                let mut digest = [0u8; SHA256_OUTPUT_LEN];
                digest.copy_from_slice(out.as_slice());
                digest
            }
        }
    }
}

/// One-shot SHA-256 on the given backend.
pub fn sha256_with(backend: HashBackend, data: &[u8]) -> [u8; SHA256_OUTPUT_LEN] {
    let mut h = backend.hasher();
    h.update(data);
    h.finalize()
}
