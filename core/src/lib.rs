//! fastcrypt-core
//!
//! Pure Rust primitives: hashing, key stretching, secure memory, codecs.
//! No Python, no PyO3, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Primitives
pub mod analysis;
pub mod compression;
pub mod crypto;
pub mod encoding;
pub mod secure;
pub mod telemetry;

// Configured entry point
pub mod engine;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::analysis::{byte_histogram, shannon_entropy};
    pub use crate::compression::{
        codec_ids, lz_compress, lz_decompress, registered_codecs, rle_compress, rle_decompress,
        CodecInfo, CompressionCodec,
    };
    pub use crate::crypto::{
        hmac_sha256, pbkdf2_hmac_sha256, sha256, sha256_hex, DerivedKey, HashBackend, HashState,
        HmacContext,
    };
    pub use crate::encoding::{base_decode, base_encode, Charset};
    pub use crate::engine::{BenchmarkReport, CoreEngine, EngineInfo};
    pub use crate::secure::{secure_random, secure_wipe, EntropySource, OsEntropy};
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::{BackendPreference, CoreError, DecodeError, EngineConfig, ErrorKind};
    pub use crate::utils::xor_repeating;
}
