//! types.rs
//! Crate-wide error taxonomy and engine configuration.
//!
//! Error model:
//! - `InvalidArgument`: bad parameters (radix < 2, unknown charset character,
//!   zero iteration count, empty XOR key, unknown codec id).
//! - `Decode`: malformed compressed stream (truncated token, bad distance).
//! - `EntropySourceUnavailable`: the OS CSPRNG failed. Never silently replaced.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_WIPE_PASSES, MAX_WIPE_PASSES};

/// Structured decode failures raised by the codecs.
/// Offsets are byte positions in the compressed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("{codec}: truncated token at offset {offset}")]
    TruncatedToken { codec: &'static str, offset: usize },

    #[error("{codec}: zero-length run at offset {offset}")]
    EmptyRun { codec: &'static str, offset: usize },

    #[error("{codec}: malformed escape token at offset {offset}")]
    InvalidEscape { codec: &'static str, offset: usize },

    #[error("{codec}: distance {distance} exceeds {available} decoded bytes at offset {offset}")]
    DistanceOutOfRange {
        codec: &'static str,
        offset: usize,
        distance: usize,
        available: usize,
    },
}

/// Unified error for every exposed operation.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("entropy source unavailable: {0}")]
    EntropySourceUnavailable(String),
}

/// Flat view of the taxonomy for FFI mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Decode,
    EntropySourceUnavailable,
}

impl CoreError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CoreError::InvalidArgument(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            CoreError::Decode(_) => ErrorKind::Decode,
            CoreError::EntropySourceUnavailable(_) => ErrorKind::EntropySourceUnavailable,
        }
    }
}

/// Which SHA-256 implementation the engine should bind at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendPreference {
    /// Capability check once, then pick.
    #[default]
    Auto,
    /// In-crate state machine.
    Portable,
    /// `sha2` with CPU intrinsics where available.
    Accelerated,
}

/// Engine configuration supplied by the orchestration layer.
///
/// All fields are optional in JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub backend: BackendPreference,
    pub wipe_passes: u8,
    pub telemetry: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: BackendPreference::Auto,
            wipe_passes: DEFAULT_WIPE_PASSES,
            telemetry: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document, e.g. `{"backend":"portable","wipe_passes":1}`.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let cfg: EngineConfig = serde_json::from_str(raw)
            .map_err(|e| CoreError::invalid(format!("engine config: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.wipe_passes > MAX_WIPE_PASSES {
            return Err(CoreError::invalid(format!(
                "wipe_passes {} exceeds maximum {}",
                self.wipe_passes, MAX_WIPE_PASSES
            )));
        }
        Ok(())
    }
}
