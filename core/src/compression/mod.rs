//! compression/mod.rs
//! Byte-oriented compression: run-length and sliding-window match codecs.
//!
//! Notes:
//! - Both codecs are deterministic and stateless per buffer, so they are safe
//!   to call concurrently on independent inputs.
//! - Decoders never read past the declared input; malformed streams return
//!   `DecodeError`.
//! - The registry resolves stable codec ids to implementations. Codec
//!   selection heuristics belong to the caller.

pub mod constants;
pub mod types;
pub mod registry;
pub mod codecs;

pub use constants::*;
pub use types::*;
pub use registry::*;
pub use codecs::*;
