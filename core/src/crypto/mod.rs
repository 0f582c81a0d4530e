//! crypto/mod.rs
//! Hashing and key stretching.
//!
//! - `sha256`: bit-exact SHA-256 state machine.
//! - `digest`: backend strategy (portable vs accelerated).
//! - `hmac`: HMAC-SHA256 over either backend.
//! - `kdf`: PBKDF2-HMAC-SHA256 and the self-wiping `DerivedKey`.

pub mod sha256;
pub mod digest;
pub mod hmac;
pub mod kdf;

pub use sha256::*;
pub use digest::*;
pub use hmac::*;
pub use kdf::*;
