//! secure/mod.rs
//! Secure resource acquisition and release: CSPRNG bytes and memory wiping.

pub mod random;
pub mod wipe;

pub use random::*;
pub use wipe::*;
