//! compression/codecs/mod.rs
//! Byte-oriented codecs. Each buffer is compressed independently; no state
//! spans calls.

pub mod rle;
pub mod lz;

pub use rle::*;
pub use lz::*;
