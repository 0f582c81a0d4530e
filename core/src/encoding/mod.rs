//! encoding/mod.rs
//! Text encodings over caller-supplied alphabets.

pub mod base;

pub use base::*;
