//! analysis/mod.rs
//! Statistical analysis of byte buffers.

pub mod entropy;

pub use entropy::*;
