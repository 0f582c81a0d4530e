//! telemetry/mod.rs
//! Counters, stage timers and immutable snapshots.
//!
//! The core never logs. Callers pull a `TelemetrySnapshot` instead.

pub mod counters;
pub mod snapshot;
pub mod timers;

pub use counters::*;
pub use snapshot::*;
pub use timers::*;
