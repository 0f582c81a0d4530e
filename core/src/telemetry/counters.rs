//! telemetry/counters.rs
//! Mutable counters updated by the engine around every operation.
//!
//! Summary: call counts and byte totals. Converted into an immutable
//! `TelemetrySnapshot` on request.
use std::ops::AddAssign;

/// Deterministic counters collected by `CoreEngine`.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct TelemetryCounters {
    pub operations: u64,
    pub errors: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    /// Input to the compressors, output of the decompressors.
    pub bytes_plaintext: u64,
    /// Output of the compressors, input to the decompressors.
    pub bytes_compressed: u64,
    pub kdf_iterations: u64,
}

impl TelemetryCounters {
    /// Record one completed call.
    pub fn add_op(&mut self, bytes_in: usize, bytes_out: usize) {
        self.operations += 1;
        self.bytes_in += bytes_in as u64;
        self.bytes_out += bytes_out as u64;
    }

    /// Record one call that returned an error.
    pub fn add_error(&mut self, bytes_in: usize) {
        self.operations += 1;
        self.errors += 1;
        self.bytes_in += bytes_in as u64;
    }

    /// `plain` and `packed` are the uncompressed and compressed sizes,
    /// whichever direction the codec ran.
    pub fn add_codec(&mut self, plain: usize, packed: usize) {
        self.bytes_plaintext += plain as u64;
        self.bytes_compressed += packed as u64;
    }

    pub fn add_kdf_iterations(&mut self, iterations: u32) {
        self.kdf_iterations += iterations as u64;
    }

    // Per-worker counters are merged once at the end, no shared state.
    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.operations += other.operations;
        self.errors += other.errors;
        self.bytes_in += other.bytes_in;
        self.bytes_out += other.bytes_out;
        self.bytes_plaintext += other.bytes_plaintext;
        self.bytes_compressed += other.bytes_compressed;
        self.kdf_iterations += other.kdf_iterations;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
