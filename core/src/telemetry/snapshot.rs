//! telemetry/snapshot.rs
//! Immutable telemetry view handed to callers.
//!
//! Design notes:
//! - Derived figures (ratio, throughput) are computed once, at capture.
//! - `to_json` is for humans and the Python side; `to_bytes` is the compact
//!   bincode form for persisting or shipping snapshots between processes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{StageTimes, TelemetryTimer};
use crate::types::CoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub backend: String,
    pub operations: u64,
    pub errors: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub bytes_plaintext: u64,
    pub bytes_compressed: u64,
    pub kdf_iterations: u64,
    /// `bytes_compressed / bytes_plaintext`, 0.0 before any codec ran.
    pub compression_ratio: f64,
    /// `bytes_in` over the summed stage time.
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn capture(backend: &str, counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let compression_ratio = if counters.bytes_plaintext > 0 {
            counters.bytes_compressed as f64 / counters.bytes_plaintext as f64
        } else {
            0.0
        };

        let busy = timer.stage_times.total().as_secs_f64();
        let throughput = if busy > 0.0 {
            counters.bytes_in as f64 / busy
        } else {
            0.0
        };

        Self {
            backend: backend.to_string(),
            operations: counters.operations,
            errors: counters.errors,
            bytes_in: counters.bytes_in,
            bytes_out: counters.bytes_out,
            bytes_plaintext: counters.bytes_plaintext,
            bytes_compressed: counters.bytes_compressed,
            kdf_iterations: counters.kdf_iterations,
            compression_ratio,
            throughput_bytes_per_sec: throughput,
            elapsed: timer.elapsed(),
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    /// Stage time never exceeds wall time; errors never exceed operations.
    pub fn sanity_check(&self) -> bool {
        self.errors <= self.operations && self.total_stage_time() <= self.elapsed
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string(self)
            .map_err(|e| CoreError::invalid(format!("telemetry json: {}", e)))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| CoreError::invalid(format!("telemetry encode: {}", e)))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        let (snap, _) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())
            .map_err(|e| CoreError::invalid(format!("telemetry decode: {}", e)))?;
        Ok(snap)
    }
}
