//! engine.rs
//! `CoreEngine`: one configured entry point over every primitive.
//!
//! Design:
//! - The hash backend is resolved once in `new` and reused for hashing, HMAC
//!   and PBKDF2. No per-call dispatch on names.
//! - Every operation runs through `measure`, which records stage time and
//!   byte counts when telemetry is enabled. Errors are counted, never logged.
//! - Methods take `&self`; telemetry sits behind a mutex so one engine can be
//!   shared across threads (the Python binding releases the GIL around it).

use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use serde::Serialize;

use crate::analysis::{byte_histogram, shannon_entropy};
use crate::compression::registry::{self, CodecInfo};
use crate::compression::{codec_ids, lz_compress, lz_decompress, rle_compress, rle_decompress};
use crate::crypto::{cpu_has_sha_extensions, hmac_sha256_with, pbkdf2_hmac_sha256_with, sha256_with};
use crate::crypto::{DerivedKey, HashBackend};
use crate::constants::SHA256_OUTPUT_LEN;
use crate::encoding::Charset;
use crate::secure::{secure_random_from, secure_wipe_with_passes, OsEntropy};
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::{CoreError, EngineConfig};
use crate::utils::xor_repeating;

/// Static facts about a constructed engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineInfo {
    pub version: &'static str,
    pub backend: &'static str,
    pub cpu_sha_extensions: bool,
    pub wipe_passes: u8,
    pub telemetry: bool,
    pub codecs: Vec<CodecInfo>,
}

impl EngineInfo {
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string(self).map_err(|e| CoreError::invalid(format!("engine info json: {}", e)))
    }
}

/// Result of `CoreEngine::benchmark_hash`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub backend: &'static str,
    pub data_size: usize,
    pub iterations: u32,
    pub seconds: f64,
    pub bytes_per_sec: f64,
}

#[derive(Debug, Default)]
struct TelemetryState {
    counters: TelemetryCounters,
    timer: TelemetryTimer,
}

#[derive(Debug)]
pub struct CoreEngine {
    config: EngineConfig,
    backend: HashBackend,
    telemetry: Mutex<TelemetryState>,
}

impl CoreEngine {
    pub fn new(config: EngineConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Default configuration, which always validates.
    pub fn with_defaults() -> Self {
        Self::build(EngineConfig::default())
    }

    fn build(config: EngineConfig) -> Self {
        let backend = HashBackend::from_preference(config.backend);
        Self {
            config,
            backend,
            telemetry: Mutex::new(TelemetryState::default()),
        }
    }

    pub fn backend(&self) -> HashBackend {
        self.backend
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn info(&self) -> EngineInfo {
        EngineInfo {
            version: env!("CARGO_PKG_VERSION"),
            backend: self.backend.name(),
            cpu_sha_extensions: cpu_has_sha_extensions(),
            wipe_passes: self.config.wipe_passes,
            telemetry: self.config.telemetry,
            codecs: registry::registered_codecs(),
        }
    }

    // -------------------------------------------------------------------------
    // Hashing and key stretching
    // -------------------------------------------------------------------------

    pub fn sha256(&self, data: &[u8]) -> [u8; SHA256_OUTPUT_LEN] {
        let backend = self.backend;
        self.measure_infallible(Stage::Hash, data.len(), SHA256_OUTPUT_LEN, || {
            sha256_with(backend, data)
        })
    }

    pub fn hmac_sha256(&self, key: &[u8], message: &[u8]) -> [u8; SHA256_OUTPUT_LEN] {
        let backend = self.backend;
        self.measure_infallible(Stage::Hmac, message.len(), SHA256_OUTPUT_LEN, || {
            hmac_sha256_with(backend, key, message)
        })
    }

    pub fn pbkdf2(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        out_len: usize,
    ) -> Result<DerivedKey, CoreError> {
        let backend = self.backend;
        let key = self.measure(Stage::Kdf, password.len() + salt.len(), |k: &DerivedKey| k.len(), || {
            pbkdf2_hmac_sha256_with(backend, password, salt, iterations, out_len)
        })?;
        self.with_counters(|c| c.add_kdf_iterations(iterations));
        Ok(key)
    }

    // -------------------------------------------------------------------------
    // Analysis and byte helpers
    // -------------------------------------------------------------------------

    pub fn entropy(&self, data: &[u8]) -> f64 {
        self.measure_infallible(Stage::Entropy, data.len(), 0, || shannon_entropy(data))
    }

    pub fn histogram(&self, data: &[u8]) -> [u64; 256] {
        self.measure_infallible(Stage::Entropy, data.len(), 0, || byte_histogram(data))
    }

    pub fn xor(&self, data: &[u8], key: &[u8]) -> Result<Vec<u8>, CoreError> {
        self.measure(Stage::Xor, data.len(), Vec::len, || xor_repeating(data, key))
    }

    // -------------------------------------------------------------------------
    // Secure memory
    // -------------------------------------------------------------------------

    pub fn secure_random(&self, len: usize) -> Result<Vec<u8>, CoreError> {
        self.measure(Stage::Random, 0, Vec::len, || secure_random_from(&mut OsEntropy, len))
    }

    /// Configured random passes from the OS CSPRNG, then the zero pass.
    pub fn secure_wipe(&self, buf: &mut [u8]) {
        let passes = self.config.wipe_passes;
        let len = buf.len();
        self.measure_infallible(Stage::Wipe, len, 0, || {
            secure_wipe_with_passes(buf, passes, &mut OsEntropy)
        })
    }

    // -------------------------------------------------------------------------
    // Codecs
    // -------------------------------------------------------------------------

    pub fn compress(&self, codec_id: u16, input: &[u8]) -> Result<Vec<u8>, CoreError> {
        let out = self.measure(Stage::Compress, input.len(), Vec::len, || {
            registry::compress(codec_id, input)
        })?;
        self.with_counters(|c| c.add_codec(input.len(), out.len()));
        Ok(out)
    }

    pub fn decompress(&self, codec_id: u16, input: &[u8]) -> Result<Vec<u8>, CoreError> {
        let out = self.measure(Stage::Decompress, input.len(), Vec::len, || {
            registry::decompress(codec_id, input)
        })?;
        self.with_counters(|c| c.add_codec(out.len(), input.len()));
        Ok(out)
    }

    pub fn rle_compress(&self, input: &[u8]) -> Vec<u8> {
        let out = self.measure_infallible(Stage::Compress, input.len(), 0, || rle_compress(input));
        self.after_codec_infallible(input.len(), out.len());
        out
    }

    pub fn rle_decompress(&self, input: &[u8]) -> Result<Vec<u8>, CoreError> {
        self.decompress_with(input, |i| rle_decompress(i).map_err(CoreError::from))
    }

    pub fn lz_compress(&self, input: &[u8]) -> Vec<u8> {
        let out = self.measure_infallible(Stage::Compress, input.len(), 0, || lz_compress(input));
        self.after_codec_infallible(input.len(), out.len());
        out
    }

    pub fn lz_decompress(&self, input: &[u8]) -> Result<Vec<u8>, CoreError> {
        self.decompress_with(input, |i| lz_decompress(i).map_err(CoreError::from))
    }

    /// Registry id of the codec that produced the smaller output for `input`.
    pub fn best_codec(&self, input: &[u8]) -> u16 {
        if self.rle_compress(input).len() <= self.lz_compress(input).len() {
            codec_ids::RLE
        } else {
            codec_ids::LZ
        }
    }

    // -------------------------------------------------------------------------
    // Text encoding
    // -------------------------------------------------------------------------

    pub fn base_encode(&self, data: &[u8], charset: &str) -> Result<String, CoreError> {
        self.measure(Stage::Encode, data.len(), String::len, || {
            Ok(Charset::new(charset)?.encode(data))
        })
    }

    pub fn base_decode(&self, encoded: &str, charset: &str) -> Result<Vec<u8>, CoreError> {
        self.measure(Stage::Decode, encoded.len(), Vec::len, || {
            Charset::new(charset)?.decode(encoded)
        })
    }

    // -------------------------------------------------------------------------
    // Telemetry
    // -------------------------------------------------------------------------

    pub fn telemetry(&self) -> TelemetrySnapshot {
        let state = self.lock();
        TelemetrySnapshot::capture(self.backend.name(), &state.counters, &state.timer)
    }

    pub fn reset_telemetry(&self) {
        *self.lock() = TelemetryState::default();
    }

    /// Hash `data_size` random bytes `iterations` times on the selected backend.
    ///
    /// Not recorded in telemetry.
    pub fn benchmark_hash(&self, data_size: usize, iterations: u32) -> Result<BenchmarkReport, CoreError> {
        if iterations == 0 {
            return Err(CoreError::invalid("benchmark needs at least one iteration"));
        }
        let data = secure_random_from(&mut OsEntropy, data_size)?;

        let start = Instant::now();
        let mut sink = 0u8;
        for _ in 0..iterations {
            sink ^= sha256_with(self.backend, &data)[0];
        }
        let seconds = start.elapsed().as_secs_f64();
        std::hint::black_box(sink);

        let total = data_size as f64 * iterations as f64;
        let bytes_per_sec = if seconds > 0.0 { total / seconds } else { 0.0 };

        Ok(BenchmarkReport {
            backend: self.backend.name(),
            data_size,
            iterations,
            seconds,
            bytes_per_sec,
        })
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn lock(&self) -> MutexGuard<'_, TelemetryState> {
        // Counters stay usable even if a panicking thread held the lock.
        self.telemetry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn with_counters(&self, f: impl FnOnce(&mut TelemetryCounters)) {
        if self.config.telemetry {
            f(&mut self.lock().counters);
        }
    }

    fn measure<T>(
        &self,
        stage: Stage,
        bytes_in: usize,
        out_len: impl FnOnce(&T) -> usize,
        op: impl FnOnce() -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        if !self.config.telemetry {
            return op();
        }

        let start = Instant::now();
        let result = op();
        let elapsed = start.elapsed();

        let mut state = self.lock();
        state.timer.add_stage_time(stage, elapsed);
        match &result {
            Ok(v) => state.counters.add_op(bytes_in, out_len(v)),
            Err(_) => state.counters.add_error(bytes_in),
        }
        result
    }

    fn measure_infallible<T>(
        &self,
        stage: Stage,
        bytes_in: usize,
        bytes_out: usize,
        op: impl FnOnce() -> T,
    ) -> T {
        if !self.config.telemetry {
            return op();
        }

        let start = Instant::now();
        let value = op();
        let elapsed = start.elapsed();

        let mut state = self.lock();
        state.timer.add_stage_time(stage, elapsed);
        state.counters.add_op(bytes_in, bytes_out);
        value
    }

    fn after_codec_infallible(&self, plain: usize, packed: usize) {
        self.with_counters(|c| {
            c.bytes_out += packed as u64;
            c.add_codec(plain, packed);
        });
    }

    fn decompress_with(
        &self,
        input: &[u8],
        op: impl FnOnce(&[u8]) -> Result<Vec<u8>, CoreError>,
    ) -> Result<Vec<u8>, CoreError> {
        let out = self.measure(Stage::Decompress, input.len(), Vec::len, || op(input))?;
        self.with_counters(|c| c.add_codec(out.len(), input.len()));
        Ok(out)
    }
}

impl Default for CoreEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
