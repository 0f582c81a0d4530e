//! ffi.rs
//! Buffer-in / buffer-out functions exported to Python.
//!
//! Notes:
//! - Every call copies out of the Python buffer before returning; no Rust
//!   reference outlives the call.
//! - CPU-heavy calls (`pbkdf2`, `lz_compress`, `Engine.pbkdf2`) release the GIL.
//! - `pbkdf2_async` runs on a tokio blocking thread and returns an awaitable.
//! - `CoreError` maps onto three exception classes, see `to_py_err`.

use std::sync::Arc;

use pyo3::create_exception;
use pyo3::exceptions::{PyOSError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyByteArray, PyBytes};

use fastcrypt_core::analysis::{byte_histogram, shannon_entropy};
use fastcrypt_core::compression::{lz_compress as core_lz_compress, lz_decompress as core_lz_decompress};
use fastcrypt_core::compression::{rle_compress as core_rle_compress, rle_decompress as core_rle_decompress};
use fastcrypt_core::crypto::{hmac_sha256_with, pbkdf2_hmac_sha256_with, sha256_with, HashBackend};
use fastcrypt_core::encoding::{base_decode as core_base_decode, base_encode as core_base_encode};
use fastcrypt_core::engine::CoreEngine;
use fastcrypt_core::secure::{secure_random as core_secure_random, secure_wipe as core_secure_wipe};
use fastcrypt_core::types::{CoreError, EngineConfig, ErrorKind};
use fastcrypt_core::utils::xor_repeating;

create_exception!(fastcrypt_native, InvalidArgumentError, PyValueError);
create_exception!(fastcrypt_native, DecodeError, PyValueError);
create_exception!(fastcrypt_native, EntropySourceUnavailableError, PyOSError);

fn to_py_err(err: CoreError) -> PyErr {
    let msg = err.to_string();
    match err.kind() {
        ErrorKind::InvalidArgument => InvalidArgumentError::new_err(msg),
        ErrorKind::Decode => DecodeError::new_err(msg),
        ErrorKind::EntropySourceUnavailable => EntropySourceUnavailableError::new_err(msg),
    }
}

// Module-level functions bind the backend once per process.
fn backend() -> HashBackend {
    static BACKEND: std::sync::OnceLock<HashBackend> = std::sync::OnceLock::new();
    *BACKEND.get_or_init(HashBackend::detect)
}

// -----------------------------------------------------------------------------
// Hashing and key stretching
// -----------------------------------------------------------------------------

#[pyfunction]
fn sha256<'py>(py: Python<'py>, data: &[u8]) -> Bound<'py, PyBytes> {
    PyBytes::new_bound(py, &sha256_with(backend(), data))
}

#[pyfunction]
fn hmac_sha256<'py>(py: Python<'py>, key: &[u8], message: &[u8]) -> Bound<'py, PyBytes> {
    PyBytes::new_bound(py, &hmac_sha256_with(backend(), key, message))
}

#[pyfunction]
#[pyo3(signature = (password, salt, iterations, length = 32))]
fn pbkdf2<'py>(
    py: Python<'py>,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    length: usize,
) -> PyResult<Bound<'py, PyBytes>> {
    let backend = backend();
    let key = py
        .allow_threads(|| pbkdf2_hmac_sha256_with(backend, password, salt, iterations, length))
        .map_err(to_py_err)?;
    // `key` wipes itself when it drops at the end of this scope.
    Ok(PyBytes::new_bound(py, key.as_bytes()))
}

#[pyfunction]
#[pyo3(signature = (password, salt, iterations, length = 32))]
fn pbkdf2_async<'py>(
    py: Python<'py>,
    password: Vec<u8>,
    salt: Vec<u8>,
    iterations: u32,
    length: usize,
) -> PyResult<Bound<'py, PyAny>> {
    let backend = backend();
    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        let mut password = password;
        let derived = tokio::task::spawn_blocking(move || {
            let res = pbkdf2_hmac_sha256_with(backend, &password, &salt, iterations, length);
            core_secure_wipe(&mut password);
            res
        })
        .await
        .map_err(|e| PyRuntimeError::new_err(format!("kdf task failed: {}", e)))?
        .map_err(to_py_err)?;

        Ok(Python::with_gil(|py| PyBytes::new_bound(py, derived.as_bytes()).unbind()))
    })
}

// -----------------------------------------------------------------------------
// Analysis and byte helpers
// -----------------------------------------------------------------------------

#[pyfunction]
fn entropy(data: &[u8]) -> f64 {
    shannon_entropy(data)
}

/// Byte frequency table, 256 counts.
#[pyfunction]
fn analyze(data: &[u8]) -> Vec<u64> {
    byte_histogram(data).to_vec()
}

#[pyfunction]
fn xor<'py>(py: Python<'py>, data: &[u8], key: &[u8]) -> PyResult<Bound<'py, PyBytes>> {
    let out = xor_repeating(data, key).map_err(to_py_err)?;
    Ok(PyBytes::new_bound(py, &out))
}

// -----------------------------------------------------------------------------
// Secure memory
// -----------------------------------------------------------------------------

#[pyfunction]
fn secure_random<'py>(py: Python<'py>, length: usize) -> PyResult<Bound<'py, PyBytes>> {
    let out = core_secure_random(length).map_err(to_py_err)?;
    Ok(PyBytes::new_bound(py, &out))
}

/// Zero a `bytearray` in place. `bytes` is immutable and cannot be wiped.
#[pyfunction]
fn secure_wipe(buf: &Bound<'_, PyByteArray>) {
    // SAFETY: we hold the GIL and no Python code runs while the slice is
    // alive, so nothing can resize or read the bytearray concurrently.
    let bytes = unsafe { buf.as_bytes_mut() };
    core_secure_wipe(bytes);
}

// -----------------------------------------------------------------------------
// Codecs
// -----------------------------------------------------------------------------

#[pyfunction]
fn rle_compress<'py>(py: Python<'py>, data: &[u8]) -> Bound<'py, PyBytes> {
    PyBytes::new_bound(py, &core_rle_compress(data))
}

#[pyfunction]
fn rle_decompress<'py>(py: Python<'py>, data: &[u8]) -> PyResult<Bound<'py, PyBytes>> {
    let out = core_rle_decompress(data).map_err(|e| to_py_err(e.into()))?;
    Ok(PyBytes::new_bound(py, &out))
}

#[pyfunction]
fn lz_compress<'py>(py: Python<'py>, data: &[u8]) -> Bound<'py, PyBytes> {
    let out = py.allow_threads(|| core_lz_compress(data));
    PyBytes::new_bound(py, &out)
}

#[pyfunction]
fn lz_decompress<'py>(py: Python<'py>, data: &[u8]) -> PyResult<Bound<'py, PyBytes>> {
    let out = core_lz_decompress(data).map_err(|e| to_py_err(e.into()))?;
    Ok(PyBytes::new_bound(py, &out))
}

// -----------------------------------------------------------------------------
// Text encoding
// -----------------------------------------------------------------------------

#[pyfunction]
fn base_encode(data: &[u8], charset: &str) -> PyResult<String> {
    core_base_encode(data, charset).map_err(to_py_err)
}

#[pyfunction]
fn base_decode<'py>(py: Python<'py>, encoded: &str, charset: &str) -> PyResult<Bound<'py, PyBytes>> {
    let out = core_base_decode(encoded, charset).map_err(to_py_err)?;
    Ok(PyBytes::new_bound(py, &out))
}

/// JSON description of the default engine: backend, CPU flags, codecs.
#[pyfunction]
fn engine_info() -> PyResult<String> {
    CoreEngine::with_defaults().info().to_json().map_err(to_py_err)
}

// -----------------------------------------------------------------------------
// Engine class
// -----------------------------------------------------------------------------

/// Configured engine with its own telemetry.
#[pyclass(name = "Engine", module = "fastcrypt_native", frozen)]
struct PyEngine {
    inner: Arc<CoreEngine>,
}

#[pymethods]
impl PyEngine {
    /// `config` is an optional JSON document, e.g. `{"backend": "portable"}`.
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<&str>) -> PyResult<Self> {
        let cfg = match config {
            Some(raw) => EngineConfig::from_json(raw).map_err(to_py_err)?,
            None => EngineConfig::default(),
        };
        let inner = CoreEngine::new(cfg).map_err(to_py_err)?;
        Ok(Self { inner: Arc::new(inner) })
    }

    #[getter]
    fn backend(&self) -> &'static str {
        self.inner.backend().name()
    }

    fn info(&self) -> PyResult<String> {
        self.inner.info().to_json().map_err(to_py_err)
    }

    fn sha256<'py>(&self, py: Python<'py>, data: &[u8]) -> Bound<'py, PyBytes> {
        PyBytes::new_bound(py, &self.inner.sha256(data))
    }

    fn hmac_sha256<'py>(&self, py: Python<'py>, key: &[u8], message: &[u8]) -> Bound<'py, PyBytes> {
        PyBytes::new_bound(py, &self.inner.hmac_sha256(key, message))
    }

    #[pyo3(signature = (password, salt, iterations, length = 32))]
    fn pbkdf2<'py>(
        &self,
        py: Python<'py>,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        length: usize,
    ) -> PyResult<Bound<'py, PyBytes>> {
        let engine = Arc::clone(&self.inner);
        let key = py
            .allow_threads(|| engine.pbkdf2(password, salt, iterations, length))
            .map_err(to_py_err)?;
        Ok(PyBytes::new_bound(py, key.as_bytes()))
    }

    fn entropy(&self, data: &[u8]) -> f64 {
        self.inner.entropy(data)
    }

    fn analyze(&self, data: &[u8]) -> Vec<u64> {
        self.inner.histogram(data).to_vec()
    }

    fn xor<'py>(&self, py: Python<'py>, data: &[u8], key: &[u8]) -> PyResult<Bound<'py, PyBytes>> {
        let out = self.inner.xor(data, key).map_err(to_py_err)?;
        Ok(PyBytes::new_bound(py, &out))
    }

    fn secure_random<'py>(&self, py: Python<'py>, length: usize) -> PyResult<Bound<'py, PyBytes>> {
        let out = self.inner.secure_random(length).map_err(to_py_err)?;
        Ok(PyBytes::new_bound(py, &out))
    }

    fn secure_wipe(&self, buf: &Bound<'_, PyByteArray>) {
        // SAFETY: see the module-level `secure_wipe`.
        let bytes = unsafe { buf.as_bytes_mut() };
        self.inner.secure_wipe(bytes);
    }

    fn compress<'py>(&self, py: Python<'py>, codec_id: u16, data: &[u8]) -> PyResult<Bound<'py, PyBytes>> {
        let out = self.inner.compress(codec_id, data).map_err(to_py_err)?;
        Ok(PyBytes::new_bound(py, &out))
    }

    fn decompress<'py>(&self, py: Python<'py>, codec_id: u16, data: &[u8]) -> PyResult<Bound<'py, PyBytes>> {
        let out = self.inner.decompress(codec_id, data).map_err(to_py_err)?;
        Ok(PyBytes::new_bound(py, &out))
    }

    fn best_codec(&self, data: &[u8]) -> u16 {
        self.inner.best_codec(data)
    }

    fn base_encode(&self, data: &[u8], charset: &str) -> PyResult<String> {
        self.inner.base_encode(data, charset).map_err(to_py_err)
    }

    fn base_decode<'py>(&self, py: Python<'py>, encoded: &str, charset: &str) -> PyResult<Bound<'py, PyBytes>> {
        let out = self.inner.base_decode(encoded, charset).map_err(to_py_err)?;
        Ok(PyBytes::new_bound(py, &out))
    }

    /// Telemetry snapshot as JSON.
    fn telemetry(&self) -> PyResult<String> {
        self.inner.telemetry().to_json().map_err(to_py_err)
    }

    fn reset_telemetry(&self) {
        self.inner.reset_telemetry();
    }

    /// `(seconds, bytes_per_sec)` for hashing `data_size` bytes `iterations` times.
    #[pyo3(signature = (data_size = 1 << 20, iterations = 10))]
    fn benchmark(&self, py: Python<'_>, data_size: usize, iterations: u32) -> PyResult<(f64, f64)> {
        let engine = Arc::clone(&self.inner);
        let report = py
            .allow_threads(|| engine.benchmark_hash(data_size, iterations))
            .map_err(to_py_err)?;
        Ok((report.seconds, report.bytes_per_sec))
    }
}

// -----------------------------------------------------------------------------
// Registration
// -----------------------------------------------------------------------------

pub fn register(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("InvalidArgumentError", py.get_type_bound::<InvalidArgumentError>())?;
    m.add("DecodeError", py.get_type_bound::<DecodeError>())?;
    m.add(
        "EntropySourceUnavailableError",
        py.get_type_bound::<EntropySourceUnavailableError>(),
    )?;

    m.add_function(wrap_pyfunction!(sha256, m)?)?;
    m.add_function(wrap_pyfunction!(hmac_sha256, m)?)?;
    m.add_function(wrap_pyfunction!(pbkdf2, m)?)?;
    m.add_function(wrap_pyfunction!(pbkdf2_async, m)?)?;
    m.add_function(wrap_pyfunction!(entropy, m)?)?;
    m.add_function(wrap_pyfunction!(analyze, m)?)?;
    m.add_function(wrap_pyfunction!(xor, m)?)?;
    m.add_function(wrap_pyfunction!(secure_random, m)?)?;
    m.add_function(wrap_pyfunction!(secure_wipe, m)?)?;
    m.add_function(wrap_pyfunction!(rle_compress, m)?)?;
    m.add_function(wrap_pyfunction!(rle_decompress, m)?)?;
    m.add_function(wrap_pyfunction!(lz_compress, m)?)?;
    m.add_function(wrap_pyfunction!(lz_decompress, m)?)?;
    m.add_function(wrap_pyfunction!(base_encode, m)?)?;
    m.add_function(wrap_pyfunction!(base_decode, m)?)?;
    m.add_function(wrap_pyfunction!(engine_info, m)?)?;

    m.add_class::<PyEngine>()?;
    m.add("CODEC_RLE", fastcrypt_core::compression::codec_ids::RLE)?;
    m.add("CODEC_LZ", fastcrypt_core::compression::codec_ids::LZ)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
