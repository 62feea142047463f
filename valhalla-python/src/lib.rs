//! Python bindings for the valhalla actor.

#![allow(clippy::useless_conversion)]

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

// Use fully qualified path to avoid collision with the Python module name
use ::valhalla as valhalla_lib;
use valhalla_lib::{ActorProviding, EngineKind, ValhallaError, DEFAULT_SERVICE_BIN, DEFAULT_URL};

fn value_error(e: ValhallaError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Access with raw unchecked strings to the Valhalla routing engine.
///
/// Requests and responses are JSON strings passed through unchanged.
///
/// Example:
///     >>> actor = Actor("/data/valhalla.json")
///     >>> response = actor.route('{"locations": [...], "costing": "auto"}')
#[pyclass]
struct Actor {
    inner: valhalla_lib::Actor<valhalla_lib::Backend>,
}

#[pymethods]
impl Actor {
    /// Create a new actor.
    ///
    /// Args:
    ///     config_path: Configuration path handed to the engine.
    ///     engine: "process", "http" or "native" (default: "process").
    ///     bin: Engine executable for the process engine.
    ///     url: Server base URL for the http engine.
    ///
    /// Raises:
    ///     ValueError: If the engine name is unknown or unavailable.
    #[new]
    #[pyo3(signature = (config_path, engine="process", bin=DEFAULT_SERVICE_BIN, url=DEFAULT_URL))]
    fn new(config_path: &str, engine: &str, bin: &str, url: &str) -> PyResult<Self> {
        let kind: EngineKind = engine.parse().map_err(value_error)?;
        let inner = valhalla_lib::ActorBuilder::new(config_path)
            .engine(kind)
            .service_bin(bin)
            .url(url)
            .build()
            .map_err(value_error)?;
        Ok(Actor { inner })
    }

    /// Run a route request.
    ///
    /// This assumes the config path is valid, tiles exist and the request
    /// string is valid. The GIL is released while the engine runs.
    ///
    /// Raises:
    ///     RuntimeError: If the engine reports a failure.
    fn route(&self, py: Python<'_>, request: &str) -> PyResult<String> {
        py.allow_threads(|| self.inner.route(request))
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    /// Run a height request.
    ///
    /// Raises:
    ///     RuntimeError: If the engine reports a failure.
    fn height(&self, py: Python<'_>, request: &str) -> PyResult<String> {
        py.allow_threads(|| self.inner.height(request))
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    /// Configuration path handed to the engine.
    #[getter]
    fn config_path(&self) -> &str {
        self.inner.config_path()
    }

    /// Name of the engine in use.
    #[getter]
    fn engine(&self) -> &'static str {
        self.inner.engine().name()
    }

    fn __repr__(&self) -> String {
        format!(
            "Actor(config_path={:?}, engine={:?})",
            self.inner.config_path(),
            self.inner.engine().name()
        )
    }
}

/// Valhalla - raw actor bindings for the Valhalla routing engine.
///
/// Example:
///     >>> import valhalla
///     >>> actor = valhalla.Actor("/data/valhalla.json")
///     >>> print(actor.height('{"range": true, "shape": [{"lat": 40.7, "lon": -73.9}]}'))
#[pymodule]
#[pyo3(name = "valhalla")]
fn valhalla_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Actor>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
