//! The Valhalla actor: raw, unchecked string access to a routing engine.
//!
//! [`Actor`] pairs a configuration path with an [`Engine`] and forwards
//! requests to it. It never looks inside a request or a response, and it
//! hands back the engine's errors exactly as the engine reported them.
//!
//! # Example
//!
//! ```ignore
//! use valhalla::{ActorBuilder, ActorProviding};
//!
//! let actor = ActorBuilder::new("/data/valhalla.json").build()?;
//! let response = actor.route(
//!     r#"{"locations":[{"lat":40.74,"lon":-73.99},{"lat":40.75,"lon":-73.98}],"costing":"auto"}"#,
//! )?;
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::backend::Backend;
use crate::engine::Engine;
use crate::error::{Result, ValhallaError};
use crate::process::{ProcessEngine, DEFAULT_SERVICE_BIN};

/// Default base URL of a Valhalla HTTP server.
pub const DEFAULT_URL: &str = "http://localhost:8002";

/// Default timeout for HTTP requests in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// The operations a Valhalla actor provides.
///
/// Anything that implements both operations can stand in for [`Actor`].
pub trait ActorProviding {
    /// Failure signal of the underlying engine.
    type Error;

    /// Run a route request.
    fn route(&self, request: &str) -> std::result::Result<String, Self::Error>;

    /// Run a height (elevation) request.
    fn height(&self, request: &str) -> std::result::Result<String, Self::Error>;
}

/// Access with raw unchecked strings to a Valhalla engine.
///
/// The configuration path is fixed at construction and passed unchanged on
/// every call. Behavior with an invalid configuration path, missing tiles or
/// a malformed request is whatever the engine does.
#[derive(Debug, Clone)]
pub struct Actor<E> {
    config_path: String,
    engine: E,
}

impl<E: Engine> Actor<E> {
    /// Create an actor over `engine` using the configuration at `config_path`.
    pub fn new(config_path: impl Into<String>, engine: E) -> Self {
        Self {
            config_path: config_path.into(),
            engine,
        }
    }

    /// The configuration path handed to the engine.
    pub fn config_path(&self) -> &str {
        &self.config_path
    }

    /// The engine requests are forwarded to.
    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl Actor<Backend> {
    /// Create a builder for an actor over one of the bundled engines.
    pub fn builder(config_path: impl Into<String>) -> ActorBuilder {
        ActorBuilder::new(config_path)
    }
}

impl<E: Engine> ActorProviding for Actor<E> {
    type Error = E::Error;

    /// Run a route request. This assumes the config path is valid, tiles
    /// exist and the request string is valid.
    fn route(&self, request: &str) -> std::result::Result<String, E::Error> {
        self.engine.route(request, &self.config_path)
    }

    fn height(&self, request: &str) -> std::result::Result<String, E::Error> {
        self.engine.height(request, &self.config_path)
    }
}

impl<A: ActorProviding + ?Sized> ActorProviding for std::sync::Arc<A> {
    type Error = A::Error;

    fn route(&self, request: &str) -> std::result::Result<String, Self::Error> {
        (**self).route(request)
    }

    fn height(&self, request: &str) -> std::result::Result<String, Self::Error> {
        (**self).height(request)
    }
}

/// Which bundled engine an [`ActorBuilder`] should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    /// One `valhalla_service` process per request.
    #[default]
    Process,
    /// A running Valhalla HTTP server (`http` feature).
    Http,
    /// The `valhalla_shim` library linked into this process (`native` feature).
    Native,
}

impl EngineKind {
    /// The configuration name of this engine.
    pub fn as_str(self) -> &'static str {
        match self {
            EngineKind::Process => "process",
            EngineKind::Http => "http",
            EngineKind::Native => "native",
        }
    }
}

impl FromStr for EngineKind {
    type Err = ValhallaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "process" => Ok(EngineKind::Process),
            "http" => Ok(EngineKind::Http),
            "native" => Ok(EngineKind::Native),
            _ => Err(ValhallaError::UnknownEngine {
                name: s.to_string(),
            }),
        }
    }
}

/// Builder for an [`Actor`] over one of the bundled engines.
///
/// # Example
///
/// ```ignore
/// use valhalla::{ActorBuilder, EngineKind};
///
/// let actor = ActorBuilder::new("/data/valhalla.json")
///     .engine(EngineKind::Http)
///     .url("http://valhalla.internal:8002")
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct ActorBuilder {
    config_path: String,
    engine: EngineKind,
    service_bin: PathBuf,
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    url: String,
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    timeout: Duration,
}

impl ActorBuilder {
    /// Create a new builder with the specified configuration path.
    pub fn new(config_path: impl Into<String>) -> Self {
        Self {
            config_path: config_path.into(),
            engine: EngineKind::default(),
            service_bin: PathBuf::from(DEFAULT_SERVICE_BIN),
            url: DEFAULT_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a builder configured from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `VALHALLA_CONFIG` | Configuration path handed to the engine | Required |
    /// | `VALHALLA_ENGINE` | `process`, `http` or `native` | `process` |
    /// | `VALHALLA_SERVICE_BIN` | Engine executable for `process` | `valhalla_service` |
    /// | `VALHALLA_URL` | Server base URL for `http` | `http://localhost:8002` |
    /// | `VALHALLA_TIMEOUT_SECS` | HTTP request timeout | 300 |
    ///
    /// # Errors
    ///
    /// Returns an error if `VALHALLA_CONFIG` is not set or `VALHALLA_ENGINE`
    /// names an unknown engine.
    pub fn from_env() -> Result<Self> {
        let config_path =
            std::env::var("VALHALLA_CONFIG").map_err(|_| ValhallaError::MissingConfigPath)?;

        let mut builder = Self::new(config_path);

        if let Ok(engine) = std::env::var("VALHALLA_ENGINE") {
            builder.engine = engine.parse()?;
        }
        if let Ok(bin) = std::env::var("VALHALLA_SERVICE_BIN") {
            builder.service_bin = PathBuf::from(bin);
        }
        if let Ok(url) = std::env::var("VALHALLA_URL") {
            builder.url = url;
        }
        if let Some(secs) = std::env::var("VALHALLA_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            builder.timeout = Duration::from_secs(secs);
        }

        Ok(builder)
    }

    /// Set the configuration path.
    ///
    /// Overrides the path set in the constructor or from environment.
    pub fn config_path(mut self, config_path: impl Into<String>) -> Self {
        self.config_path = config_path.into();
        self
    }

    /// Select the engine. Default is [`EngineKind::Process`].
    pub fn engine(mut self, engine: EngineKind) -> Self {
        self.engine = engine;
        self
    }

    /// Set the engine executable used by [`EngineKind::Process`].
    pub fn service_bin<P: AsRef<Path>>(mut self, bin: P) -> Self {
        self.service_bin = bin.as_ref().to_path_buf();
        self
    }

    /// Set the server base URL used by [`EngineKind::Http`].
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the request timeout used by [`EngineKind::Http`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the [`Actor`].
    ///
    /// # Errors
    ///
    /// Returns an error if the selected engine was compiled out, or if the
    /// HTTP client cannot be created.
    pub fn build(self) -> Result<Actor<Backend>> {
        let backend = match self.engine {
            EngineKind::Process => Backend::Process(ProcessEngine::new(self.service_bin)),
            #[cfg(feature = "http")]
            EngineKind::Http => Backend::Http(crate::http::HttpEngine::with_timeout(
                self.url,
                self.timeout,
            )?),
            #[cfg(not(feature = "http"))]
            EngineKind::Http => return Err(ValhallaError::EngineUnavailable { name: "http" }),
            #[cfg(feature = "native")]
            EngineKind::Native => Backend::Native(crate::native::NativeEngine),
            #[cfg(not(feature = "native"))]
            EngineKind::Native => {
                return Err(ValhallaError::EngineUnavailable { name: "native" })
            }
        };

        Ok(Actor::new(self.config_path, backend))
    }
}
