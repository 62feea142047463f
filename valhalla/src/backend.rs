//! Runtime selection between the bundled engines.

use crate::engine::{Action, Engine};
use crate::error::{Result, ValhallaError};
use crate::process::ProcessEngine;

#[cfg(feature = "http")]
use crate::http::HttpEngine;
#[cfg(feature = "native")]
use crate::native::NativeEngine;

/// One of the engines shipped with this crate.
///
/// Built by [`crate::ActorBuilder`] from configuration.
#[derive(Debug, Clone)]
pub enum Backend {
    /// See [`ProcessEngine`].
    Process(ProcessEngine),
    /// See [`HttpEngine`].
    #[cfg(feature = "http")]
    Http(HttpEngine),
    /// See [`NativeEngine`].
    #[cfg(feature = "native")]
    Native(NativeEngine),
}

impl Backend {
    /// The configuration name of the selected engine.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Process(_) => "process",
            #[cfg(feature = "http")]
            Backend::Http(_) => "http",
            #[cfg(feature = "native")]
            Backend::Native(_) => "native",
        }
    }
}

impl Engine for Backend {
    type Error = ValhallaError;

    fn route(&self, request: &str, config_path: &str) -> Result<String> {
        self.call(Action::Route, request, config_path)
    }

    fn height(&self, request: &str, config_path: &str) -> Result<String> {
        self.call(Action::Height, request, config_path)
    }

    fn call(&self, action: Action, request: &str, config_path: &str) -> Result<String> {
        match self {
            Backend::Process(engine) => engine.call(action, request, config_path),
            #[cfg(feature = "http")]
            Backend::Http(engine) => engine.call(action, request, config_path),
            #[cfg(feature = "native")]
            Backend::Native(engine) => engine.call(action, request, config_path),
        }
    }
}

impl From<ProcessEngine> for Backend {
    fn from(engine: ProcessEngine) -> Self {
        Backend::Process(engine)
    }
}

#[cfg(feature = "http")]
impl From<HttpEngine> for Backend {
    fn from(engine: HttpEngine) -> Self {
        Backend::Http(engine)
    }
}

#[cfg(feature = "native")]
impl From<NativeEngine> for Backend {
    fn from(engine: NativeEngine) -> Self {
        Backend::Native(engine)
    }
}
