//! # Valhalla - actor bindings for the Valhalla routing engine
//!
//! Raw, unchecked string access to [Valhalla](https://github.com/valhalla/valhalla)
//! route and height requests.
//!
//! ## Features
//!
//! - **Transparent**: requests and responses are passed through untouched
//! - **Engine agnostic**: anything implementing [`Engine`] can sit behind an [`Actor`]
//! - **Honest errors**: engine failures reach the caller exactly as reported
//!
//! ## Quick Start
//!
//! ```ignore
//! use valhalla::{Actor, ActorProviding, ProcessEngine};
//!
//! let actor = Actor::new("/data/valhalla.json", ProcessEngine::default());
//!
//! let route = actor.route(
//!     r#"{"locations":[{"lat":40.74,"lon":-73.99},{"lat":40.75,"lon":-73.98}],"costing":"auto"}"#,
//! )?;
//! let heights = actor.height(r#"{"range":true,"shape":[{"lat":40.74,"lon":-73.99}]}"#)?;
//! ```
//!
//! ## Engines
//!
//! | Engine | Feature | Talks to |
//! |--------|---------|----------|
//! | [`ProcessEngine`] | always | `valhalla_service <config> <action> <request>` |
//! | `HttpEngine` | `http` | a running Valhalla server, `POST /route` and `POST /height` |
//! | `NativeEngine` | `native` | the `valhalla_shim` C library linked into the process |
//!
//! The actor never validates its configuration path or requests. Behavior with
//! an invalid configuration, missing tiles or a malformed request is whatever
//! the engine does.

pub mod actor;
pub mod backend;
pub mod engine;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "native")]
pub mod native;
pub mod process;

// Re-export main types at crate root for convenience
pub use actor::{
    Actor, ActorBuilder, ActorProviding, EngineKind, DEFAULT_TIMEOUT_SECS, DEFAULT_URL,
};
pub use backend::Backend;
pub use engine::{Action, Engine};
pub use error::{Result, ValhallaError};
#[cfg(feature = "http")]
pub use http::HttpEngine;
#[cfg(feature = "native")]
pub use native::NativeEngine;
pub use process::{ProcessEngine, DEFAULT_SERVICE_BIN};
