//! Valhalla Service Library
//!
//! HTTP handlers and types for the Valhalla actor service.
//! This library is used by both the service binary and integration tests.

pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, routing::post, Router};
use valhalla::{Actor, ActorBuilder, ActorProviding, Backend, ValhallaError};

/// Log filter used when `RUST_LOG` is not set.
///
/// Covers the library (`valhalla_service`), the binary
/// (`valhalla_actor_service`) and the HTTP trace layer.
pub const DEFAULT_LOG_FILTER: &str =
    "valhalla_service=info,valhalla_actor_service=info,tower_http=info";

/// An actor shared by all request handlers.
pub type SharedActor = Arc<dyn ActorProviding<Error = ValhallaError> + Send + Sync>;

/// Application state shared across handlers.
pub struct AppState {
    /// Actor every request is forwarded to.
    pub actor: SharedActor,
}

impl AppState {
    /// Wrap an actor for use as router state.
    pub fn new<A>(actor: A) -> Self
    where
        A: ActorProviding<Error = ValhallaError> + Send + Sync + 'static,
    {
        Self {
            actor: Arc::new(actor),
        }
    }
}

/// Build an actor from async code.
///
/// The `http` engine's blocking client must not be created on a runtime
/// worker thread, so the build runs on the blocking pool.
pub async fn build_actor(builder: ActorBuilder) -> valhalla::Result<Actor<Backend>> {
    match tokio::task::spawn_blocking(move || builder.build()).await {
        Ok(result) => result,
        Err(e) => match e.try_into_panic() {
            Ok(payload) => std::panic::resume_unwind(payload),
            Err(e) => Err(ValhallaError::Io(std::io::Error::other(e))),
        },
    }
}

/// Build the API router without documentation or middleware layers.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/route", post(handlers::route))
        .route("/height", post(handlers::height))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use handlers::{ErrorResponse, HealthResponse};
