//! HTTP request handlers for the actor service.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use valhalla::{Action, ValhallaError};

use crate::AppState;

/// Error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Compute a route.
///
/// The request body is handed to the engine unchanged and the engine's
/// response is returned unchanged.
///
/// # Returns
///
/// - `200 OK` with the engine response
/// - `400 Bad Request` if the request cannot cross the engine boundary
/// - `502 Bad Gateway` if the engine reported a failure
/// - `503 Service Unavailable` if the engine could not be reached
#[utoipa::path(
    post,
    path = "/route",
    tag = "routing",
    request_body(
        content = String,
        description = "Valhalla route request",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Engine response", body = String),
        (status = 400, description = "Request cannot cross the engine boundary",
            body = ErrorResponse),
        (status = 502, description = "Engine reported a failure", body = ErrorResponse),
        (status = 503, description = "Engine unreachable", body = ErrorResponse)
    )
)]
pub async fn route(State(state): State<Arc<AppState>>, request: String) -> Response {
    forward(state, Action::Route, request).await
}

/// Look up heights.
///
/// The request body is handed to the engine unchanged and the engine's
/// response is returned unchanged.
#[utoipa::path(
    post,
    path = "/height",
    tag = "routing",
    request_body(
        content = String,
        description = "Valhalla height request",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Engine response", body = String),
        (status = 400, description = "Request cannot cross the engine boundary",
            body = ErrorResponse),
        (status = 502, description = "Engine reported a failure", body = ErrorResponse),
        (status = 503, description = "Engine unreachable", body = ErrorResponse)
    )
)]
pub async fn height(State(state): State<Arc<AppState>>, request: String) -> Response {
    forward(state, Action::Height, request).await
}

/// Run `action` on the blocking pool and turn the outcome into a response.
async fn forward(state: Arc<AppState>, action: Action, request: String) -> Response {
    tracing::debug!(action = %action, request_bytes = request.len(), "Request received");

    let start = Instant::now();
    let actor = Arc::clone(&state.actor);
    let result = tokio::task::spawn_blocking(move || action.invoke(&*actor, &request)).await;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(Ok(response)) => {
            tracing::info!(
                action = %action,
                response_bytes = response.len(),
                elapsed_ms = elapsed_ms,
                "Request answered"
            );
            (StatusCode::OK, response).into_response()
        }
        Ok(Err(e)) => error_response(action, e),
        Err(e) => {
            tracing::error!(action = %action, error = %e, "Engine task panicked");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("{} request aborted", action),
                }),
            )
                .into_response()
        }
    }
}

/// Map an engine error to a status code.
pub fn status_for(e: &ValhallaError) -> StatusCode {
    match e {
        ValhallaError::InteriorNul => StatusCode::BAD_REQUEST,
        ValhallaError::Io(_) => StatusCode::SERVICE_UNAVAILABLE,
        ValhallaError::ProcessFailed { .. }
        | ValhallaError::NullResponse { .. }
        | ValhallaError::InvalidUtf8
        | ValhallaError::Http(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Create an error response for a failed engine call.
fn error_response(action: Action, e: ValhallaError) -> Response {
    let status = status_for(&e);

    tracing::warn!(action = %action, status = status.as_u16(), error = %e, "Request failed");

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
