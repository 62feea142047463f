//! Valhalla actor service - HTTP front end for Valhalla route and height requests.
//!
//! Each request body is forwarded to the configured engine unchanged and the
//! engine's response is returned unchanged.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `VALHALLA_CONFIG` | Configuration path handed to the engine | Required |
//! | `VALHALLA_ENGINE` | `process`, `http` or `native` | `process` |
//! | `VALHALLA_SERVICE_BIN` | Engine executable for `process` | `valhalla_service` |
//! | `VALHALLA_URL` | Upstream server for `http` | `http://localhost:8002` |
//! | `VALHALLA_TIMEOUT_SECS` | Upstream request timeout for `http` | 300 |
//! | `VALHALLA_PORT` | HTTP server port | 8080 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `POST /route` - Route request
//! - `POST /height` - Height request
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use valhalla::ActorBuilder;
use valhalla_service::{handlers, AppState, DEFAULT_LOG_FILTER};

/// OpenAPI documentation for the actor service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Valhalla Actor Service",
        version = "0.1.0",
        description = "Pass-through REST API for Valhalla route and height requests.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(handlers::route, handlers::height, handlers::health_check),
    components(schemas(handlers::ErrorResponse, handlers::HealthResponse)),
    tags(
        (name = "routing", description = "Engine request endpoints"),
        (name = "system", description = "System and health endpoints")
    )
)]
struct ApiDoc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load port from environment (service-specific config)
    let port: u16 = std::env::var("VALHALLA_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    // The library handles VALHALLA_CONFIG, VALHALLA_ENGINE, VALHALLA_SERVICE_BIN,
    // VALHALLA_URL and VALHALLA_TIMEOUT_SECS.
    // Built before the runtime exists: the `http` engine owns a blocking client.
    let actor = match ActorBuilder::from_env().and_then(ActorBuilder::build) {
        Ok(actor) => actor,
        Err(e) => {
            tracing::error!(error = %e, "Could not configure actor");
            return Err(e.into());
        }
    };

    tracing::info!(
        config_path = actor.config_path(),
        engine = actor.engine().name(),
        port = port,
        "Starting Valhalla actor service"
    );

    let state = Arc::new(AppState::new(actor));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let served = runtime.block_on(serve(Arc::clone(&state), port));

    // The last reference to the actor is released outside the runtime.
    drop(runtime);
    drop(state);

    served
}

async fn serve(state: Arc<AppState>, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    // Build router
    let app = valhalla_service::app(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
