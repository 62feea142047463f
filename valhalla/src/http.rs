//! Engine that forwards requests to a running Valhalla HTTP server.
//!
//! This module is only available when the `http` feature is enabled.
//!
//! A Valhalla server exposes each action as `POST /{action}` with the request
//! JSON as body. The server owns its configuration, so the actor's
//! configuration path is not sent.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::actor::DEFAULT_TIMEOUT_SECS;
use crate::engine::{Action, Engine};
use crate::error::{Result, ValhallaError};

/// Engine backed by a Valhalla HTTP server.
///
/// The response body is returned for every HTTP status: a Valhalla server
/// reports request failures as a JSON body with a 4xx status. Only transport
/// failures are errors.
#[derive(Debug, Clone)]
pub struct HttpEngine {
    base_url: String,
    client: Client,
}

impl HttpEngine {
    /// Create an engine for the server at `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create an engine for the server at `base_url`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// The server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The URL an action is posted to.
    pub fn endpoint(&self, action: Action) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), action.as_str())
    }

    fn post(&self, action: Action, request: &str) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint(action))
            .header(CONTENT_TYPE, "application/json")
            .body(request.to_owned())
            .send()?;

        let body = response.bytes()?;
        String::from_utf8(body.to_vec()).map_err(|_| ValhallaError::InvalidUtf8)
    }
}

impl Engine for HttpEngine {
    type Error = ValhallaError;

    fn route(&self, request: &str, _config_path: &str) -> Result<String> {
        self.post(Action::Route, request)
    }

    fn height(&self, request: &str, _config_path: &str) -> Result<String> {
        self.post(Action::Height, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::thread;

    use axum::http::{StatusCode, Uri};
    use axum::Router;

    /// Requests seen by a test upstream, as `(path, body)`.
    type Seen = Arc<Mutex<Vec<(String, String)>>>;

    /// Start an upstream server that answers every request with `status` and
    /// `body`, on its own runtime so blocking clients can call it.
    fn spawn_upstream(status: StatusCode, body: &'static str) -> (String, Seen) {
        let seen: Seen = Arc::default();
        let recorder = Arc::clone(&seen);

        let app = Router::new().fallback(move |uri: Uri, request: String| {
            let recorder = Arc::clone(&recorder);
            async move {
                recorder
                    .lock()
                    .unwrap()
                    .push((uri.path().to_string(), request));
                (status, body)
            }
        });

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });

        (format!("http://{}", addr), seen)
    }

    #[test]
    fn test_endpoint() {
        let engine = HttpEngine::new("http://localhost:8002").unwrap();
        assert_eq!(engine.endpoint(Action::Route), "http://localhost:8002/route");

        let engine = HttpEngine::new("http://localhost:8002/").unwrap();
        assert_eq!(engine.endpoint(Action::Height), "http://localhost:8002/height");
        assert_eq!(engine.base_url(), "http://localhost:8002/");
    }

    #[test]
    fn test_route_posts_request_verbatim() {
        let (url, seen) = spawn_upstream(StatusCode::OK, r#"{"trip":{"status":0}}"#);
        let engine = HttpEngine::new(url).unwrap();

        let request = r#"{"locations":[{"lat":1,"lon":2}],"costing":"auto"}"#;
        let response = engine.route(request, "/ignored").unwrap();
        assert_eq!(response, r#"{"trip":{"status":0}}"#);

        let seen = seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            &[("/route".to_string(), request.to_string())]
        );
    }

    #[test]
    fn test_error_body_returned_unchanged() {
        let error_body =
            r#"{"error_code":171,"error":"No suitable edges near location","status_code":400}"#;
        let (url, seen) = spawn_upstream(StatusCode::BAD_REQUEST, error_body);
        let engine = HttpEngine::new(url).unwrap();

        let response = engine.height("{}", "/ignored").unwrap();
        assert_eq!(response, error_body);
        assert_eq!(seen.lock().unwrap()[0].0, "/height");
    }

    #[test]
    fn test_empty_body_returned() {
        let (url, _) = spawn_upstream(StatusCode::OK, "");
        let engine = HttpEngine::new(url).unwrap();

        assert_eq!(engine.route("", "/ignored").unwrap(), "");
    }

    #[test]
    fn test_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let engine = HttpEngine::new(format!("http://{}", addr)).unwrap();
        assert!(matches!(
            engine.route("{}", "/cfg"),
            Err(ValhallaError::Http(_))
        ));
    }
}
