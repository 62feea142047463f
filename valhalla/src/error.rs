//! Error types for the bundled engines and actor configuration.
//!
//! The actor itself never produces these: it hands back whatever error its
//! engine reports. [`ValhallaError`] is the error type of the engines that
//! ship with this crate.

use thiserror::Error;

use crate::engine::Action;

/// Errors that can occur when talking to a Valhalla engine.
#[derive(Error, Debug)]
pub enum ValhallaError {
    /// IO error when spawning the engine or reading its output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No configuration path was supplied.
    #[error("VALHALLA_CONFIG environment variable not set")]
    MissingConfigPath,

    /// Unknown action name (expected `route` or `height`).
    #[error("Unknown action: {name} (expected route or height)")]
    UnknownAction { name: String },

    /// Unknown engine name in configuration.
    #[error("Unknown engine: {name} (expected process, http or native)")]
    UnknownEngine { name: String },

    /// The engine executable exited unsuccessfully.
    #[error("{action} request failed (exit code {code:?}): {stderr}")]
    ProcessFailed {
        action: Action,
        code: Option<i32>,
        stderr: String,
    },

    /// The engine produced output that is not valid UTF-8.
    #[error("Engine response is not valid UTF-8")]
    InvalidUtf8,

    /// A request or configuration path contains a NUL byte and cannot cross
    /// the C boundary.
    #[error("String contains an interior NUL byte and cannot be passed to the native engine")]
    InteriorNul,

    /// The native engine returned a null pointer.
    #[error("Native engine returned no response for {action} request")]
    NullResponse { action: Action },

    /// The engine was compiled out of this build.
    #[error("Engine '{name}' is not available (enable the `{name}` feature)")]
    EngineUnavailable { name: &'static str },

    /// HTTP transport error.
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias using [`ValhallaError`].
pub type Result<T> = std::result::Result<T, ValhallaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValhallaError::ProcessFailed {
            action: Action::Route,
            code: Some(3),
            stderr: "no tiles".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("route"));
        assert!(msg.contains("3"));
        assert!(msg.contains("no tiles"));

        let err = ValhallaError::NullResponse {
            action: Action::Height,
        };
        assert!(err.to_string().contains("height"));

        let err = ValhallaError::UnknownEngine {
            name: "grpc".to_string(),
        };
        assert!(err.to_string().contains("grpc"));

        let err = ValhallaError::EngineUnavailable { name: "native" };
        assert!(err.to_string().contains("`native`"));
    }
}
