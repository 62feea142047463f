//! Engine that runs the Valhalla one-shot executable.
//!
//! `valhalla_service` can be invoked as
//! `valhalla_service <config> <action> <request>`: it loads the configuration,
//! answers a single request on stdout and exits. [`ProcessEngine`] wraps that
//! calling convention.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::engine::{Action, Engine};
use crate::error::{Result, ValhallaError};

/// Default name of the Valhalla one-shot executable, looked up on `PATH`.
pub const DEFAULT_SERVICE_BIN: &str = "valhalla_service";

/// Engine backed by one engine process per request.
///
/// The response is the process's stdout with the single line terminator the
/// executable appends removed. A non-zero exit status is reported as
/// [`ValhallaError::ProcessFailed`] carrying stderr.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    program: PathBuf,
}

impl ProcessEngine {
    /// Create an engine that runs `program`.
    pub fn new<P: AsRef<Path>>(program: P) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
        }
    }

    /// The executable this engine runs.
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn run(&self, action: Action, request: &str, config_path: &str) -> Result<String> {
        let output = Command::new(&self.program)
            .arg(config_path)
            .arg(action.as_str())
            .arg(request)
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            return Err(ValhallaError::ProcessFailed {
                action,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        let mut response =
            String::from_utf8(output.stdout).map_err(|_| ValhallaError::InvalidUtf8)?;
        if response.ends_with('\n') {
            response.pop();
            if response.ends_with('\r') {
                response.pop();
            }
        }
        Ok(response)
    }
}

impl Default for ProcessEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_BIN)
    }
}

impl Engine for ProcessEngine {
    type Error = ValhallaError;

    fn route(&self, request: &str, config_path: &str) -> Result<String> {
        self.run(Action::Route, request, config_path)
    }

    fn height(&self, request: &str, config_path: &str) -> Result<String> {
        self.run(Action::Height, request, config_path)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::actor::{Actor, ActorProviding};
    use std::fs;
    use tempfile::TempDir;

    /// Write a shell script to run through `sh`.
    ///
    /// With `sh` as the program, the config path slot carries the script and
    /// the script sees the action as `$1` and the request as `$2`.
    fn write_script(dir: &Path, body: &str) -> String {
        let path = dir.join("engine.sh");
        fs::write(&path, body).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_process_arguments() {
        let engine = ProcessEngine::new("echo");

        let response = engine.route("1,2,3", "/tmp/cfg").unwrap();
        assert_eq!(response, "/tmp/cfg route 1,2,3");

        let response = engine.height("1,2,3", "/tmp/cfg").unwrap();
        assert_eq!(response, "/tmp/cfg height 1,2,3");
    }

    #[test]
    fn test_process_through_actor() {
        let temp_dir = TempDir::new().unwrap();
        let script = write_script(temp_dir.path(), "printf 'OK:%s' \"$2\"\n");

        let actor = Actor::new(script, ProcessEngine::new("sh"));
        assert_eq!(actor.route("1,2,3").unwrap(), "OK:1,2,3");
        assert_eq!(actor.height("1,2,3").unwrap(), "OK:1,2,3");
    }

    #[test]
    fn test_process_request_is_single_argument() {
        let temp_dir = TempDir::new().unwrap();
        let script = write_script(temp_dir.path(), "printf '%s|%s' \"$#\" \"$2\"\n");

        let engine = ProcessEngine::new("sh");
        let request = r#"{"locations": [{"lat": 1, "lon": 2}], "costing": "auto"}"#;
        let response = engine.route(request, &script).unwrap();
        assert_eq!(response, format!("2|{}", request));
    }

    #[test]
    fn test_process_keeps_inner_newlines() {
        let temp_dir = TempDir::new().unwrap();
        let script = write_script(temp_dir.path(), "printf 'a\\nb\\n\\n'\n");

        let response = ProcessEngine::new("sh").route("", &script).unwrap();
        assert_eq!(response, "a\nb\n");
    }

    #[test]
    fn test_process_empty_output() {
        let response = ProcessEngine::new("true").height("anything", "/tmp/cfg").unwrap();
        assert_eq!(response, "");
    }

    #[test]
    fn test_process_failure() {
        let temp_dir = TempDir::new().unwrap();
        let script = write_script(
            temp_dir.path(),
            "echo 'Failed to load tiles' >&2\nexit 3\n",
        );

        let err = ProcessEngine::new("sh").height("{}", &script).unwrap_err();
        match err {
            ValhallaError::ProcessFailed {
                action,
                code,
                stderr,
            } => {
                assert_eq!(action, Action::Height);
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "Failed to load tiles");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_process_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let script = write_script(temp_dir.path(), "printf '\\377\\376'\n");

        let err = ProcessEngine::new("sh").route("", &script).unwrap_err();
        assert!(matches!(err, ValhallaError::InvalidUtf8));
    }

    #[test]
    fn test_process_missing_executable() {
        let temp_dir = TempDir::new().unwrap();
        let engine = ProcessEngine::new(temp_dir.path().join("no_such_binary"));

        let err = engine.route("{}", "/tmp/cfg").unwrap_err();
        assert!(matches!(err, ValhallaError::Io(_)));
    }

    #[test]
    fn test_default_program() {
        assert_eq!(
            ProcessEngine::default().program(),
            Path::new(DEFAULT_SERVICE_BIN)
        );
    }
}
