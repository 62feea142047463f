//! In-process engine over the `valhalla_shim` C library.
//!
//! This module is only available when the `native` feature is enabled. The
//! final binary must link a library named `valhalla_shim` exporting the
//! functions declared in `include/valhalla_shim.h`:
//!
//! ```c
//! char *valhalla_shim_route(const char *request, const char *config_path);
//! char *valhalla_shim_height(const char *request, const char *config_path);
//! void valhalla_shim_free(char *response);
//! ```
//!
//! Each call returns a heap-allocated NUL-terminated response owned by the
//! caller (released with `valhalla_shim_free`), or NULL on failure.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr::NonNull;

use crate::engine::{Action, Engine};
use crate::error::{Result, ValhallaError};

mod ffi {
    use std::os::raw::c_char;

    #[link(name = "valhalla_shim")]
    extern "C" {
        pub fn valhalla_shim_route(request: *const c_char, config_path: *const c_char)
            -> *mut c_char;
        pub fn valhalla_shim_height(request: *const c_char, config_path: *const c_char)
            -> *mut c_char;
        pub fn valhalla_shim_free(response: *mut c_char);
    }
}

type EntryPoint = unsafe extern "C" fn(*const c_char, *const c_char) -> *mut c_char;

/// A response buffer allocated by the shim.
struct ShimString(NonNull<c_char>);

impl ShimString {
    fn into_string(self) -> Result<String> {
        // SAFETY: the shim returns a valid NUL-terminated string that stays
        // alive until `valhalla_shim_free` runs in `drop`.
        let response = unsafe { CStr::from_ptr(self.0.as_ptr()) };
        response
            .to_str()
            .map(str::to_owned)
            .map_err(|_| ValhallaError::InvalidUtf8)
    }
}

impl Drop for ShimString {
    fn drop(&mut self) {
        // SAFETY: the pointer came from the shim and is freed exactly once.
        unsafe { ffi::valhalla_shim_free(self.0.as_ptr()) }
    }
}

/// Engine backed by the linked `valhalla_shim` library.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEngine;

impl NativeEngine {
    fn call_shim(&self, action: Action, request: &str, config_path: &str) -> Result<String> {
        let request = CString::new(request).map_err(|_| ValhallaError::InteriorNul)?;
        let config_path = CString::new(config_path).map_err(|_| ValhallaError::InteriorNul)?;

        let entry: EntryPoint = match action {
            Action::Route => ffi::valhalla_shim_route,
            Action::Height => ffi::valhalla_shim_height,
        };

        // SAFETY: both arguments are valid NUL-terminated strings that outlive
        // the call; the shim does not retain them.
        let raw = unsafe { entry(request.as_ptr(), config_path.as_ptr()) };

        let response = NonNull::new(raw)
            .map(ShimString)
            .ok_or(ValhallaError::NullResponse { action })?;
        response.into_string()
    }
}

impl Engine for NativeEngine {
    type Error = ValhallaError;

    fn route(&self, request: &str, config_path: &str) -> Result<String> {
        self.call_shim(Action::Route, request, config_path)
    }

    fn height(&self, request: &str, config_path: &str) -> Result<String> {
        self.call_shim(Action::Height, request, config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_nul_rejected_before_call() {
        let engine = NativeEngine;

        assert!(matches!(
            engine.route("{\0}", "/tmp/cfg"),
            Err(ValhallaError::InteriorNul)
        ));
        assert!(matches!(
            engine.height("{}", "/tmp/\0cfg"),
            Err(ValhallaError::InteriorNul)
        ));
    }
}
