//! Routing of lcms2 diagnostics into `tracing`
//!
//! lcms2 reports parse and pipeline errors through a process-wide callback
//! and otherwise only returns null. Installing the handler makes those
//! messages visible as `warn` events with target `lcms2`.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::sync::Once;

use jcms_sys as ffi;
use tracing::warn;

static INSTALL: Once = Once::new();

// `cmsERROR_*` codes from lcms2.h
const ERROR_FILE: u32 = 1;
const ERROR_RANGE: u32 = 2;
const ERROR_INTERNAL: u32 = 3;
const ERROR_NULL: u32 = 4;
const ERROR_READ: u32 = 5;
const ERROR_SEEK: u32 = 6;
const ERROR_WRITE: u32 = 7;
const ERROR_UNKNOWN_EXTENSION: u32 = 8;
const ERROR_COLORSPACE_CHECK: u32 = 9;
const ERROR_ALREADY_DEFINED: u32 = 10;
const ERROR_BAD_SIGNATURE: u32 = 11;
const ERROR_CORRUPTION_DETECTED: u32 = 12;
const ERROR_NOT_SUITABLE: u32 = 13;

/// Install the lcms2 error handler. Safe to call more than once.
pub fn install_lcms_error_logger() {
    INSTALL.call_once(|| unsafe { ffi::cmsSetLogErrorHandler(Some(log_lcms_error)) });
}

unsafe extern "C" fn log_lcms_error(_ctx: ffi::Context, code: u32, text: *const c_char) {
    let message = if text.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned()
    };
    warn!(target: "lcms2", code, kind = error_kind(code), "{message}");
}

/// Short name for an lcms2 `cmsERROR_*` code
pub fn error_kind(code: u32) -> &'static str {
    match code {
        ERROR_FILE => "file",
        ERROR_RANGE => "range",
        ERROR_INTERNAL => "internal",
        ERROR_NULL => "null",
        ERROR_READ => "read",
        ERROR_SEEK => "seek",
        ERROR_WRITE => "write",
        ERROR_UNKNOWN_EXTENSION => "unknown_extension",
        ERROR_COLORSPACE_CHECK => "colorspace_check",
        ERROR_ALREADY_DEFINED => "already_defined",
        ERROR_BAD_SIGNATURE => "bad_signature",
        ERROR_CORRUPTION_DETECTED => "corruption_detected",
        ERROR_NOT_SUITABLE => "not_suitable",
        _ => "undefined",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding;

    #[test]
    fn test_error_kinds() {
        assert_eq!(error_kind(ERROR_COLORSPACE_CHECK), "colorspace_check");
        assert_eq!(error_kind(0), "undefined");
        assert_eq!(error_kind(999), "undefined");
    }

    #[test]
    fn test_install_twice_then_fail() {
        install_lcms_error_logger();
        install_lcms_error_logger();

        // Failure paths still return null with the handler in place
        assert!(binding::open_profile_from_mem(b"definitely not an icc profile").is_null());
    }
}
