//! The raw binding surface
//!
//! One function per bridged lcms2 call. Arguments are marshaled into C
//! shapes, the call is forwarded, and the result comes back as a handle token
//! or an owned buffer. Failure is a null handle or an empty buffer; nothing
//! here returns an error or validates a handle.
//!
//! Functions that take a handle are `unsafe`: the handle must be live and of
//! the right kind, and anything else is undefined behavior inside lcms2.
//!
//! Thread safety of concurrent calls is whatever lcms2 provides for the
//! global context; this layer adds no locking.

use std::ffi::CString;
use std::os::raw::{c_char, c_void};
use std::ptr;

use jcms_sys as ffi;
use tracing::{debug, warn};

use crate::buffer::query_then_fill;
use crate::handle::{ProfileHandle, TransformHandle};

/// Capacity of the description buffer, terminating NUL included
pub const DESCRIPTION_CAPACITY: usize = 512;

/// Open and parse an ICC profile file.
///
/// `mode` follows lcms2's access convention ("r" to read, "w" to create).
/// Returns [`ProfileHandle::NULL`] on I/O or parse failure, and when either
/// string cannot be passed as a C string.
pub fn open_profile_from_file(path: &str, mode: &str) -> ProfileHandle {
    let (Ok(c_path), Ok(c_mode)) = (CString::new(path), CString::new(mode)) else {
        warn!(path, mode, "profile path or mode contains a NUL byte");
        return ProfileHandle::NULL;
    };

    let handle = ProfileHandle::from_ptr(unsafe {
        ffi::cmsOpenProfileFromFile(c_path.as_ptr(), c_mode.as_ptr())
    });
    if handle.is_null() {
        warn!(path, mode, "cmsOpenProfileFromFile failed");
    } else {
        debug!(?handle, path, mode, "opened profile from file");
    }
    handle
}

/// Parse an ICC profile held in memory.
pub fn open_profile_from_mem(data: &[u8]) -> ProfileHandle {
    let Ok(len) = u32::try_from(data.len()) else {
        warn!(len = data.len(), "profile buffer exceeds u32 range");
        return ProfileHandle::NULL;
    };

    let handle = ProfileHandle::from_ptr(unsafe {
        ffi::cmsOpenProfileFromMem(data.as_ptr() as *const c_void, len)
    });
    if handle.is_null() {
        warn!(len, "cmsOpenProfileFromMem failed");
    } else {
        debug!(?handle, len, "opened profile from memory");
    }
    handle
}

/// Release a profile. Always reports `true`; lcms2's own status is dropped.
///
/// # Safety
///
/// `handle` must be a live profile handle. It is dangling afterwards.
pub unsafe fn close_profile(handle: ProfileHandle) -> bool {
    let _ = unsafe { close_profile_reporting(handle) };
    true
}

/// Release a profile and return lcms2's status.
///
/// # Safety
///
/// Same contract as [`close_profile`].
pub(crate) unsafe fn close_profile_reporting(handle: ProfileHandle) -> bool {
    debug!(?handle, "closing profile");
    unsafe { ffi::cmsCloseProfile(handle.as_ptr()) != 0 }
}

/// Read the profile description ("en"/"EN" locale).
///
/// At most `DESCRIPTION_CAPACITY - 1` bytes are returned; longer text is cut
/// off by lcms2. A profile without a description yields an empty string.
///
/// # Safety
///
/// `handle` must be a live profile handle.
pub unsafe fn profile_description(handle: ProfileHandle) -> String {
    let mut buffer = [0u8; DESCRIPTION_CAPACITY];
    unsafe {
        ffi::cmsGetProfileInfoASCII(
            handle.as_ptr(),
            ffi::InfoType::Description,
            c"en".as_ptr(),
            c"EN".as_ptr(),
            buffer.as_mut_ptr() as *mut c_char,
            DESCRIPTION_CAPACITY as u32,
        );
    }

    let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    String::from_utf8_lossy(&buffer[..end]).into_owned()
}

/// Serialize a profile to an owned buffer.
///
/// Returns an empty vector, never a missing one, if the size query or the
/// fill fails.
///
/// # Safety
///
/// `handle` must be a live profile handle.
pub unsafe fn save_profile_to_mem(handle: ProfileHandle) -> Vec<u8> {
    save_with(handle, |dst, size| {
        let mem = dst.map_or(ptr::null_mut(), |buf| buf.as_mut_ptr() as *mut c_void);
        unsafe { ffi::cmsSaveProfileToMem(handle.as_ptr(), mem, size) != 0 }
    })
}

/// Drive the two save calls through `call`, mapping failure in either phase
/// to an empty buffer.
pub(crate) fn save_with<F>(handle: ProfileHandle, call: F) -> Vec<u8>
where
    F: FnMut(Option<&mut [u8]>, &mut u32) -> bool,
{
    match query_then_fill(call) {
        Some(bytes) => {
            debug!(?handle, len = bytes.len(), "saved profile to memory");
            bytes
        }
        None => {
            warn!(?handle, "cmsSaveProfileToMem failed");
            Vec::new()
        }
    }
}

/// Compile a transform between two profiles.
///
/// Formats, intent and flags are lcms2 codes passed through as-is; an intent
/// lcms2 does not know yields a null handle. Returns
/// [`TransformHandle::NULL`] if lcms2 cannot build the pipeline, e.g. when a
/// pixel format does not match its profile's color space.
///
/// # Safety
///
/// Both handles must be live profile handles. They may be closed once this
/// returns.
pub unsafe fn create_transform(
    input: ProfileHandle,
    input_format: u32,
    output: ProfileHandle,
    output_format: u32,
    intent: u32,
    flags: u32,
) -> TransformHandle {
    let handle = TransformHandle::from_ptr(unsafe {
        ffi::cmsCreateTransform(
            input.as_ptr(),
            ffi::PixelFormat(input_format),
            output.as_ptr(),
            ffi::PixelFormat(output_format),
            intent,
            flags,
        )
    });
    if handle.is_null() {
        warn!(
            ?input,
            input_format,
            ?output,
            output_format,
            intent,
            flags,
            "cmsCreateTransform failed"
        );
    } else {
        debug!(?handle, input_format, output_format, intent, flags, "created transform");
    }
    handle
}

/// Release a transform. The profiles it was built from are untouched.
///
/// # Safety
///
/// `handle` must be a live transform handle. It is dangling afterwards.
pub unsafe fn delete_transform(handle: TransformHandle) {
    debug!(?handle, "deleting transform");
    unsafe { ffi::cmsDeleteTransform(handle.as_ptr()) }
}

/// Convert `pixels` pixels from `input` into `output`.
///
/// `pixels` counts pixels, not bytes. Buffer layouts are the ones the
/// transform was created with; lengths are not checked.
///
/// # Safety
///
/// `handle` must be a live transform handle, and both buffers must hold at
/// least `pixels` pixels in the transform's input and output formats.
pub unsafe fn apply_transform(
    handle: TransformHandle,
    input: &[u8],
    output: &mut [u8],
    pixels: u32,
) {
    unsafe {
        ffi::cmsDoTransform(
            handle.as_ptr(),
            input.as_ptr() as *const c_void,
            output.as_mut_ptr() as *mut c_void,
            pixels,
        )
    }
}

/// Build lcms2's sRGB profile.
pub fn create_srgb_profile() -> ProfileHandle {
    let handle = ProfileHandle::from_ptr(unsafe { ffi::cmsCreate_sRGBProfile() });
    debug!(?handle, "created sRGB profile");
    handle
}

/// Build a D50 gray profile with a pure gamma tone curve.
///
/// The intermediate curve is freed before returning.
pub fn create_gray_profile(gamma: f64) -> ProfileHandle {
    let Some(curve) = GammaCurve::new(gamma) else {
        warn!(gamma, "cmsBuildGamma failed");
        return ProfileHandle::NULL;
    };

    let handle =
        ProfileHandle::from_ptr(unsafe { ffi::cmsCreateGrayProfile(ffi::cmsD50_xyY(), curve.0) });
    if handle.is_null() {
        warn!(gamma, "cmsCreateGrayProfile failed");
    } else {
        debug!(?handle, gamma, "created gray profile");
    }
    handle
}

/// Owned lcms2 tone curve, freed on drop
struct GammaCurve(*mut ffi::ToneCurve);

impl GammaCurve {
    fn new(gamma: f64) -> Option<Self> {
        let curve = unsafe { ffi::cmsBuildGamma(ptr::null_mut(), gamma) };
        if curve.is_null() {
            None
        } else {
            Some(Self(curve))
        }
    }
}

impl Drop for GammaCurve {
    fn drop(&mut self) {
        unsafe { ffi::cmsFreeToneCurve(self.0) }
    }
}
