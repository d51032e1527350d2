//! ICC rendering intent codes as the JVM passes them
//!
//! Same values as `lcms2_sys::ffi::Intent`, kept as plain integers for the
//! raw `cmsCreateTransform` declaration.

pub const INTENT_PERCEPTUAL: u32 = 0;
pub const INTENT_RELATIVE_COLORIMETRIC: u32 = 1;
pub const INTENT_SATURATION: u32 = 2;
pub const INTENT_ABSOLUTE_COLORIMETRIC: u32 = 3;

// lcms2 extensions
pub const INTENT_PRESERVE_K_ONLY_PERCEPTUAL: u32 = 10;
pub const INTENT_PRESERVE_K_ONLY_RELATIVE_COLORIMETRIC: u32 = 11;
pub const INTENT_PRESERVE_K_ONLY_SATURATION: u32 = 12;
pub const INTENT_PRESERVE_K_PLANE_PERCEPTUAL: u32 = 13;
pub const INTENT_PRESERVE_K_PLANE_RELATIVE_COLORIMETRIC: u32 = 14;
pub const INTENT_PRESERVE_K_PLANE_SATURATION: u32 = 15;
