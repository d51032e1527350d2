//! FFI surface for the Little CMS 2 entry points bridged by jcms
//!
//! Declarations, handle types, [`PixelFormat`] and the `FLAGS_*` bits come
//! from `lcms2-sys`, which also builds (or locates) the native library.
//!
//! `cmsCreateTransform` is the one exception. `lcms2-sys` types its intent
//! parameter as the `Intent` enum, but the JVM passes any integer it likes,
//! including codes with no enum variant. It is redeclared here with a plain
//! `u32` intent so those codes reach lcms2 untouched.

#![allow(non_snake_case)]

pub use lcms2_sys::ffi::*;

pub mod intents;

unsafe extern "C" {
    #[allow(clashing_extern_declarations)]
    pub fn cmsCreateTransform(
        Input: HPROFILE,
        InputFormat: PixelFormat,
        Output: HPROFILE,
        OutputFormat: PixelFormat,
        Intent: u32,
        dwFlags: u32,
    ) -> HTRANSFORM;
}

/// Encoded library version, e.g. `2160` for 2.16
pub fn encoded_version() -> i32 {
    unsafe { cmsGetEncodedCMMversion() }
}
