//! JNI exports for `org.jcms.LittleCms`
//!
//! Each `Java_org_jcms_LittleCms_*` function unpacks its Java arguments,
//! forwards to [`jcms_core::binding`], and packs the result. Handles travel as
//! `long`. Nothing here throws: a Java argument that cannot be read is logged
//! and answered with the same sentinel lcms2 failures produce (0, `null`, or
//! an empty array).
//!
//! Load with `System.loadLibrary("jcms")`.

use std::os::raw::c_void;
use std::ptr;

use jcms_core::{ProfileHandle, TransformHandle, binding};
use jni::JNIEnv;
use jni::objects::{JByteArray, JClass, JString, ReleaseMode};
use jni::sys::{
    JNI_FALSE, JNI_TRUE, JNI_VERSION_1_6, jboolean, jbyteArray, jdouble, jint, jlong, jstring,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "JCMS_LOG";

/// Filter used when [`LOG_ENV`] is unset or unparsable
pub const DEFAULT_LOG_FILTER: &str = "warn";

// ============================================================================
// Library setup
// ============================================================================

/// Called by the JVM when the library is loaded.
#[unsafe(no_mangle)]
pub extern "system" fn JNI_OnLoad(_vm: *mut jni::sys::JavaVM, _reserved: *mut c_void) -> jint {
    init_logging();
    jcms_core::install_lcms_error_logger();
    info!(
        lcms = %format_lcms_version(jcms_core::lcms_version()),
        jcms = jcms_core::VERSION,
        "jcms loaded"
    );
    JNI_VERSION_1_6
}

/// Install a stderr subscriber unless the host process already has one.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// `2160` -> `"2.16"`
pub fn format_lcms_version(encoded: i32) -> String {
    format!("{}.{}", encoded / 1000, (encoded % 1000) / 10)
}

// ============================================================================
// Argument and result packing
// ============================================================================

fn profile(token: jlong) -> ProfileHandle {
    ProfileHandle::from(token)
}

fn transform(token: jlong) -> TransformHandle {
    TransformHandle::from(token)
}

fn to_jboolean(value: bool) -> jboolean {
    if value { JNI_TRUE } else { JNI_FALSE }
}

fn read_string(env: &mut JNIEnv, value: &JString, what: &str) -> Option<String> {
    match env.get_string(value) {
        Ok(s) => Some(s.into()),
        Err(e) => {
            warn!(error = %e, "unable to read {what} argument");
            None
        }
    }
}

fn new_byte_array(env: &mut JNIEnv, bytes: &[u8]) -> jbyteArray {
    match env.byte_array_from_slice(bytes) {
        Ok(array) => array.into_raw(),
        Err(e) => {
            warn!(error = %e, len = bytes.len(), "unable to allocate byte[]");
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Profiles
// ============================================================================

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_jcms_LittleCms_openProfileFromFile<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    path: JString<'local>,
    mode: JString<'local>,
) -> jlong {
    let Some(path) = read_string(&mut env, &path, "path") else {
        return 0;
    };
    let Some(mode) = read_string(&mut env, &mode, "mode") else {
        return 0;
    };
    binding::open_profile_from_file(&path, &mode).into()
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_jcms_LittleCms_openProfileFromMem<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    data: JByteArray<'local>,
) -> jlong {
    match env.convert_byte_array(&data) {
        Ok(bytes) => binding::open_profile_from_mem(&bytes).into(),
        Err(e) => {
            warn!(error = %e, "unable to read profile data");
            0
        }
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_jcms_LittleCms_closeProfile<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    handle: jlong,
) -> jboolean {
    to_jboolean(unsafe { binding::close_profile(profile(handle)) })
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_jcms_LittleCms_getProfileInfo<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    handle: jlong,
) -> jstring {
    let description = unsafe { binding::profile_description(profile(handle)) };
    match env.new_string(description) {
        Ok(s) => s.into_raw(),
        Err(e) => {
            warn!(error = %e, "unable to allocate description string");
            ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_jcms_LittleCms_saveProfileToMem<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    handle: jlong,
) -> jbyteArray {
    let bytes = unsafe { binding::save_profile_to_mem(profile(handle)) };
    new_byte_array(&mut env, &bytes)
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_jcms_LittleCms_createSrgbProfile<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jlong {
    binding::create_srgb_profile().into()
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_jcms_LittleCms_createGrayProfile<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    gamma: jdouble,
) -> jlong {
    binding::create_gray_profile(gamma).into()
}

// ============================================================================
// Transforms
// ============================================================================

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_jcms_LittleCms_createTransform<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    input: jlong,
    input_format: jint,
    output: jlong,
    output_format: jint,
    intent: jint,
    flags: jint,
) -> jlong {
    let handle = unsafe {
        binding::create_transform(
            profile(input),
            input_format as u32,
            profile(output),
            output_format as u32,
            intent as u32,
            flags as u32,
        )
    };
    handle.into()
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_jcms_LittleCms_deleteTransform<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    handle: jlong,
) {
    unsafe { binding::delete_transform(transform(handle)) }
}

/// `size` is a pixel count. The arrays are pinned or copied by the JVM and
/// released when the element guards drop; the output is copied back.
#[unsafe(no_mangle)]
pub extern "system" fn Java_org_jcms_LittleCms_doTransform<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    handle: jlong,
    input: JByteArray<'local>,
    output: JByteArray<'local>,
    size: jint,
) {
    let src = match unsafe { env.get_array_elements(&input, ReleaseMode::NoCopyBack) } {
        Ok(elements) => elements,
        Err(e) => {
            warn!(error = %e, "unable to access input pixels");
            return;
        }
    };
    let mut dst = match unsafe { env.get_array_elements(&output, ReleaseMode::CopyBack) } {
        Ok(elements) => elements,
        Err(e) => {
            warn!(error = %e, "unable to access output pixels");
            return;
        }
    };

    unsafe {
        binding::apply_transform(
            transform(handle),
            bytemuck::cast_slice::<i8, u8>(&src),
            bytemuck::cast_slice_mut::<i8, u8>(&mut dst),
            size as u32,
        )
    }
}
