//! # jcms - Little CMS 2 binding core
//!
//! The native half of a Java binding to Little CMS 2. Profiles and
//! transforms cross the language boundary as opaque 64-bit tokens; this
//! crate owns the mapping between those tokens and lcms2 objects.
//!
//! Two layers:
//!
//! - [`binding`]: one function per bridged lcms2 call. Failures come back as
//!   null handles or empty buffers, exactly what the JNI exports hand to Java.
//! - [`IccProfile`] / [`IccTransform`]: owned wrappers that release on drop
//!   and turn failures into [`Error`]s.
//!
//! [`IccTransformer`] builds on the owned wrappers to convert whole images
//! into one destination profile, choosing source profiles per buffer.
//!
//! ## Quick Start
//!
//! ```no_run
//! use jcms_core::{IccProfile, IccTransform, PixelFormat, TransformOptions};
//!
//! let gray = IccProfile::gray(2.2).unwrap();
//! let srgb = IccProfile::srgb().unwrap();
//!
//! let transform = IccTransform::new(
//!     &gray,
//!     PixelFormat::GRAY_8,
//!     &srgb,
//!     PixelFormat::RGB_8,
//!     TransformOptions::default(),
//! ).unwrap();
//!
//! let src = [0u8, 128, 255];
//! let mut dst = [0u8; 9];
//! transform.apply(&src, &mut dst, 3).unwrap();
//! ```
//!
//! ## Threads
//!
//! Everything runs in lcms2's global context. Handles may move between
//! threads, but concurrent use of one handle is left to the caller. The
//! owned wrappers are `Send` and `!Sync`.

pub mod binding;
pub mod buffer;
pub mod error;
pub mod format;
pub mod handle;
pub mod logging;
pub mod profile;
pub mod transform;
pub mod transformer;

pub use jcms_sys as ffi;
pub use jcms_sys::{intents, PixelFormat};

pub use error::{Error, Result};
pub use handle::{ProfileHandle, TransformHandle};
pub use logging::install_lcms_error_logger;
pub use profile::{IccProfile, StandardProfile, STANDARD_GRAY_GAMMA};
pub use transform::{IccTransform, RenderingIntent, TransformOptions};
pub use transformer::{Converted, IccTransformer, PixelLayout};

/// Version of jcms
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// lcms2 version as reported by the linked library, e.g. `2160` for 2.16
pub fn lcms_version() -> i32 {
    ffi::encoded_version()
}
