//! Error types for the owned profile/transform wrappers
//!
//! The raw binding never produces these: it reports failure through null
//! handles and empty buffers only.

use jcms_sys::ColorSpaceSignature;
use thiserror::Error;

/// Result type for jcms operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the owned wrappers
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// lcms2 could not open or parse a profile file
    #[error("Unable to load ICC profile data from file {0}")]
    ProfileOpen(String),

    /// lcms2 rejected an in-memory profile
    #[error("Unable to load ICC profile data from memory buffer ({0} bytes)")]
    ProfileParse(usize),

    /// A synthesized profile could not be built
    #[error("Unable to create {0} profile")]
    ProfileCreate(&'static str),

    /// Serialization to memory failed in either phase
    #[error("Unable to save ICC profile to memory")]
    ProfileSave,

    /// lcms2 reported a failure while releasing the profile
    #[error("Profile close reported failure")]
    ProfileClose,

    /// Transform creation failed
    #[error("Can't create transform: {0}")]
    Transform(String),

    /// Buffer too small for the pixel count and format
    #[error("Buffer size mismatch: expected at least {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// String argument not representable as a C string
    #[error("Invalid string argument: {0:?}")]
    InvalidString(String),

    /// A profile's color space does not fit the pixels it is used with
    #[error("Profile color space {actual:?} not compatible with {expected:?} pixels")]
    ColorSpaceMismatch {
        expected: ColorSpaceSignature,
        actual: ColorSpaceSignature,
    },

    /// No pixel layout exists for this destination color space
    #[error("Unsupported output color space {0:?}")]
    UnsupportedColorSpace(ColorSpaceSignature),

    /// Neither an embedded nor a default source profile is available
    #[error("No source profile for {0:?} pixels")]
    MissingSourceProfile(ColorSpaceSignature),

    /// Reading profile data from a stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
