//! Owned ICC profiles
//!
//! [`IccProfile`] owns a profile handle and closes it on drop. It sits on top
//! of the raw binding and turns null handles into [`Error`]s.

use std::cell::Cell;
use std::io::Read;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::path::Path;

use jcms_sys::{self as ffi, ColorSpaceSignature};

use crate::binding;
use crate::handle::ProfileHandle;
use crate::{Error, Result};

/// Gamma of the built-in gray profile
pub const STANDARD_GRAY_GAMMA: f64 = 2.2;

/// Profiles that can be synthesized without external data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardProfile {
    /// D50 gray with gamma 2.2
    Gray,
    /// lcms2's built-in sRGB
    Srgb,
}

/// ICC color profile backed by lcms2
///
/// Not `Sync`: lcms2 profiles are handed between threads, not shared.
pub struct IccProfile {
    handle: ProfileHandle,
    _not_sync: PhantomData<Cell<()>>,
}

impl IccProfile {
    fn wrap(handle: ProfileHandle) -> Self {
        Self {
            handle,
            _not_sync: PhantomData,
        }
    }

    /// Load a profile from an ICC file
    pub fn from_file(path: &Path) -> Result<Self> {
        let path_str = path
            .to_str()
            .filter(|s| !s.contains('\0'))
            .ok_or_else(|| Error::InvalidString(path.display().to_string()))?;

        let handle = binding::open_profile_from_file(path_str, "r");
        if handle.is_null() {
            return Err(Error::ProfileOpen(path.display().to_string()));
        }
        Ok(Self::wrap(handle))
    }

    /// Create a profile from raw ICC data
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let handle = binding::open_profile_from_mem(data);
        if handle.is_null() {
            return Err(Error::ProfileParse(data.len()));
        }
        Ok(Self::wrap(handle))
    }

    /// Read ICC data to the end of `reader` and parse it
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Create one of the built-in profiles
    pub fn standard(id: StandardProfile) -> Result<Self> {
        match id {
            StandardProfile::Gray => Self::gray(STANDARD_GRAY_GAMMA),
            StandardProfile::Srgb => Self::srgb(),
        }
    }

    /// lcms2's sRGB profile
    pub fn srgb() -> Result<Self> {
        let handle = binding::create_srgb_profile();
        if handle.is_null() {
            return Err(Error::ProfileCreate("sRGB"));
        }
        Ok(Self::wrap(handle))
    }

    /// D50 gray profile with the given gamma
    pub fn gray(gamma: f64) -> Result<Self> {
        let handle = binding::create_gray_profile(gamma);
        if handle.is_null() {
            return Err(Error::ProfileCreate("gray"));
        }
        Ok(Self::wrap(handle))
    }

    /// Take ownership of a handle from the raw binding.
    ///
    /// Returns `None` for the null handle.
    ///
    /// # Safety
    ///
    /// `handle` must be a live profile handle not owned by anything else.
    pub unsafe fn from_handle(handle: ProfileHandle) -> Option<Self> {
        (!handle.is_null()).then(|| Self::wrap(handle))
    }

    /// Description text, empty if the profile has none
    pub fn description(&self) -> String {
        unsafe { binding::profile_description(self.handle) }
    }

    /// Data color space from the profile header
    pub fn color_space(&self) -> ColorSpaceSignature {
        unsafe { ffi::cmsGetColorSpace(self.handle.as_ptr()) }
    }

    /// Serialize to ICC bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let bytes = unsafe { binding::save_profile_to_mem(self.handle) };
        if bytes.is_empty() {
            return Err(Error::ProfileSave);
        }
        Ok(bytes)
    }

    /// Borrow the handle for raw binding calls
    pub fn handle(&self) -> ProfileHandle {
        self.handle
    }

    /// Give up ownership; the caller must close the handle
    pub fn into_handle(self) -> ProfileHandle {
        ManuallyDrop::new(self).handle
    }

    /// Close now and report lcms2's status
    pub fn close(self) -> Result<()> {
        let handle = self.into_handle();
        if unsafe { binding::close_profile_reporting(handle) } {
            Ok(())
        } else {
            Err(Error::ProfileClose)
        }
    }
}

impl Drop for IccProfile {
    fn drop(&mut self) {
        unsafe { binding::close_profile(self.handle) };
    }
}

impl std::fmt::Debug for IccProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IccProfile")
            .field("handle", &self.handle)
            .field("description", &self.description())
            .finish()
    }
}
