//! Opaque handle tokens
//!
//! lcms2 hands out raw pointers. On the managed side they travel as 64-bit
//! integers and are never dereferenced here; the newtypes only keep profiles
//! and transforms from being mixed up.

use std::fmt;

use jcms_sys as ffi;

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident => $ptr:ty) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(u64);

        impl $name {
            /// The failure sentinel
            pub const NULL: Self = Self(0);

            /// Wrap a token received from the managed side
            #[inline]
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            #[inline]
            pub const fn into_raw(self) -> u64 {
                self.0
            }

            #[inline]
            pub const fn is_null(self) -> bool {
                self.0 == 0
            }

            #[inline]
            pub(crate) fn from_ptr(ptr: $ptr) -> Self {
                Self(ptr as usize as u64)
            }

            #[inline]
            pub(crate) fn as_ptr(self) -> $ptr {
                self.0 as usize as $ptr
            }
        }

        // JNI `jlong` tokens: bit-cast both ways
        impl From<i64> for $name {
            fn from(token: i64) -> Self {
                Self(token as u64)
            }
        }

        impl From<$name> for i64 {
            fn from(handle: $name) -> i64 {
                handle.0 as i64
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({:#x})"), self.0)
            }
        }
    };
}

define_handle!(
    /// Token for an lcms2 profile (`cmsHPROFILE`)
    ProfileHandle => ffi::HPROFILE
);

define_handle!(
    /// Token for an lcms2 transform (`cmsHTRANSFORM`)
    TransformHandle => ffi::HTRANSFORM
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sentinel() {
        assert!(ProfileHandle::NULL.is_null());
        assert!(TransformHandle::default().is_null());
        assert!(ProfileHandle::from(0i64).is_null());
    }

    #[test]
    fn test_jlong_bit_cast() {
        // Upper-half addresses come through as negative jlongs
        let token = -0x10i64;
        let handle = ProfileHandle::from(token);
        assert!(!handle.is_null());
        assert_eq!(handle.into_raw(), token as u64);
        assert_eq!(i64::from(handle), token);
    }

    #[test]
    fn test_pointer_round_trip() {
        let mut slot = 0u8;
        let ptr = &mut slot as *mut u8 as ffi::HTRANSFORM;
        let handle = TransformHandle::from_ptr(ptr);
        assert_eq!(handle.as_ptr(), ptr);
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", ProfileHandle::from_raw(0xab)), "ProfileHandle(0xab)");
    }
}
