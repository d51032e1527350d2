//! # jcms-tests
//!
//! Contract and parity testing for the jcms binding.
//!
//! This crate provides:
//! - Contract tests for the raw binding (null sentinels, empty buffers,
//!   query-then-fill, handle lifetimes)
//! - Parity tests comparing jcms output against the `lcms2` crate
//! - A synthetic profile corpus built with `lcms2`, optionally extended
//!   from a directory of ICC files
//!
//! ## Reference Implementation
//!
//! The `lcms2` crate links the same Little CMS library, so descriptions and
//! transformed pixels are expected to match exactly. Serialized profiles
//! match once the creation date and profile ID are masked out.

pub mod compare;
pub mod corpus;
pub mod patterns;
pub mod reference;

pub use compare::{ByteDiffStats, compare_buffers, normalize_header};
