//! Buffer comparison
//!
//! Both sides of every comparison run the same lcms2 code, so differences
//! are measured in raw sample units rather than perceptual distance.

/// Statistics from a byte-wise comparison
#[derive(Debug, Clone, Default)]
pub struct ByteDiffStats {
    /// Mean absolute difference
    pub mean: f64,
    /// Maximum absolute difference
    pub max: u8,
    /// Number of differing bytes
    pub mismatched: usize,
    /// Number of compared bytes
    pub count: usize,
}

impl ByteDiffStats {
    /// No byte differs
    pub fn is_exact(&self) -> bool {
        self.mismatched == 0
    }

    /// Every byte is within `tolerance`
    pub fn within(&self, tolerance: u8) -> bool {
        self.max <= tolerance
    }
}

/// Compare two buffers byte by byte. Lengths must match.
pub fn compare_buffers(reference: &[u8], test: &[u8]) -> ByteDiffStats {
    assert_eq!(
        reference.len(),
        test.len(),
        "Buffer lengths must match: {} vs {}",
        reference.len(),
        test.len()
    );

    if reference.is_empty() {
        return ByteDiffStats::default();
    }

    let mut sum = 0u64;
    let mut max = 0u8;
    let mut mismatched = 0;
    for (&a, &b) in reference.iter().zip(test) {
        let diff = a.abs_diff(b);
        if diff > 0 {
            mismatched += 1;
        }
        sum += diff as u64;
        max = max.max(diff);
    }

    ByteDiffStats {
        mean: sum as f64 / reference.len() as f64,
        max,
        mismatched,
        count: reference.len(),
    }
}

/// ICC header: creation date/time
const DATE_RANGE: std::ops::Range<usize> = 24..36;
/// ICC header: MD5 profile ID
const PROFILE_ID_RANGE: std::ops::Range<usize> = 84..100;

/// Zero the header fields that depend on when a profile was created
pub fn normalize_header(icc: &[u8]) -> Vec<u8> {
    let mut out = icc.to_vec();
    if out.len() >= 128 {
        out[DATE_RANGE].fill(0);
        out[PROFILE_ID_RANGE].fill(0);
    }
    out
}
