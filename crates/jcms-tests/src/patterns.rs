//! Pixel buffers for transform tests
//!
//! Everything is sized in pixels, the unit the binding's transform count
//! uses. Byte lengths follow from the layout.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// RGB8 content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rgb8 {
    /// The 8 cube corners in a fixed order: black, red, green, blue,
    /// yellow, magenta, cyan, white
    Corners,
    /// Steps along the 12 cube edges, where every color is fully saturated
    Edges,
    /// Black to white through the neutral axis
    Neutral,
    /// Seeded noise
    Noise(u64),
    /// Every sample the same value
    Flat(u8),
}

const CORNERS: [[u8; 3]; 8] = [
    [0, 0, 0],
    [255, 0, 0],
    [0, 255, 0],
    [0, 0, 255],
    [255, 255, 0],
    [255, 0, 255],
    [0, 255, 255],
    [255, 255, 255],
];

impl Rgb8 {
    /// Content compared against the reference library
    pub const PARITY: [Rgb8; 6] = [
        Rgb8::Corners,
        Rgb8::Edges,
        Rgb8::Neutral,
        Rgb8::Noise(42),
        Rgb8::Flat(0),
        Rgb8::Flat(255),
    ];

    /// `count` packed RGB8 pixels
    pub fn pixels(self, count: usize) -> Vec<u8> {
        let mut data = vec![0u8; count * 3];
        match self {
            Rgb8::Corners => {
                for (i, px) in data.chunks_exact_mut(3).enumerate() {
                    px.copy_from_slice(&CORNERS[i % CORNERS.len()]);
                }
            }
            Rgb8::Edges => {
                for (i, px) in data.chunks_exact_mut(3).enumerate() {
                    px.copy_from_slice(&edge_point(i % 12, ((i / 12) * 17 % 256) as u8));
                }
            }
            Rgb8::Neutral => {
                let last = count.saturating_sub(1).max(1);
                for (i, px) in data.chunks_exact_mut(3).enumerate() {
                    px.fill((i * 255 / last) as u8);
                }
            }
            Rgb8::Noise(seed) => ChaCha8Rng::seed_from_u64(seed).fill_bytes(&mut data),
            Rgb8::Flat(v) => data.fill(v),
        }
        data
    }
}

// Edge `edge` of the RGB cube at position `t`. One channel varies, the other
// two sit at 0 or 255.
fn edge_point(edge: usize, t: u8) -> [u8; 3] {
    let axis = edge / 4;
    let fixed = [(edge & 1) as u8 * 255, ((edge >> 1) & 1) as u8 * 255];
    let mut px = [0u8; 3];
    let mut others = fixed.into_iter();
    for (channel, slot) in px.iter_mut().enumerate() {
        *slot = if channel == axis {
            t
        } else {
            others.next().unwrap_or(0)
        };
    }
    px
}

/// Gray8 ramp 0..=255, wrapping after 256 pixels
pub fn gray8_ramp(count: usize) -> Vec<u8> {
    (0..count).map(|i| (i % 256) as u8).collect()
}

/// `count` RGB16 pixels of seeded noise
pub fn rgb16_noise(seed: u64, count: usize) -> Vec<u16> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count * 3).map(|_| rng.r#gen()).collect()
}

/// Reverse each RGB8 pixel in place, giving BGR8 (or back)
pub fn swap_rgb8(data: &mut [u8]) {
    for px in data.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
}

/// Pixel counts used across the suites
pub mod counts {
    pub const ONE: usize = 1;
    pub const ROW: usize = 64;
    pub const TILE: usize = 64 * 64;
    pub const FRAME: usize = 256 * 256;
    /// Not a multiple of any SIMD width
    pub const ODD: usize = 333 * 222;
}
