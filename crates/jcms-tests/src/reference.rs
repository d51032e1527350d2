//! Reference implementation wrappers
//!
//! The same operations as the jcms binding, done through the `lcms2` crate.

use anyhow::{Context, Result};
use lcms2::{CIExyY, Flags, Intent, InfoType, Locale, PixelFormat, Profile, ToneCurve, Transform};

/// Description tag as read by the `lcms2` crate
pub fn lcms2_description(icc: &[u8]) -> Result<String> {
    let profile = Profile::new_icc(icc).context("lcms2 profile")?;
    Ok(profile
        .info(InfoType::Description, Locale::none())
        .unwrap_or_default())
}

/// lcms2's built-in sRGB, serialized
pub fn lcms2_srgb_icc() -> Result<Vec<u8>> {
    Profile::new_srgb().icc().context("lcms2 sRGB save")
}

/// D50 gray profile with a gamma curve, serialized
pub fn lcms2_gray_icc(gamma: f64) -> Result<Vec<u8>> {
    let curve = ToneCurve::new(gamma);
    let profile = Profile::new_gray(&CIExyY::d50(), &curve).context("lcms2 gray profile")?;
    profile.icc().context("lcms2 gray save")
}

/// Transform RGB8 pixels between two serialized profiles
pub fn transform_lcms2_rgb8(src_icc: &[u8], dst_icc: &[u8], src_pixels: &[u8]) -> Result<Vec<u8>> {
    let src_profile = Profile::new_icc(src_icc).context("lcms2 src profile")?;
    let dst_profile = Profile::new_icc(dst_icc).context("lcms2 dst profile")?;

    let transform = Transform::<[u8; 3], [u8; 3]>::new(
        &src_profile,
        PixelFormat::RGB_8,
        &dst_profile,
        PixelFormat::RGB_8,
        Intent::Perceptual,
    )
    .context("lcms2 transform")?;

    let src: &[[u8; 3]] = bytemuck::cast_slice(src_pixels);
    let mut dst = vec![[0u8; 3]; src.len()];
    transform.transform_pixels(src, &mut dst);

    Ok(bytemuck::cast_slice(&dst).to_vec())
}

/// Transform GRAY8 samples into RGB8 pixels
pub fn transform_lcms2_gray_to_rgb8(
    gray_icc: &[u8],
    rgb_icc: &[u8],
    gray: &[u8],
) -> Result<Vec<u8>> {
    let gray_profile = Profile::new_icc(gray_icc).context("lcms2 gray profile")?;
    let rgb_profile = Profile::new_icc(rgb_icc).context("lcms2 rgb profile")?;

    let transform = Transform::<[u8; 1], [u8; 3]>::new(
        &gray_profile,
        PixelFormat::GRAY_8,
        &rgb_profile,
        PixelFormat::RGB_8,
        Intent::Perceptual,
    )
    .context("lcms2 transform")?;

    let src: &[[u8; 1]] = bytemuck::cast_slice(gray);
    let mut dst = vec![[0u8; 3]; src.len()];
    transform.transform_pixels(src, &mut dst);

    Ok(bytemuck::cast_slice(&dst).to_vec())
}

/// Transform RGB16 pixels into RGB8 with a rendering intent
pub fn transform_lcms2_rgb16_to_rgb8(
    src_icc: &[u8],
    dst_icc: &[u8],
    src_samples: &[u16],
    intent: Intent,
) -> Result<Vec<u8>> {
    let src_profile = Profile::new_icc(src_icc).context("lcms2 src profile")?;
    let dst_profile = Profile::new_icc(dst_icc).context("lcms2 dst profile")?;

    let transform = Transform::<[u16; 3], [u8; 3]>::new(
        &src_profile,
        PixelFormat::RGB_16,
        &dst_profile,
        PixelFormat::RGB_8,
        intent,
    )
    .context("lcms2 transform")?;

    let src: &[[u16; 3]] = bytemuck::cast_slice(src_samples);
    let mut dst = vec![[0u8; 3]; src.len()];
    transform.transform_pixels(src, &mut dst);

    Ok(bytemuck::cast_slice(&dst).to_vec())
}

/// GRAY8 into BGR8, relative colorimetric with black point compensation
pub fn transform_lcms2_gray_to_bgr8_bpc(
    gray_icc: &[u8],
    rgb_icc: &[u8],
    gray: &[u8],
) -> Result<Vec<u8>> {
    let gray_profile = Profile::new_icc(gray_icc).context("lcms2 gray profile")?;
    let rgb_profile = Profile::new_icc(rgb_icc).context("lcms2 rgb profile")?;

    let transform = Transform::<[u8; 1], [u8; 3]>::new_flags(
        &gray_profile,
        PixelFormat::GRAY_8,
        &rgb_profile,
        PixelFormat::BGR_8,
        Intent::RelativeColorimetric,
        Flags::BLACKPOINT_COMPENSATION,
    )
    .context("lcms2 transform")?;

    let src: &[[u8; 1]] = bytemuck::cast_slice(gray);
    let mut dst = vec![[0u8; 3]; src.len()];
    transform.transform_pixels(src, &mut dst);

    Ok(bytemuck::cast_slice(&dst).to_vec())
}

/// RGB8 into BGR8, relative colorimetric with black point compensation
pub fn transform_lcms2_rgb8_to_bgr8_bpc(
    src_icc: &[u8],
    dst_icc: &[u8],
    src_pixels: &[u8],
) -> Result<Vec<u8>> {
    let src_profile = Profile::new_icc(src_icc).context("lcms2 src profile")?;
    let dst_profile = Profile::new_icc(dst_icc).context("lcms2 dst profile")?;

    let transform = Transform::<[u8; 3], [u8; 3]>::new_flags(
        &src_profile,
        PixelFormat::RGB_8,
        &dst_profile,
        PixelFormat::BGR_8,
        Intent::RelativeColorimetric,
        Flags::BLACKPOINT_COMPENSATION,
    )
    .context("lcms2 transform")?;

    let src: &[[u8; 3]] = bytemuck::cast_slice(src_pixels);
    let mut dst = vec![[0u8; 3]; src.len()];
    transform.transform_pixels(src, &mut dst);

    Ok(bytemuck::cast_slice(&dst).to_vec())
}
