//! Image conversion into a fixed destination profile
//!
//! [`IccTransformer`] owns a destination profile and one default source
//! profile per input color space. Each call picks its source profile: the
//! ICC data embedded in the image when that is enabled and present, the
//! default for the buffer's color space otherwise. The source profile must
//! match the buffer's color space.
//!
//! Output is 8-bit, laid out for the destination: BGR for RGB profiles
//! (the byte order of a JVM `TYPE_3BYTE_BGR` raster), one sample for gray.
//! Other destination color spaces are rejected at construction.

use jcms_sys::{ColorSpaceSignature, PixelFormat, FLAGS_BLACKPOINTCOMPENSATION};
use tracing::debug;

use crate::format;
use crate::profile::IccProfile;
use crate::transform::{IccTransform, RenderingIntent, TransformOptions};
use crate::{Error, Result};

/// 8-bit pixel layouts accepted or produced by [`IccTransformer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    Gray8,
    Rgb8,
    Bgr8,
    /// Alpha first; alpha is dropped on output
    Abgr8,
    Cmyk8,
    /// Adobe-style CMYK with every sample inverted
    InvertedCmyk8,
}

impl PixelLayout {
    /// lcms2 format code for this layout
    pub fn format(self) -> PixelFormat {
        match self {
            PixelLayout::Gray8 => PixelFormat::GRAY_8,
            PixelLayout::Rgb8 => PixelFormat::RGB_8,
            PixelLayout::Bgr8 => PixelFormat::BGR_8,
            PixelLayout::Abgr8 => PixelFormat::ABGR_8,
            PixelLayout::Cmyk8 => PixelFormat::CMYK_8,
            PixelLayout::InvertedCmyk8 => PixelFormat::CMYK_8_REV,
        }
    }

    /// Profile color space a source for this layout must have
    pub fn color_space(self) -> ColorSpaceSignature {
        match self {
            PixelLayout::Gray8 => ColorSpaceSignature::GrayData,
            PixelLayout::Rgb8 | PixelLayout::Bgr8 | PixelLayout::Abgr8 => {
                ColorSpaceSignature::RgbData
            }
            PixelLayout::Cmyk8 | PixelLayout::InvertedCmyk8 => ColorSpaceSignature::CmykData,
        }
    }

    pub fn bytes_per_pixel(self) -> usize {
        format::bytes_per_pixel(self.format())
    }

    /// Output layout written for a destination profile's color space
    pub fn for_destination(space: ColorSpaceSignature) -> Result<Self> {
        match space {
            ColorSpaceSignature::RgbData => Ok(PixelLayout::Bgr8),
            ColorSpaceSignature::GrayData => Ok(PixelLayout::Gray8),
            other => Err(Error::UnsupportedColorSpace(other)),
        }
    }
}

/// Pixels produced by [`IccTransformer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    pub layout: PixelLayout,
    pub pixels: Vec<u8>,
}

/// Converts whole pixel buffers into one destination profile
#[derive(Debug)]
pub struct IccTransformer {
    destination: IccProfile,
    output_layout: PixelLayout,
    default_gray: IccProfile,
    default_rgb: IccProfile,
    default_cmyk: Option<IccProfile>,
    options: TransformOptions,
    use_embedded_profiles: bool,
}

impl IccTransformer {
    /// Relative colorimetric with black point compensation
    pub fn new(destination: IccProfile) -> Result<Self> {
        Self::with_intent(destination, RenderingIntent::RelativeColorimetric, true)
    }

    /// Defaults: gamma 2.2 gray, sRGB, no CMYK. Embedded profiles are used.
    pub fn with_intent(
        destination: IccProfile,
        intent: RenderingIntent,
        black_point_compensation: bool,
    ) -> Result<Self> {
        let output_layout = PixelLayout::for_destination(destination.color_space())?;
        let flags = if black_point_compensation {
            FLAGS_BLACKPOINTCOMPENSATION
        } else {
            0
        };

        Ok(Self {
            destination,
            output_layout,
            default_gray: IccProfile::gray(crate::STANDARD_GRAY_GAMMA)?,
            default_rgb: IccProfile::srgb()?,
            default_cmyk: None,
            options: TransformOptions { intent, flags },
            use_embedded_profiles: true,
        })
    }

    pub fn destination(&self) -> &IccProfile {
        &self.destination
    }

    pub fn output_layout(&self) -> PixelLayout {
        self.output_layout
    }

    pub fn options(&self) -> TransformOptions {
        self.options
    }

    pub fn default_gray(&self) -> &IccProfile {
        &self.default_gray
    }

    pub fn default_rgb(&self) -> &IccProfile {
        &self.default_rgb
    }

    pub fn default_cmyk(&self) -> Option<&IccProfile> {
        self.default_cmyk.as_ref()
    }

    pub fn set_default_gray(&mut self, profile: IccProfile) -> Result<()> {
        expect_space(&profile, ColorSpaceSignature::GrayData)?;
        self.default_gray = profile;
        Ok(())
    }

    pub fn set_default_rgb(&mut self, profile: IccProfile) -> Result<()> {
        expect_space(&profile, ColorSpaceSignature::RgbData)?;
        self.default_rgb = profile;
        Ok(())
    }

    pub fn set_default_cmyk(&mut self, profile: IccProfile) -> Result<()> {
        expect_space(&profile, ColorSpaceSignature::CmykData)?;
        self.default_cmyk = Some(profile);
        Ok(())
    }

    pub fn use_embedded_profiles(&self) -> bool {
        self.use_embedded_profiles
    }

    /// When off, embedded ICC data is ignored and defaults always apply
    pub fn set_use_embedded_profiles(&mut self, use_embedded: bool) {
        self.use_embedded_profiles = use_embedded;
    }

    /// Convert `pixels`, preferring `embedded` ICC data as the source profile.
    ///
    /// Embedded data that lcms2 cannot parse is an error, not a fallback.
    pub fn transform(
        &self,
        layout: PixelLayout,
        pixels: &[u8],
        embedded: Option<&[u8]>,
    ) -> Result<Converted> {
        let embedded = match embedded {
            Some(data) if self.use_embedded_profiles => Some(IccProfile::from_bytes(data)?),
            _ => None,
        };
        let source = match &embedded {
            Some(profile) => profile,
            None => self.default_source(layout)?,
        };
        debug!(
            ?layout,
            embedded = embedded.is_some(),
            source = %source.description(),
            "selected source profile"
        );
        self.transform_with(layout, pixels, source)
    }

    /// Convert `pixels` from an explicit source profile
    pub fn transform_with(
        &self,
        layout: PixelLayout,
        pixels: &[u8],
        source: &IccProfile,
    ) -> Result<Converted> {
        let actual = source.color_space();
        if !format::matches_color_space(layout.format(), actual) {
            return Err(Error::ColorSpaceMismatch {
                expected: layout.color_space(),
                actual,
            });
        }

        let bpp = layout.bytes_per_pixel();
        if pixels.len() % bpp != 0 {
            return Err(Error::BufferSize {
                expected: pixels.len().next_multiple_of(bpp),
                actual: pixels.len(),
            });
        }

        let transform = IccTransform::new(
            source,
            layout.format(),
            &self.destination,
            self.output_layout.format(),
            self.options,
        )?;
        let out = transform.transform_to_vec(pixels)?;
        debug!(?layout, pixels = pixels.len() / bpp, "converted buffer");

        Ok(Converted {
            layout: self.output_layout,
            pixels: out,
        })
    }

    fn default_source(&self, layout: PixelLayout) -> Result<&IccProfile> {
        match layout.color_space() {
            ColorSpaceSignature::GrayData => Ok(&self.default_gray),
            ColorSpaceSignature::RgbData => Ok(&self.default_rgb),
            space => self
                .default_cmyk
                .as_ref()
                .ok_or(Error::MissingSourceProfile(space)),
        }
    }
}

fn expect_space(profile: &IccProfile, expected: ColorSpaceSignature) -> Result<()> {
    let actual = profile.color_space();
    if actual == expected {
        Ok(())
    } else {
        Err(Error::ColorSpaceMismatch { expected, actual })
    }
}

/// Convert JFIF YCbCr samples to RGB in place
pub fn ycbcr_to_rgb(samples: &mut [u8]) {
    for px in samples.chunks_exact_mut(3) {
        let (y, cb, cr) = (px[0] as f64, px[1] as f64 - 128.0, px[2] as f64 - 128.0);
        px[0] = clip8(y + 1.402 * cr);
        px[1] = clip8(y - 0.34414 * cb - 0.71414 * cr);
        px[2] = clip8(y + 1.772 * cb);
    }
}

/// Convert Adobe YCCK samples to CMYK in place.
///
/// With `inverted`, K is stored inverted and the CMY result stays inverted,
/// as Adobe writes it.
pub fn ycck_to_cmyk(samples: &mut [u8], inverted: bool) {
    for px in samples.chunks_exact_mut(4) {
        let (y, cb, cr) = (px[0] as f64, px[1] as f64 - 128.0, px[2] as f64 - 128.0);
        let red = y + 1.402 * cr;
        let green = y - 0.34414 * cb - 0.71414 * cr;
        let blue = y + 1.772 * cb;

        let ink = |v: f64| if inverted { clip8(v) } else { clip8(255.0 - v) };
        px[0] = ink(red);
        px[1] = ink(green);
        px[2] = ink(blue);
        if inverted {
            px[3] = 255 - px[3];
        }
    }
}

fn clip8(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::ProfileHandle;

    fn lab_profile() -> IccProfile {
        let handle =
            ProfileHandle::from_ptr(unsafe { jcms_sys::cmsCreateLab4Profile(std::ptr::null()) });
        unsafe { IccProfile::from_handle(handle) }.unwrap()
    }

    fn srgb_transformer() -> IccTransformer {
        IccTransformer::new(IccProfile::srgb().unwrap()).unwrap()
    }

    fn close(a: u8, b: u8) -> bool {
        (a as i32 - b as i32).abs() <= 2
    }

    #[test]
    fn test_defaults() {
        let t = srgb_transformer();
        assert_eq!(t.options().intent, RenderingIntent::RelativeColorimetric);
        assert_eq!(t.options().flags, FLAGS_BLACKPOINTCOMPENSATION);
        assert!(t.use_embedded_profiles());
        assert_eq!(t.default_gray().color_space(), ColorSpaceSignature::GrayData);
        assert_eq!(t.default_rgb().color_space(), ColorSpaceSignature::RgbData);
        assert!(t.default_cmyk().is_none());
        assert_eq!(t.output_layout(), PixelLayout::Bgr8);
    }

    #[test]
    fn test_without_black_point_compensation() {
        let t = IccTransformer::with_intent(
            IccProfile::gray(1.0).unwrap(),
            RenderingIntent::Perceptual,
            false,
        )
        .unwrap();
        assert_eq!(t.options().flags, 0);
        assert_eq!(t.output_layout(), PixelLayout::Gray8);
    }

    #[test]
    fn test_unsupported_destination() {
        let result = IccTransformer::new(lab_profile());
        assert!(matches!(
            result,
            Err(Error::UnsupportedColorSpace(ColorSpaceSignature::LabData))
        ));
    }

    #[test]
    fn test_default_setters_check_color_space() {
        let mut t = srgb_transformer();
        assert!(matches!(
            t.set_default_rgb(IccProfile::gray(1.8).unwrap()),
            Err(Error::ColorSpaceMismatch {
                expected: ColorSpaceSignature::RgbData,
                actual: ColorSpaceSignature::GrayData,
            })
        ));
        assert!(matches!(
            t.set_default_cmyk(IccProfile::srgb().unwrap()),
            Err(Error::ColorSpaceMismatch { .. })
        ));
        assert!(t.default_cmyk().is_none());

        t.set_default_gray(IccProfile::gray(1.0).unwrap()).unwrap();
        t.set_default_rgb(IccProfile::srgb().unwrap()).unwrap();
    }

    #[test]
    fn test_rgb_comes_out_bgr() {
        let t = srgb_transformer();
        let out = t.transform(PixelLayout::Rgb8, &[200, 100, 20, 0, 0, 0], None).unwrap();
        assert_eq!(out.layout, PixelLayout::Bgr8);
        assert_eq!(out.pixels.len(), 6);
        assert!(close(out.pixels[0], 20));
        assert!(close(out.pixels[1], 100));
        assert!(close(out.pixels[2], 200));
        assert!(out.pixels[3..].iter().all(|&v| v <= 1));
    }

    #[test]
    fn test_abgr_alpha_dropped() {
        let t = srgb_transformer();
        let out = t.transform(PixelLayout::Abgr8, &[255, 10, 20, 30], None).unwrap();
        assert_eq!(out.pixels.len(), 3);
        assert!(close(out.pixels[0], 10));
        assert!(close(out.pixels[1], 20));
        assert!(close(out.pixels[2], 30));
    }

    #[test]
    fn test_gray_default_source() {
        let t = srgb_transformer();
        let out = t.transform(PixelLayout::Gray8, &[0, 255], None).unwrap();
        assert!(out.pixels[..3].iter().all(|&v| v <= 1));
        assert!(out.pixels[3..].iter().all(|&v| v >= 254));
    }

    #[test]
    fn test_embedded_profile_preferred() {
        let mut t = srgb_transformer();
        let linear = IccProfile::gray(1.0).unwrap().to_bytes().unwrap();

        let with_default = t.transform(PixelLayout::Gray8, &[128], None).unwrap();
        let with_embedded = t.transform(PixelLayout::Gray8, &[128], Some(&linear)).unwrap();
        // Linear 0.5 encodes brighter in sRGB than gamma 2.2 mid gray
        assert!(with_embedded.pixels[0] > with_default.pixels[0] + 20);

        t.set_use_embedded_profiles(false);
        let ignored = t.transform(PixelLayout::Gray8, &[128], Some(&linear)).unwrap();
        assert_eq!(ignored, with_default);
    }

    #[test]
    fn test_embedded_profile_wrong_space() {
        let t = srgb_transformer();
        let gray = IccProfile::gray(2.2).unwrap().to_bytes().unwrap();
        assert!(matches!(
            t.transform(PixelLayout::Rgb8, &[1, 2, 3], Some(&gray)),
            Err(Error::ColorSpaceMismatch {
                expected: ColorSpaceSignature::RgbData,
                actual: ColorSpaceSignature::GrayData,
            })
        ));
    }

    #[test]
    fn test_unparseable_embedded_profile() {
        let mut t = srgb_transformer();
        let junk = [0u8; 40];
        assert!(matches!(
            t.transform(PixelLayout::Rgb8, &[1, 2, 3], Some(&junk)),
            Err(Error::ProfileParse(40))
        ));

        t.set_use_embedded_profiles(false);
        assert!(t.transform(PixelLayout::Rgb8, &[1, 2, 3], Some(&junk)).is_ok());
    }

    #[test]
    fn test_cmyk_needs_a_source() {
        let t = srgb_transformer();
        for layout in [PixelLayout::Cmyk8, PixelLayout::InvertedCmyk8] {
            assert!(matches!(
                t.transform(layout, &[0, 0, 0, 0], None),
                Err(Error::MissingSourceProfile(ColorSpaceSignature::CmykData))
            ));
        }
    }

    #[test]
    fn test_explicit_source_checked() {
        let t = srgb_transformer();
        let gray = IccProfile::gray(2.2).unwrap();
        assert!(matches!(
            t.transform_with(PixelLayout::Bgr8, &[0, 0, 0], &gray),
            Err(Error::ColorSpaceMismatch { .. })
        ));
        assert!(t.transform_with(PixelLayout::Gray8, &[7, 8], &gray).is_ok());
    }

    #[test]
    fn test_ragged_buffer() {
        let t = srgb_transformer();
        assert!(matches!(
            t.transform(PixelLayout::Rgb8, &[1, 2, 3, 4], None),
            Err(Error::BufferSize {
                expected: 6,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_ycbcr_to_rgb() {
        let mut px = [128, 128, 128, 255, 128, 128, 0, 128, 255];
        ycbcr_to_rgb(&mut px);
        assert_eq!(px[..3], [128, 128, 128]);
        assert_eq!(px[3..6], [255, 255, 255]);
        // Cr full scale on black: red only, clipped below zero elsewhere
        assert_eq!(px[6..], [178, 0, 0]);
    }

    #[test]
    fn test_ycck_to_cmyk() {
        let mut plain = [255, 128, 128, 10];
        ycck_to_cmyk(&mut plain, false);
        assert_eq!(plain, [0, 0, 0, 10]);

        let mut inverted = [255, 128, 128, 10];
        ycck_to_cmyk(&mut inverted, true);
        assert_eq!(inverted, [255, 255, 255, 245]);
    }

    #[test]
    fn test_layout_formats() {
        assert_eq!(PixelLayout::Bgr8.format(), PixelFormat::BGR_8);
        assert_eq!(PixelLayout::InvertedCmyk8.format(), PixelFormat::CMYK_8_REV);
        assert_eq!(PixelLayout::Abgr8.bytes_per_pixel(), 4);
        assert_eq!(PixelLayout::Cmyk8.bytes_per_pixel(), 4);
    }
}
