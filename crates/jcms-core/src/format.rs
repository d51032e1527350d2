//! Buffer geometry decoded from lcms2 pixel format codes

use jcms_sys::PixelFormat;

/// Size of one pixel. Planar layouts use the same total per pixel.
pub fn bytes_per_pixel(format: PixelFormat) -> usize {
    format.bytes_per_pixel()
}

/// Bytes needed for `pixels` pixels, `None` on overflow
pub fn buffer_len(format: PixelFormat, pixels: usize) -> Option<usize> {
    format.bytes_per_pixel().checked_mul(pixels)
}

/// Whether the format's color space field accepts a profile of `space`.
///
/// `PT_ANY` formats (colorspace bits zero) accept everything.
pub fn matches_color_space(format: PixelFormat, space: jcms_sys::ColorSpaceSignature) -> bool {
    use jcms_sys::ColorSpaceSignature as Sig;

    let pixel_type = format.pixel_type();
    if pixel_type == jcms_sys::PT_ANY {
        return true;
    }
    let expected = match space {
        Sig::GrayData => jcms_sys::PT_GRAY,
        Sig::RgbData => jcms_sys::PT_RGB,
        Sig::CmyData => jcms_sys::PT_CMY,
        Sig::CmykData => jcms_sys::PT_CMYK,
        Sig::LabData => jcms_sys::PT_Lab,
        Sig::XYZData => jcms_sys::PT_XYZ,
        _ => return false,
    };
    pixel_type == expected || (expected == jcms_sys::PT_Lab && pixel_type == jcms_sys::PT_LabV2)
}
