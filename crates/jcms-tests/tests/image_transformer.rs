//! Image transformer tests
//!
//! Source profile selection and layout handling, checked against the lcms2
//! crate running the same relative colorimetric, black point compensated
//! transform.

use std::io::Cursor;

use jcms_core::transformer::ycbcr_to_rgb;
use jcms_core::{Error, IccProfile, IccTransformer, PixelLayout};
use jcms_tests::compare::compare_buffers;
use jcms_tests::corpus::{ColorSpace, TestCorpus};
use jcms_tests::patterns::{Rgb8, counts, gray8_ramp, swap_rgb8};
use jcms_tests::reference::{
    lcms2_gray_icc, lcms2_srgb_icc, transform_lcms2_gray_to_bgr8_bpc,
    transform_lcms2_rgb8_to_bgr8_bpc,
};

fn srgb_destination() -> IccTransformer {
    let dst = IccProfile::from_bytes(&lcms2_srgb_icc().unwrap()).unwrap();
    IccTransformer::new(dst).unwrap()
}

#[test]
fn test_embedded_gray_parity() {
    let transformer = srgb_destination();
    let srgb_icc = lcms2_srgb_icc().unwrap();
    let input = gray8_ramp(256);

    for gamma in [1.0, 1.8, 2.4] {
        let embedded = lcms2_gray_icc(gamma).unwrap();
        let ours = transformer
            .transform(PixelLayout::Gray8, &input, Some(&embedded))
            .unwrap();
        assert_eq!(ours.layout, PixelLayout::Bgr8);

        let reference = transform_lcms2_gray_to_bgr8_bpc(&embedded, &srgb_icc, &input).unwrap();
        let stats = compare_buffers(&reference, &ours.pixels);
        assert!(stats.is_exact(), "gamma {gamma}: {stats:?}");
    }
}

#[test]
fn test_embedded_rgb_parity() {
    let transformer = srgb_destination();
    let srgb_icc = lcms2_srgb_icc().unwrap();

    for pattern in Rgb8::PARITY {
        let input = pattern.pixels(counts::ROW);
        let ours = transformer
            .transform(PixelLayout::Rgb8, &input, Some(&srgb_icc))
            .unwrap();
        let reference = transform_lcms2_rgb8_to_bgr8_bpc(&srgb_icc, &srgb_icc, &input).unwrap();
        assert!(
            compare_buffers(&reference, &ours.pixels).is_exact(),
            "{pattern:?}"
        );
    }
}

#[test]
fn test_configured_default_used_when_embedded_ignored() {
    let mut transformer = srgb_destination();
    let srgb_icc = lcms2_srgb_icc().unwrap();
    let default_icc = lcms2_gray_icc(1.0).unwrap();
    let embedded_icc = lcms2_gray_icc(2.4).unwrap();

    let default = IccProfile::from_reader(Cursor::new(default_icc.clone())).unwrap();
    transformer.set_default_gray(default).unwrap();
    transformer.set_use_embedded_profiles(false);

    let input = gray8_ramp(256);
    let ours = transformer
        .transform(PixelLayout::Gray8, &input, Some(&embedded_icc))
        .unwrap();
    let reference = transform_lcms2_gray_to_bgr8_bpc(&default_icc, &srgb_icc, &input).unwrap();
    assert!(compare_buffers(&reference, &ours.pixels).is_exact());
}

#[test]
fn test_bgr_input_matches_rgb_input() {
    let transformer = srgb_destination();
    let rgb = Rgb8::Noise(7).pixels(counts::TILE);
    let mut bgr = rgb.clone();
    swap_rgb8(&mut bgr);

    let from_rgb = transformer.transform(PixelLayout::Rgb8, &rgb, None).unwrap();
    let from_bgr = transformer.transform(PixelLayout::Bgr8, &bgr, None).unwrap();
    assert_eq!(from_rgb, from_bgr);
}

#[test]
fn test_gray_destination() {
    let gray_dst = IccProfile::from_bytes(&lcms2_gray_icc(2.2).unwrap()).unwrap();
    let transformer = IccTransformer::new(gray_dst).unwrap();

    let out = transformer
        .transform(PixelLayout::Rgb8, &Rgb8::Neutral.pixels(16), None)
        .unwrap();
    assert_eq!(out.layout, PixelLayout::Gray8);
    assert_eq!(out.pixels.len(), 16);
    assert!(out.pixels.windows(2).all(|w| w[0] <= w[1]));
    assert!(out.pixels[0] <= 1);
    assert!(out.pixels[15] >= 254);
}

#[test]
fn test_neutral_ycbcr_stays_neutral() {
    let transformer = srgb_destination();
    let mut samples: Vec<u8> = (0..=255u8).step_by(15).flat_map(|y| [y, 128, 128]).collect();
    ycbcr_to_rgb(&mut samples);

    let out = transformer.transform(PixelLayout::Rgb8, &samples, None).unwrap();
    for (src, dst) in samples.chunks_exact(3).zip(out.pixels.chunks_exact(3)) {
        assert_eq!(src[0], src[1]);
        assert!(dst.iter().all(|&v| v.abs_diff(src[0]) <= 2), "{src:?} -> {dst:?}");
    }
}

#[test]
fn test_mismatched_embedded_profile_rejected() {
    let transformer = srgb_destination();
    let gray_icc = lcms2_gray_icc(2.2).unwrap();
    let result = transformer.transform(PixelLayout::Abgr8, &[255, 1, 2, 3], Some(&gray_icc));
    assert!(matches!(result, Err(Error::ColorSpaceMismatch { .. })));
}

#[test]
fn test_cmyk_profiles_from_corpus() {
    let corpus = TestCorpus::load().expect("corpus");
    let mut transformer = srgb_destination();

    for profile in corpus.with_color_space(ColorSpace::Cmyk) {
        let Ok(cmyk) = IccProfile::from_bytes(&profile.icc) else {
            continue;
        };
        transformer.set_default_cmyk(cmyk).unwrap();

        // No ink is paper white; full ink lands near black
        let inks = [0, 0, 0, 0, 255, 255, 255, 255];
        let Ok(out) = transformer.transform(PixelLayout::Cmyk8, &inks, None) else {
            // Output-only or device link profiles have no CMYK input direction
            continue;
        };
        assert!(out.pixels[..3].iter().all(|&v| v > 200), "{}", profile.name);
        assert!(out.pixels[3..].iter().all(|&v| v < 80), "{}", profile.name);
    }
}
