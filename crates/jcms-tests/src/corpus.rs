//! Test corpus management
//!
//! A synthetic corpus built with the `lcms2` crate, plus ICC files found in
//! the directory named by `JCMS_CORPUS` when it is set.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lcms2::{CIExyY, ColorSpaceSignature, GlobalContext, Profile, ToneCurve};

/// Environment variable naming an optional directory of ICC files
pub const CORPUS_ENV: &str = "JCMS_CORPUS";

/// Source of a test profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSource {
    /// Built in memory by lcms2
    Synthetic,
    /// Loaded from a file
    File(PathBuf),
}

/// Coarse color space of a corpus profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Gray,
    Rgb,
    Cmyk,
    Lab,
    Xyz,
    Other,
}

impl From<ColorSpaceSignature> for ColorSpace {
    fn from(sig: ColorSpaceSignature) -> Self {
        match sig {
            ColorSpaceSignature::GrayData => ColorSpace::Gray,
            ColorSpaceSignature::RgbData => ColorSpace::Rgb,
            ColorSpaceSignature::CmykData => ColorSpace::Cmyk,
            ColorSpaceSignature::LabData => ColorSpace::Lab,
            ColorSpaceSignature::XYZData => ColorSpace::Xyz,
            _ => ColorSpace::Other,
        }
    }
}

/// A test profile from the corpus
#[derive(Debug)]
pub struct TestProfile {
    /// Profile name
    pub name: String,
    /// Where the bytes came from
    pub source: ProfileSource,
    /// Serialized ICC data
    pub icc: Vec<u8>,
    /// Data color space according to lcms2
    pub color_space: ColorSpace,
}

impl TestProfile {
    fn from_lcms2(name: &str, profile: &Profile) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            source: ProfileSource::Synthetic,
            icc: profile.icc().with_context(|| format!("save {name}"))?,
            color_space: profile.color_space().into(),
        })
    }
}

/// Test corpus containing synthetic and on-disk profiles
#[derive(Debug, Default)]
pub struct TestCorpus {
    profiles: Vec<TestProfile>,
}

impl TestCorpus {
    /// Synthetic profiles only
    pub fn synthetic() -> Result<Self> {
        let d50 = CIExyY::d50();
        let mut profiles = vec![TestProfile::from_lcms2("srgb", &Profile::new_srgb())?];

        for gamma in [1.0, 1.8, 2.2] {
            let gray = Profile::new_gray(&d50, &ToneCurve::new(gamma)).context("gray profile")?;
            profiles.push(TestProfile::from_lcms2(&format!("gray_{gamma}"), &gray)?);
        }

        let lab = Profile::new_lab4_context(GlobalContext::new(), &d50).context("Lab profile")?;
        profiles.push(TestProfile::from_lcms2("lab_v4", &lab)?);
        profiles.push(TestProfile::from_lcms2("xyz", &Profile::new_xyz())?);

        Ok(Self { profiles })
    }

    /// Synthetic profiles plus those under `$JCMS_CORPUS`, if set
    pub fn load() -> Result<Self> {
        let mut corpus = Self::synthetic()?;
        if let Some(dir) = std::env::var_os(CORPUS_ENV) {
            corpus.load_dir(Path::new(&dir))?;
        }
        Ok(corpus)
    }

    /// Add every `.icc`/`.icm` file in `dir` that lcms2 can parse
    pub fn load_dir(&mut self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            return Ok(());
        }

        for entry in std::fs::read_dir(dir).with_context(|| dir.display().to_string())? {
            let path = entry?.path();
            if !path.extension().is_some_and(|e| e == "icc" || e == "icm") {
                continue;
            }
            let icc = std::fs::read(&path).with_context(|| path.display().to_string())?;
            let Ok(profile) = Profile::new_icc(&icc) else {
                continue;
            };
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();

            self.profiles.push(TestProfile {
                name,
                source: ProfileSource::File(path),
                icc,
                color_space: profile.color_space().into(),
            });
        }
        Ok(())
    }

    /// Get all profiles
    pub fn profiles(&self) -> &[TestProfile] {
        &self.profiles
    }

    /// Profiles with a given color space
    pub fn with_color_space(&self, color_space: ColorSpace) -> Vec<&TestProfile> {
        self.profiles
            .iter()
            .filter(|p| p.color_space == color_space)
            .collect()
    }

    /// Get profile by name
    pub fn get(&self, name: &str) -> Option<&TestProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }
}
