//! Owned color transforms
//!
//! [`IccTransform`] owns a transform handle, deletes it on drop, and checks
//! buffer lengths against its pixel formats before calling into lcms2.

use std::cell::Cell;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;

use bytemuck::Pod;
use jcms_sys::{intents, PixelFormat};

use crate::binding;
use crate::format;
use crate::handle::TransformHandle;
use crate::profile::IccProfile;
use crate::{Error, Result};

/// Rendering intent for color transformations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderingIntent {
    /// Perceptual rendering intent - best for photographic images
    #[default]
    Perceptual,
    /// Relative colorimetric - preserves in-gamut colors, clips out-of-gamut
    RelativeColorimetric,
    /// Saturation - maintains saturation, may shift hue
    Saturation,
    /// Absolute colorimetric - preserves white point
    AbsoluteColorimetric,
}

impl From<RenderingIntent> for u32 {
    fn from(intent: RenderingIntent) -> Self {
        match intent {
            RenderingIntent::Perceptual => intents::INTENT_PERCEPTUAL,
            RenderingIntent::RelativeColorimetric => intents::INTENT_RELATIVE_COLORIMETRIC,
            RenderingIntent::Saturation => intents::INTENT_SATURATION,
            RenderingIntent::AbsoluteColorimetric => intents::INTENT_ABSOLUTE_COLORIMETRIC,
        }
    }
}

impl TryFrom<u32> for RenderingIntent {
    type Error = u32;

    fn try_from(code: u32) -> std::result::Result<Self, u32> {
        match code {
            intents::INTENT_PERCEPTUAL => Ok(RenderingIntent::Perceptual),
            intents::INTENT_RELATIVE_COLORIMETRIC => Ok(RenderingIntent::RelativeColorimetric),
            intents::INTENT_SATURATION => Ok(RenderingIntent::Saturation),
            intents::INTENT_ABSOLUTE_COLORIMETRIC => Ok(RenderingIntent::AbsoluteColorimetric),
            other => Err(other),
        }
    }
}

/// Options for transform creation
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformOptions {
    /// Rendering intent
    pub intent: RenderingIntent,
    /// `cmsFLAGS_*` bits, forwarded untouched
    pub flags: u32,
}

impl TransformOptions {
    pub fn with_intent(intent: RenderingIntent) -> Self {
        Self { intent, flags: 0 }
    }
}

/// A color transform between two profiles
///
/// The profiles are only needed while the transform is being built.
pub struct IccTransform {
    handle: TransformHandle,
    input_format: PixelFormat,
    output_format: PixelFormat,
    _not_sync: PhantomData<Cell<()>>,
}

impl IccTransform {
    /// Build a transform between two profiles and buffer layouts
    pub fn new(
        input: &IccProfile,
        input_format: PixelFormat,
        output: &IccProfile,
        output_format: PixelFormat,
        options: TransformOptions,
    ) -> Result<Self> {
        let handle = unsafe {
            binding::create_transform(
                input.handle(),
                input_format.0,
                output.handle(),
                output_format.0,
                options.intent.into(),
                options.flags,
            )
        };
        if handle.is_null() {
            return Err(Error::Transform(format!(
                "{:?} ({:#x}) -> {:?} ({:#x}), {:?}",
                input.description(),
                input_format.0,
                output.description(),
                output_format.0,
                options
            )));
        }

        Ok(Self {
            handle,
            input_format,
            output_format,
            _not_sync: PhantomData,
        })
    }

    pub fn input_format(&self) -> PixelFormat {
        self.input_format
    }

    pub fn output_format(&self) -> PixelFormat {
        self.output_format
    }

    /// Transform `pixels` pixels of byte data
    pub fn apply(&self, input: &[u8], output: &mut [u8], pixels: usize) -> Result<()> {
        check_len(self.input_format, pixels, input.len())?;
        check_len(self.output_format, pixels, output.len())?;
        let count = u32::try_from(pixels)
            .map_err(|_| Error::Transform(format!("pixel count {pixels} exceeds u32")))?;

        unsafe { binding::apply_transform(self.handle, input, output, count) };
        Ok(())
    }

    /// Transform typed sample buffers (16-bit, float, double formats)
    pub fn apply_pod<I: Pod, O: Pod>(
        &self,
        input: &[I],
        output: &mut [O],
        pixels: usize,
    ) -> Result<()> {
        self.apply(
            bytemuck::cast_slice(input),
            bytemuck::cast_slice_mut(output),
            pixels,
        )
    }

    /// Transform a whole buffer, sizing the output from the pixel count
    pub fn transform_to_vec(&self, input: &[u8]) -> Result<Vec<u8>> {
        let pixels = input
            .len()
            .checked_div(format::bytes_per_pixel(self.input_format))
            .unwrap_or(0);
        let len = format::buffer_len(self.output_format, pixels).ok_or(Error::BufferSize {
            expected: usize::MAX,
            actual: input.len(),
        })?;
        let mut output = vec![0u8; len];
        self.apply(input, &mut output, pixels)?;
        Ok(output)
    }

    /// Borrow the handle for raw binding calls
    pub fn handle(&self) -> TransformHandle {
        self.handle
    }

    /// Give up ownership; the caller must delete the handle
    pub fn into_handle(self) -> TransformHandle {
        ManuallyDrop::new(self).handle
    }
}

fn check_len(format: PixelFormat, pixels: usize, actual: usize) -> Result<()> {
    match format::buffer_len(format, pixels) {
        Some(expected) if expected <= actual => Ok(()),
        Some(expected) => Err(Error::BufferSize { expected, actual }),
        None => Err(Error::BufferSize {
            expected: usize::MAX,
            actual,
        }),
    }
}

impl Drop for IccTransform {
    fn drop(&mut self) {
        unsafe { binding::delete_transform(self.handle) };
    }
}

impl std::fmt::Debug for IccTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IccTransform")
            .field("handle", &self.handle)
            .field("input_format", &format_args!("{:#x}", self.input_format.0))
            .field("output_format", &format_args!("{:#x}", self.output_format.0))
            .finish()
    }
}
