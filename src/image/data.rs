//! Caller-owned pixel data.

use std::borrow::Cow;

use ndarray::ArrayViewD;
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Interleaved 8-bit pixel layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    Gray8,
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    /// Bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    /// Pixel format for an interleaved channel count.
    pub fn from_channels(channels: usize) -> Result<Self, InputError> {
        match channels {
            1 => Ok(Self::Gray8),
            3 => Ok(Self::Rgb8),
            4 => Ok(Self::Rgba8),
            other => Err(InputError::UnsupportedChannels(other)),
        }
    }
}

/// Structural description of an image: dimensions, layout and raw bytes.
///
/// Nothing is validated at construction. [`build_frame`](crate::build_frame)
/// checks the description when the image is handed to a detector.
#[derive(Debug, Clone)]
pub struct ImageData<'a> {
    width: u32,
    height: u32,
    format: PixelFormat,
    buffer: Cow<'a, [u8]>,
}

impl<'a> ImageData<'a> {
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        buffer: impl Into<Cow<'a, [u8]>>,
    ) -> Self {
        Self {
            width,
            height,
            format,
            buffer: buffer.into(),
        }
    }

    /// Describe an `HxW`, `HxWxC`, `1xHxW` or `1xHxWxC` array of bytes.
    ///
    /// Contiguous arrays are borrowed; anything else is copied into row-major
    /// order first.
    pub fn from_array(array: ArrayViewD<'a, u8>) -> Result<Self, InputError> {
        let shape = array.shape().to_vec();
        let dims: &[usize] = match shape.as_slice() {
            [1, rest @ ..] if rest.len() >= 2 => rest,
            all => all,
        };

        let (height, width, channels) = match *dims {
            [h, w] => (h, w, 1),
            [h, w, c] => (h, w, c),
            _ => return Err(InputError::UnsupportedShape(shape.clone())),
        };
        let format = PixelFormat::from_channels(channels)?;
        let width = u32::try_from(width).map_err(|_| InputError::UnsupportedShape(shape.clone()))?;
        let height =
            u32::try_from(height).map_err(|_| InputError::UnsupportedShape(shape.clone()))?;

        let buffer = match array.to_slice() {
            Some(slice) => Cow::Borrowed(slice),
            None => Cow::Owned(array.iter().copied().collect()),
        };

        Ok(Self {
            width,
            height,
            format,
            buffer,
        })
    }

    /// Decode an image file (PNG or JPEG).
    ///
    /// Grayscale, RGB and RGBA images keep their layout; anything else is
    /// converted to RGB.
    #[cfg(feature = "image-decode")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<ImageData<'static>, InputError> {
        use ::image::DynamicImage;

        let decoded = ::image::open(path).map_err(|e| InputError::Decode(e.to_string()))?;
        let (width, height) = (decoded.width(), decoded.height());
        let (format, bytes) = match decoded {
            DynamicImage::ImageLuma8(img) => (PixelFormat::Gray8, img.into_raw()),
            DynamicImage::ImageRgb8(img) => (PixelFormat::Rgb8, img.into_raw()),
            DynamicImage::ImageRgba8(img) => (PixelFormat::Rgba8, img.into_raw()),
            other => (PixelFormat::Rgb8, other.to_rgb8().into_raw()),
        };

        Ok(ImageData::new(width, height, format, bytes))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Detach from any borrowed buffer.
    pub fn into_owned(self) -> ImageData<'static> {
        ImageData {
            width: self.width,
            height: self.height,
            format: self.format,
            buffer: Cow::Owned(self.buffer.into_owned()),
        }
    }
}
