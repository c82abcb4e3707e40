//! Validated frame views handed to detection engines.

use crate::error::InputError;
use crate::image::{ImageData, PixelFormat};

/// A borrowed, validated view of an image's pixels.
///
/// A `FrameBuffer` is only produced by [`build_frame`], so engines can rely
/// on non-zero dimensions and `data.len() == stride * height`.
#[derive(Debug, Clone, Copy)]
pub struct FrameBuffer<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
}

impl<'a> FrameBuffer<'a> {
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

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Pixel bytes of row `y`, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride;
        self.data.get(start..start + self.stride)
    }
}

/// Build a frame from an image description.
///
/// Fails with [`InputError::EmptyImage`] for zero-sized images and
/// [`InputError::BufferSizeMismatch`] when the buffer doesn't hold exactly
/// `width * height * channels` bytes.
pub fn build_frame<'a>(image: &'a ImageData<'_>) -> Result<FrameBuffer<'a>, InputError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(InputError::EmptyImage { width, height });
    }

    let actual = image.buffer().len();
    let stride = (width as usize).checked_mul(image.format().channels());
    let expected = stride.and_then(|s| s.checked_mul(height as usize));
    let (Some(stride), Some(expected)) = (stride, expected) else {
        return Err(InputError::BufferSizeMismatch {
            expected: usize::MAX,
            actual,
        });
    };
    if actual != expected {
        return Err(InputError::BufferSizeMismatch { expected, actual });
    }

    Ok(FrameBuffer {
        data: image.buffer(),
        width,
        height,
        stride,
        format: image.format(),
    })
}
