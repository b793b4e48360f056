//! Fixed-size RGB pixel storage shared by source images and synthesized frames
//!
//! Pixels are held in a `(height, width, 3)` array so that rectangular regions can be
//! borrowed as views without copying. Regions are bounds-checked on access and
//! report `None` instead of panicking.

use crate::io::configuration::BACKGROUND_VALUE;
use crate::io::error::{Result, ShuffleError};
use image::{Rgb, RgbImage};
use ndarray::{Array3, ArrayView3, ArrayViewMut3, s};
use std::ops::Range;

/// Number of color channels stored per pixel
pub const CHANNELS: usize = 3;

/// RGB pixel grid with fixed dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Array3<u8>,
}

/// Synthesized output frames share the source buffer layout
pub type FrameBuffer = PixelBuffer;

impl PixelBuffer {
    /// Create a buffer filled with the white background
    pub fn blank(height: usize, width: usize) -> Self {
        Self {
            data: Array3::from_elem((height, width, CHANNELS), BACKGROUND_VALUE),
        }
    }

    /// Build a buffer by evaluating `pixel` at every `(row, col)`
    pub fn from_fn(height: usize, width: usize, pixel: impl Fn(usize, usize) -> [u8; 3]) -> Self {
        let data = Array3::from_shape_fn((height, width, CHANNELS), |(row, col, channel)| {
            pixel(row, col).get(channel).copied().unwrap_or(BACKGROUND_VALUE)
        });
        Self { data }
    }

    /// Wrap an existing `(height, width, 3)` array
    ///
    /// # Errors
    ///
    /// Returns an error if the trailing axis does not hold exactly three channels
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (_, _, channels) = data.dim();
        if channels != CHANNELS {
            return Err(ShuffleError::InvalidParameter {
                parameter: "channels",
                value: channels.to_string(),
                reason: "pixel buffers hold exactly three RGB channels".to_string(),
            });
        }
        Ok(Self { data })
    }

    /// Copy pixels out of a decoded RGB image
    pub fn from_rgb_image(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self::from_fn(height as usize, width as usize, |row, col| {
            image.get_pixel(col as u32, row as u32).0
        })
    }

    /// Convert back into an `image` crate buffer for encoding
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width() as u32, self.height() as u32, |x, y| {
            Rgb(self
                .pixel(y as usize, x as usize)
                .unwrap_or([BACKGROUND_VALUE; CHANNELS]))
        })
    }

    /// Number of pixel rows
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// Number of pixel columns
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    /// Dimensions as (height, width)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    /// RGB value at `(row, col)`, if inside the buffer
    pub fn pixel(&self, row: usize, col: usize) -> Option<[u8; 3]> {
        Some([
            *self.data.get((row, col, 0))?,
            *self.data.get((row, col, 1))?,
            *self.data.get((row, col, 2))?,
        ])
    }

    /// Read-only access to the underlying array
    pub const fn as_array(&self) -> &Array3<u8> {
        &self.data
    }

    /// Borrow a rectangular region, or `None` if it extends past the buffer
    pub fn region(&self, rows: Range<usize>, cols: Range<usize>) -> Option<ArrayView3<'_, u8>> {
        self.contains(&rows, &cols)
            .then(|| self.data.slice(s![rows, cols, ..]))
    }

    /// Mutably borrow a rectangular region, or `None` if it extends past the buffer
    pub fn region_mut(
        &mut self,
        rows: Range<usize>,
        cols: Range<usize>,
    ) -> Option<ArrayViewMut3<'_, u8>> {
        self.contains(&rows, &cols)
            .then(|| self.data.slice_mut(s![rows, cols, ..]))
    }

    fn contains(&self, rows: &Range<usize>, cols: &Range<usize>) -> bool {
        rows.start <= rows.end
            && cols.start <= cols.end
            && rows.end <= self.height()
            && cols.end <= self.width()
    }
}
