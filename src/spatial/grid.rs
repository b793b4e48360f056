//! Block grid partitioning over fixed-size pixel buffers
//!
//! A grid splits an `height x width` image into `rows x cols` square blocks of edge
//! `block_size`. Pixels beyond `rows * block_size` or `cols * block_size` are not part
//! of any block and are never addressed.

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::buffer::PixelBuffer;
use ndarray::ArrayView3;
use std::ops::Range;

/// Grid position of a block, counted in blocks rather than pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockIndex {
    /// Block row
    pub row: usize,
    /// Block column
    pub col: usize,
}

impl BlockIndex {
    /// Create a block index
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Number of synchronized one-cell steps needed to reach `other`
    pub const fn chebyshev_distance(self, other: Self) -> usize {
        let rows = self.row.abs_diff(other.row);
        let cols = self.col.abs_diff(other.col);
        if rows > cols { rows } else { cols }
    }
}

/// Partition of an image into equal square blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    rows: usize,
    cols: usize,
    block_size: usize,
}

impl BlockGrid {
    /// Partition a `height x width` image into blocks of edge `block_size`
    ///
    /// # Errors
    ///
    /// Returns an error if `block_size` is zero or larger than either image side
    pub fn new(height: usize, width: usize, block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(invalid_parameter(
                "block_size",
                &block_size,
                &"block edge must be at least one pixel",
            ));
        }

        let rows = height / block_size;
        let cols = width / block_size;
        if rows == 0 || cols == 0 {
            return Err(invalid_parameter(
                "block_size",
                &block_size,
                &format!("block edge exceeds the {height}x{width} image"),
            ));
        }

        Ok(Self {
            rows,
            cols,
            block_size,
        })
    }

    /// Partition an image into roughly `precision` blocks
    ///
    /// # Errors
    ///
    /// Returns an error if the derived block edge is zero or the grid would be empty
    pub fn from_precision(height: usize, width: usize, precision: usize) -> Result<Self> {
        let block_size = block_edge_for_precision(height, width, precision)?;
        Self::new(height, width, block_size)
    }

    /// Number of block rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of block columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Block edge length in pixels
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Total number of blocks, which is also the assignment size
    pub const fn block_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Row-major linear index of a block
    pub const fn linear_index(&self, index: BlockIndex) -> usize {
        index.row * self.cols + index.col
    }

    /// Block index for a row-major linear index
    pub const fn block_index(&self, linear: usize) -> BlockIndex {
        BlockIndex::new(linear / self.cols, linear % self.cols)
    }

    /// Whether the block index lies inside the grid
    pub const fn contains(&self, index: BlockIndex) -> bool {
        index.row < self.rows && index.col < self.cols
    }

    /// All block indices in row-major order
    pub fn indices(&self) -> impl Iterator<Item = BlockIndex> {
        let cols = self.cols;
        (0..self.block_count()).map(move |linear| BlockIndex::new(linear / cols, linear % cols))
    }

    /// Pixel row and column ranges covered by a block
    pub const fn pixel_bounds(&self, index: BlockIndex) -> (Range<usize>, Range<usize>) {
        let top = index.row * self.block_size;
        let left = index.col * self.block_size;
        (top..top + self.block_size, left..left + self.block_size)
    }

    /// Borrow the pixels of a block, or `None` if the block is outside grid or buffer
    pub fn block<'a>(
        &self,
        buffer: &'a PixelBuffer,
        index: BlockIndex,
    ) -> Option<ArrayView3<'a, u8>> {
        if !self.contains(index) {
            return None;
        }
        let (rows, cols) = self.pixel_bounds(index);
        buffer.region(rows, cols)
    }

    /// Copy block `source` of `from` into block `target` of `frame`
    ///
    /// Returns `false` when either block falls outside its grid or buffer.
    pub fn copy_block(
        &self,
        frame: &mut PixelBuffer,
        target: BlockIndex,
        from: &PixelBuffer,
        source: BlockIndex,
    ) -> bool {
        let Some(pixels) = self.block(from, source) else {
            return false;
        };
        if !self.contains(target) {
            return false;
        }
        let (rows, cols) = self.pixel_bounds(target);
        frame.region_mut(rows, cols).is_some_and(|mut region| {
            region.assign(&pixels);
            true
        })
    }

    /// Set every channel of a block to `value`
    pub fn fill_block(&self, frame: &mut PixelBuffer, index: BlockIndex, value: u8) -> bool {
        if !self.contains(index) {
            return false;
        }
        let (rows, cols) = self.pixel_bounds(index);
        frame.region_mut(rows, cols).is_some_and(|mut region| {
            region.fill(value);
            true
        })
    }
}

/// Block edge length giving roughly `precision` blocks over the image
///
/// The edge is `floor(sqrt(height * width / precision))`.
///
/// # Errors
///
/// Returns an error if `precision` is zero or so large that the edge rounds to zero
pub fn block_edge_for_precision(height: usize, width: usize, precision: usize) -> Result<usize> {
    if precision == 0 {
        return Err(invalid_parameter(
            "precision",
            &precision,
            &"precision must be positive",
        ));
    }

    let total_pixels = (height * width) as f64;
    let block_size = (total_pixels / precision as f64).sqrt().floor() as usize;
    if block_size == 0 {
        return Err(invalid_parameter(
            "precision",
            &precision,
            &format!("exceeds the {} pixels available", height * width),
        ));
    }

    Ok(block_size)
}
