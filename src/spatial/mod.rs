//! Spatial data structures for images and their block partitions
//!
//! This module contains:
//! - Fixed-size RGB pixel buffers
//! - Block grids with block-region accessors

/// RGB pixel storage shared by source images and frames
pub mod buffer;
/// Block grid partitioning and block copying
pub mod grid;

pub use buffer::{FrameBuffer, PixelBuffer};
pub use grid::{BlockGrid, BlockIndex};
