//! Block color statistics and the pairwise block cost matrix
//!
//! Every block is reduced to its mean RGB vector once per image. The cost of moving
//! filler block `src` into skeleton position `dst` is the Euclidean distance between
//! the two means, so filling the `n x n` matrix costs O(1) per cell.

use crate::io::error::{Result, ShuffleError, computation_error};
use crate::spatial::buffer::{CHANNELS, PixelBuffer};
use crate::spatial::grid::BlockGrid;
use ndarray::{Array2, Axis};
use rayon::prelude::*;

/// Mean RGB value of a block
pub type MeanColor = [f64; CHANNELS];

/// Mean color of every block of `buffer`, in row-major block order
///
/// # Errors
///
/// Returns an error if the grid addresses pixels outside the buffer
pub fn block_means(grid: &BlockGrid, buffer: &PixelBuffer) -> Result<Vec<MeanColor>> {
    let pixel_count = (grid.block_size() * grid.block_size()) as f64;

    grid.indices()
        .map(|index| {
            let block = grid.block(buffer, index).ok_or_else(|| {
                computation_error(
                    "block means",
                    &format!(
                        "block ({}, {}) lies outside the {}x{} buffer",
                        index.row,
                        index.col,
                        buffer.height(),
                        buffer.width()
                    ),
                )
            })?;

            let mut mean = [0.0; CHANNELS];
            for (channel, slot) in mean.iter_mut().enumerate() {
                let total: u64 = block
                    .index_axis(Axis(2), channel)
                    .iter()
                    .map(|&value| u64::from(value))
                    .sum();
                *slot = total as f64 / pixel_count;
            }
            Ok(mean)
        })
        .collect()
}

/// Euclidean distance between two mean colors
pub fn color_distance(a: &MeanColor, b: &MeanColor) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Square matrix of filler-to-skeleton placement costs
///
/// Rows index filler blocks and columns index skeleton positions, both by
/// row-major linear block index.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    costs: Array2<f64>,
}

impl CostMatrix {
    /// Build the cost matrix for two equally sized images
    ///
    /// # Errors
    ///
    /// Returns an error if the buffers differ in size or the grid does not fit them
    #[tracing::instrument(skip_all, fields(blocks = grid.block_count()))]
    pub fn build(grid: &BlockGrid, filler: &PixelBuffer, skeleton: &PixelBuffer) -> Result<Self> {
        if filler.dimensions() != skeleton.dimensions() {
            return Err(ShuffleError::DimensionMismatch {
                skeleton: skeleton.dimensions(),
                filler: filler.dimensions(),
            });
        }

        let filler_means = block_means(grid, filler)?;
        let skeleton_means = block_means(grid, skeleton)?;
        tracing::debug!("block means ready");

        Self::from_means(&filler_means, &skeleton_means)
    }

    /// Build the cost matrix from precomputed block means
    ///
    /// # Errors
    ///
    /// Returns an error if the two mean lists differ in length
    pub fn from_means(filler_means: &[MeanColor], skeleton_means: &[MeanColor]) -> Result<Self> {
        let n = filler_means.len();
        if skeleton_means.len() != n {
            return Err(computation_error(
                "cost matrix",
                &format!(
                    "{n} filler blocks but {} skeleton positions",
                    skeleton_means.len()
                ),
            ));
        }

        let mut cells = vec![0.0; n * n];
        if n > 0 {
            cells
                .par_chunks_mut(n)
                .zip(filler_means.par_iter())
                .for_each(|(row, filler_mean)| {
                    for (cell, skeleton_mean) in row.iter_mut().zip(skeleton_means) {
                        *cell = color_distance(filler_mean, skeleton_mean);
                    }
                });
        }

        let costs = Array2::from_shape_vec((n, n), cells)
            .map_err(|e| computation_error("cost matrix", &e))?;
        Ok(Self { costs })
    }

    /// Wrap an arbitrary square matrix of nonnegative finite costs
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square or holds negative or non-finite values
    pub fn from_array(costs: Array2<f64>) -> Result<Self> {
        let (rows, cols) = costs.dim();
        if rows != cols {
            return Err(computation_error(
                "cost matrix",
                &format!("matrix is {rows}x{cols}, expected square"),
            ));
        }
        if let Some(bad) = costs.iter().find(|c| !c.is_finite() || **c < 0.0) {
            return Err(computation_error(
                "cost matrix",
                &format!("cost {bad} is not a nonnegative finite value"),
            ));
        }
        Ok(Self { costs })
    }

    /// Number of blocks on each side of the matching
    pub fn size(&self) -> usize {
        self.costs.nrows()
    }

    /// Cost of placing filler block `src` at skeleton position `dst`
    pub fn cost(&self, src: usize, dst: usize) -> Option<f64> {
        self.costs.get((src, dst)).copied()
    }

    /// Sum of costs for a mapping `targets[src] = dst`
    pub fn total_cost(&self, targets: &[usize]) -> Option<f64> {
        targets
            .iter()
            .enumerate()
            .map(|(src, &dst)| self.cost(src, dst))
            .sum()
    }

    /// Read-only access to the underlying matrix
    pub const fn as_array(&self) -> &Array2<f64> {
        &self.costs
    }
}
