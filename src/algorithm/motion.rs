//! Fixed-step block migration
//!
//! Every block starts on its filler cell and advances one grid cell per frame toward
//! the skeleton position it was assigned, moving on both axes at once. All blocks step
//! together, so the number of frames is the largest per-block Chebyshev distance
//! (at least one frame is always produced).

use crate::algorithm::assignment::Assignment;
use crate::io::configuration::BACKGROUND_VALUE;
use crate::io::error::{Result, computation_error};
use crate::math::interpolation::step_toward;
use crate::spatial::buffer::{FrameBuffer, PixelBuffer};
use crate::spatial::grid::{BlockGrid, BlockIndex};

/// Per-block migration state, iterated to produce one frame per synchronized step
///
/// Blocks are tracked by the skeleton position they are bound for, in row-major order.
pub struct FixedMotion<'a> {
    grid: &'a BlockGrid,
    filler: &'a PixelBuffer,
    /// Filler cell whose pixels travel to each skeleton position
    sources: Vec<BlockIndex>,
    /// Cell each travelling block currently occupies
    current: Vec<BlockIndex>,
    finished: bool,
}

impl<'a> FixedMotion<'a> {
    /// Place every block on its filler cell
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment does not cover every block of the grid
    pub fn new(
        grid: &'a BlockGrid,
        filler: &'a PixelBuffer,
        assignment: &Assignment,
    ) -> Result<Self> {
        if assignment.len() != grid.block_count() {
            return Err(computation_error(
                "fixed motion",
                &format!(
                    "assignment covers {} blocks but the grid has {}",
                    assignment.len(),
                    grid.block_count()
                ),
            ));
        }

        let sources: Vec<BlockIndex> = assignment
            .sources()
            .iter()
            .map(|&src| grid.block_index(src))
            .collect();
        let current = sources.clone();

        Ok(Self {
            grid,
            filler,
            sources,
            current,
            finished: false,
        })
    }

    /// Cells currently occupied, indexed by destination skeleton position
    pub fn current_cells(&self) -> &[BlockIndex] {
        &self.current
    }

    /// Whether every block sits on its skeleton position
    pub fn is_settled(&self) -> bool {
        self.current
            .iter()
            .enumerate()
            .all(|(dst, &cell)| cell == self.grid.block_index(dst))
    }

    /// Largest number of steps any block still needs
    pub fn remaining_distance(&self) -> usize {
        self.current
            .iter()
            .enumerate()
            .map(|(dst, &cell)| cell.chebyshev_distance(self.grid.block_index(dst)))
            .max()
            .unwrap_or(0)
    }

    /// Number of frames this simulation still yields
    pub fn frames_remaining(&self) -> usize {
        if self.finished {
            0
        } else {
            self.remaining_distance().max(1)
        }
    }

    /// Advance every block one cell and render the resulting frame
    ///
    /// Blocks are painted in row-major order of their destination. After painting a
    /// block at its new cell, its previous cell is cleared to the background unless a
    /// block has already been placed there during this frame.
    fn step(&mut self) -> FrameBuffer {
        let n = self.grid.block_count();
        let mut frame = PixelBuffer::blank(self.filler.height(), self.filler.width());
        let mut occupied = vec![false; n];

        for dst in 0..n {
            let target = self.grid.block_index(dst);
            let (Some(cell), Some(&source)) = (self.current.get_mut(dst), self.sources.get(dst))
            else {
                continue;
            };

            let previous = *cell;
            let next = BlockIndex::new(
                step_toward(previous.row, target.row),
                step_toward(previous.col, target.col),
            );
            *cell = next;

            if let Some(slot) = occupied.get_mut(self.grid.linear_index(next)) {
                *slot = true;
            }
            self.grid.copy_block(&mut frame, next, self.filler, source);

            let previous_taken = occupied
                .get(self.grid.linear_index(previous))
                .copied()
                .unwrap_or(true);
            if !previous_taken {
                self.grid.fill_block(&mut frame, previous, BACKGROUND_VALUE);
            }
        }

        frame
    }
}

impl Iterator for FixedMotion<'_> {
    type Item = FrameBuffer;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let frame = self.step();
        self.finished = self.is_settled();
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.frames_remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FixedMotion<'_> {}
