//! Frame synthesis from a solved assignment
//!
//! Turns the static block assignment into either the final composite or an ordered
//! sequence of intermediate frames under one of the motion policies:
//! - `still`: only the composite is produced
//! - `prop`: blocks slide along the straight line from filler cell to skeleton cell
//! - `dissolve`: every skeleton cell samples filler content along that same line
//! - `fixed`: blocks advance one cell per frame (see [`FixedMotion`])
//!
//! In `prop` mode several blocks may land on the same cell in one frame. Blocks are
//! painted in row-major order of their skeleton position and the last one wins.

use crate::algorithm::assignment::Assignment;
use crate::algorithm::motion::FixedMotion;
use crate::io::error::{Result, ShuffleError, computation_error};
use crate::math::interpolation::blend_cell;
use crate::spatial::buffer::{FrameBuffer, PixelBuffer};
use crate::spatial::grid::{BlockGrid, BlockIndex};
use std::fmt;
use std::str::FromStr;

/// How intermediate frames between the filler and skeleton layouts are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionPolicy {
    /// Composite only, no intermediate frames
    Still,
    /// Blocks slide proportionally from filler cell to skeleton cell
    Proportional,
    /// Skeleton cells cross-fade through the filler blocks between the two cells
    Dissolve,
    /// Blocks step one cell per frame until all arrive
    Fixed,
}

impl MotionPolicy {
    /// Canonical selector string
    pub const fn name(self) -> &'static str {
        match self {
            Self::Still => "still",
            Self::Proportional => "prop",
            Self::Dissolve => "dissolve",
            Self::Fixed => "fixed",
        }
    }

    /// Whether the policy produces an animation
    pub const fn is_animated(self) -> bool {
        !matches!(self, Self::Still)
    }
}

impl fmt::Display for MotionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MotionPolicy {
    type Err = ShuffleError;

    fn from_str(selector: &str) -> Result<Self> {
        match selector.trim().to_ascii_lowercase().as_str() {
            "still" | "final" | "none" => Ok(Self::Still),
            "prop" | "proportional" => Ok(Self::Proportional),
            "dissolve" => Ok(Self::Dissolve),
            "fixed" => Ok(Self::Fixed),
            _ => Err(ShuffleError::UnknownMotionPolicy {
                selector: selector.to_string(),
            }),
        }
    }
}

/// Paints filler blocks into frames according to an assignment
pub struct FrameSynthesizer<'a> {
    grid: &'a BlockGrid,
    filler: &'a PixelBuffer,
    assignment: &'a Assignment,
}

impl<'a> FrameSynthesizer<'a> {
    /// Bind a grid, the filler image and a solved assignment
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment size differs from the grid's block count
    pub fn new(
        grid: &'a BlockGrid,
        filler: &'a PixelBuffer,
        assignment: &'a Assignment,
    ) -> Result<Self> {
        if assignment.len() != grid.block_count() {
            return Err(computation_error(
                "frame synthesis",
                &format!(
                    "assignment covers {} blocks but the grid has {}",
                    assignment.len(),
                    grid.block_count()
                ),
            ));
        }
        Ok(Self {
            grid,
            filler,
            assignment,
        })
    }

    /// Skeleton cell paired with the filler cell that fills it, in row-major skeleton order
    fn placements(&self) -> impl Iterator<Item = (BlockIndex, BlockIndex)> + '_ {
        self.assignment
            .sources()
            .iter()
            .enumerate()
            .map(|(dst, &src)| (self.grid.block_index(dst), self.grid.block_index(src)))
    }

    fn blank_frame(&self) -> FrameBuffer {
        PixelBuffer::blank(self.filler.height(), self.filler.width())
    }

    /// The final image: every skeleton cell holds its assigned filler block
    pub fn composite(&self) -> FrameBuffer {
        let mut frame = self.blank_frame();
        for (target, source) in self.placements() {
            self.grid.copy_block(&mut frame, target, self.filler, source);
        }
        frame
    }

    /// Proportional frame `step` of `count`: each filler block is drawn part way to its
    /// skeleton cell
    ///
    /// The first frame draws blocks on their filler cells and the last on their
    /// skeleton cells.
    pub fn proportional_frame(&self, step: usize, count: usize) -> FrameBuffer {
        let mut frame = self.blank_frame();
        for (target, source) in self.placements() {
            let cell = BlockIndex::new(
                blend_cell(target.row, source.row, step, count),
                blend_cell(target.col, source.col, step, count),
            );
            self.grid.copy_block(&mut frame, cell, self.filler, source);
        }
        frame
    }

    /// Dissolve frame `step` of `count`: each skeleton cell shows the filler block part way
    /// along its path
    ///
    /// The first frame reproduces the filler layout and the last the composite.
    pub fn dissolve_frame(&self, step: usize, count: usize) -> FrameBuffer {
        let mut frame = self.blank_frame();
        for (target, source) in self.placements() {
            let sampled = BlockIndex::new(
                blend_cell(source.row, target.row, step, count),
                blend_cell(source.col, target.col, step, count),
            );
            self.grid.copy_block(&mut frame, target, self.filler, sampled);
        }
        frame
    }

    /// Start a fixed-step migration simulation
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment does not cover the grid
    pub fn fixed_motion(&self) -> Result<FixedMotion<'a>> {
        FixedMotion::new(self.grid, self.filler, self.assignment)
    }

    /// Number of frames `policy` produces with `steps` interpolation steps
    ///
    /// # Errors
    ///
    /// Returns an error if the fixed-step simulation cannot be set up
    pub fn frame_count(&self, policy: MotionPolicy, steps: usize) -> Result<usize> {
        Ok(match policy {
            MotionPolicy::Still => 0,
            MotionPolicy::Proportional | MotionPolicy::Dissolve => steps,
            MotionPolicy::Fixed => self.fixed_motion()?.len(),
        })
    }

    /// Generate the intermediate frames for `policy`
    ///
    /// # Errors
    ///
    /// Returns an error if `steps` is zero for an interpolating policy
    pub fn frames(&self, policy: MotionPolicy, steps: usize) -> Result<Vec<FrameBuffer>> {
        self.frames_with(policy, steps, |_| {})
    }

    /// Generate the intermediate frames for `policy`, reporting each finished frame index
    ///
    /// # Errors
    ///
    /// Returns an error if `steps` is zero for an interpolating policy
    #[tracing::instrument(skip(self, on_frame))]
    pub fn frames_with(
        &self,
        policy: MotionPolicy,
        steps: usize,
        mut on_frame: impl FnMut(usize),
    ) -> Result<Vec<FrameBuffer>> {
        let frames: Vec<FrameBuffer> = match policy {
            MotionPolicy::Still => Vec::new(),
            MotionPolicy::Proportional | MotionPolicy::Dissolve => {
                validate_steps(steps)?;
                (0..steps)
                    .map(|k| {
                        let frame = if policy == MotionPolicy::Proportional {
                            self.proportional_frame(k, steps)
                        } else {
                            self.dissolve_frame(k, steps)
                        };
                        on_frame(k);
                        frame
                    })
                    .collect()
            }
            MotionPolicy::Fixed => self
                .fixed_motion()?
                .enumerate()
                .map(|(k, frame)| {
                    on_frame(k);
                    frame
                })
                .collect(),
        };

        tracing::debug!(frames = frames.len(), "frames synthesized");
        Ok(frames)
    }
}

/// Reject an empty interpolation domain
///
/// # Errors
///
/// Returns an error if `steps` is zero
pub fn validate_steps(steps: usize) -> Result<()> {
    if steps == 0 {
        return Err(ShuffleError::InvalidParameter {
            parameter: "interpolation_steps",
            value: steps.to_string(),
            reason: "at least one interpolation frame is required".to_string(),
        });
    }
    Ok(())
}
