//! Pipeline orchestration from loaded images to synthesized frames
//!
//! Stages run strictly in order and each one consumes the frozen output of the
//! previous: grid, cost matrix, assignment, then frames. Configuration is validated
//! before any of them starts.

use crate::algorithm::assignment::{self, Assignment};
use crate::algorithm::synthesis::{FrameSynthesizer, MotionPolicy, validate_steps};
use crate::analysis::cost::CostMatrix;
use crate::io::configuration::{
    DEFAULT_INTERPOLATION_STEPS, DEFAULT_PRECISION, LARGE_ASSIGNMENT_WARNING,
};
use crate::io::error::{Result, ShuffleError};
use crate::spatial::buffer::{FrameBuffer, PixelBuffer};
use crate::spatial::grid::BlockGrid;

/// Pipeline parameters controlling partitioning and animation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShuffleConfig {
    /// Approximate number of blocks to partition the images into
    pub precision: usize,
    /// Motion policy for intermediate frames
    pub policy: MotionPolicy,
    /// Frame count for the proportional and dissolve policies
    pub interpolation_steps: usize,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            policy: MotionPolicy::Fixed,
            interpolation_steps: DEFAULT_INTERPOLATION_STEPS,
        }
    }
}

impl ShuffleConfig {
    /// Check parameters that do not depend on the images
    ///
    /// # Errors
    ///
    /// Returns an error if the precision is zero or an interpolating policy has no steps
    pub fn validate(&self) -> Result<()> {
        if self.precision == 0 {
            return Err(ShuffleError::InvalidParameter {
                parameter: "precision",
                value: self.precision.to_string(),
                reason: "precision must be positive".to_string(),
            });
        }
        if matches!(
            self.policy,
            MotionPolicy::Proportional | MotionPolicy::Dissolve
        ) {
            validate_steps(self.interpolation_steps)?;
        }
        Ok(())
    }
}

/// Everything a full run produces
#[derive(Debug, Clone)]
pub struct ShuffleOutput {
    /// Block partition shared by both images
    pub grid: BlockGrid,
    /// Solved filler-to-skeleton assignment
    pub assignment: Assignment,
    /// Skeleton layout rebuilt from filler blocks
    pub final_frame: FrameBuffer,
    /// Intermediate frames in playback order (empty for the still policy)
    pub frames: Vec<FrameBuffer>,
}

/// Validated inputs ready for the cost, assignment and synthesis stages
#[derive(Debug)]
pub struct Pipeline {
    config: ShuffleConfig,
    grid: BlockGrid,
    filler: PixelBuffer,
    skeleton: PixelBuffer,
}

impl Pipeline {
    /// Validate the configuration and partition both images
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the buffers differ in size, the precision
    /// yields a zero block edge or an empty grid, or the policy has no steps
    pub fn new(filler: PixelBuffer, skeleton: PixelBuffer, config: ShuffleConfig) -> Result<Self> {
        config.validate()?;

        if filler.dimensions() != skeleton.dimensions() {
            return Err(ShuffleError::DimensionMismatch {
                skeleton: skeleton.dimensions(),
                filler: filler.dimensions(),
            });
        }

        let (height, width) = skeleton.dimensions();
        let grid = BlockGrid::from_precision(height, width, config.precision)?;
        tracing::info!(
            rows = grid.rows(),
            cols = grid.cols(),
            block_size = grid.block_size(),
            policy = %config.policy,
            "partitioned {height}x{width} images"
        );

        Ok(Self {
            config,
            grid,
            filler,
            skeleton,
        })
    }

    /// Configuration the pipeline was built with
    pub const fn config(&self) -> &ShuffleConfig {
        &self.config
    }

    /// Block partition shared by both images
    pub const fn grid(&self) -> &BlockGrid {
        &self.grid
    }

    /// Filler image, already matched to the skeleton size
    pub const fn filler(&self) -> &PixelBuffer {
        &self.filler
    }

    /// Skeleton image
    pub const fn skeleton(&self) -> &PixelBuffer {
        &self.skeleton
    }

    /// Compute the filler-to-skeleton cost matrix
    ///
    /// # Errors
    ///
    /// Returns an error if a block falls outside either buffer
    pub fn cost_matrix(&self) -> Result<CostMatrix> {
        CostMatrix::build(&self.grid, &self.filler, &self.skeleton)
    }

    /// Solve the assignment for a cost matrix
    ///
    /// # Errors
    ///
    /// Returns a computation error if the solver cannot produce a permutation
    pub fn solve(&self, matrix: &CostMatrix) -> Result<Assignment> {
        let n = matrix.size();
        if n > LARGE_ASSIGNMENT_WARNING {
            tracing::warn!(
                blocks = n,
                "assignment over {n} blocks is cubic in the block count; lower the precision for faster runs"
            );
        }
        assignment::solve(matrix)
    }

    /// Bind a frame synthesizer to this pipeline's filler and grid
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment was solved for a different grid
    pub fn synthesizer<'a>(&'a self, assignment: &'a Assignment) -> Result<FrameSynthesizer<'a>> {
        FrameSynthesizer::new(&self.grid, &self.filler, assignment)
    }

    /// Run every stage and collect the results
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any stage
    pub fn run(&self) -> Result<ShuffleOutput> {
        let matrix = self.cost_matrix()?;
        let assignment = self.solve(&matrix)?;

        let synthesizer = self.synthesizer(&assignment)?;
        let final_frame = synthesizer.composite();
        let frames = synthesizer.frames(self.config.policy, self.config.interpolation_steps)?;

        Ok(ShuffleOutput {
            grid: self.grid,
            assignment,
            final_frame,
            frames,
        })
    }
}
