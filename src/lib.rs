//! Rearranges the blocks of one image ("filler") into the layout of another ("skeleton")
//!
//! Both images are partitioned into equal square blocks. A minimum-cost assignment on
//! mean block colors decides where every filler block goes, and the result is rendered
//! either as a single composite or as an animation of blocks migrating into place.

/// Assignment solving, frame synthesis and pipeline orchestration
pub mod algorithm;
/// Block color statistics and the pairwise cost matrix
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Interpolation helpers for frame synthesis
pub mod math;
/// Pixel buffers and block grid partitioning
pub mod spatial;

pub use io::error::{Result, ShuffleError};
