//! Mathematical utilities for frame synthesis

/// Interpolation parameters and grid-cell blending
pub mod interpolation;
