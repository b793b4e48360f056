//! Pipeline constants and runtime configuration defaults

/// Approximate number of blocks requested when no precision is given
pub const DEFAULT_PRECISION: usize = 5000;

/// Number of frames generated by the proportional and dissolve policies
pub const DEFAULT_INTERPOLATION_STEPS: usize = 50;

/// Channel value used for unpainted cells (white background)
pub const BACKGROUND_VALUE: u8 = 255;

// Solver cost grows cubically with the block count
/// Block count above which the assignment solve is reported as expensive
pub const LARGE_ASSIGNMENT_WARNING: usize = 10_000;

// Animation padding, in frame-delay units
/// Frames of the resized filler shown before the migration starts
pub const LEAD_IN_FRAMES: u32 = 20;
/// Frames of the final composite shown after the migration ends
pub const LEAD_OUT_FRAMES: u32 = 20;
/// Display duration of a single animation frame
pub const FRAME_DELAY_MS: u32 = 30;

// Output settings
/// Joins the filler and skeleton stems in output filenames
pub const OUTPUT_JOINER: &str = "_to_";
/// Extension of the still output
pub const STILL_EXTENSION: &str = "png";
/// Extension of the animated output
pub const ANIMATION_EXTENSION: &str = "gif";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
