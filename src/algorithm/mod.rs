/// Minimum-cost assignment of filler blocks to skeleton positions
pub mod assignment;
/// Pipeline configuration and stage orchestration
pub mod executor;
/// Fixed-step block migration simulation
pub mod motion;
/// Composite and interpolated frame generation
pub mod synthesis;
