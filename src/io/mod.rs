//! Input/output operations and error handling

/// Animation assembly and GIF export
pub mod animation;
/// Command-line interface and run orchestration
pub mod cli;
/// Pipeline constants and defaults
pub mod configuration;
/// Error types for all pipeline operations
pub mod error;
/// Image loading, resizing and PNG export
pub mod image;
/// Stage progress display
pub mod progress;
