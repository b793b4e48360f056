//! Error types for configuration, computation, and file operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all pipeline operations
#[derive(Debug)]
pub enum ShuffleError {
    /// Failed to load a source image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Pipeline parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Filler and skeleton buffers do not share the same dimensions
    DimensionMismatch {
        /// Skeleton dimensions (height, width)
        skeleton: (usize, usize),
        /// Filler dimensions (height, width)
        filler: (usize, usize),
    },

    /// Motion policy selector is not one of the known policies
    UnknownMotionPolicy {
        /// The selector as given
        selector: String,
    },

    /// Failed to save a generated image or animation to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical computation produced an invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl ShuffleError {
    /// Whether the error was raised by configuration validation, before any computation ran
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. }
                | Self::DimensionMismatch { .. }
                | Self::UnknownMotionPolicy { .. }
        )
    }
}

impl fmt::Display for ShuffleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::DimensionMismatch { skeleton, filler } => {
                write!(
                    f,
                    "Filler is {}x{} but skeleton is {}x{}",
                    filler.0, filler.1, skeleton.0, skeleton.1
                )
            }
            Self::UnknownMotionPolicy { selector } => {
                write!(
                    f,
                    "Unknown motion policy '{selector}' (expected still, prop, dissolve or fixed)"
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for ShuffleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for pipeline results
pub type Result<T> = std::result::Result<T, ShuffleError>;

impl From<image::ImageError> for ShuffleError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for ShuffleError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ShuffleError {
    ShuffleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> ShuffleError {
    ShuffleError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

