//! Error types for analysis, synthesis, and image I/O operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all synthesis operations
#[derive(Debug)]
pub enum SynthesisError {
    /// Failed to load a source image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a composited image to disk
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

    /// Buffer dimensions or subdivision counts failed validation
    ///
    /// Raised before partitioning so that uneven subdivisions are reported
    /// rather than silently truncated.
    Dimension {
        /// Name of the offending parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Sampling was attempted against an empty or all-zero weight table
    ///
    /// Recoverable by the caller through a fallback color policy; must never
    /// decay into undefined numeric behavior.
    DegenerateWeights {
        /// Operation that requested the sample
        context: &'static str,
    },
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
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
            Self::Dimension {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid dimension '{parameter}' = '{value}': {reason}")
            }
            Self::DegenerateWeights { context } => {
                write!(
                    f,
                    "Degenerate weight table during {context}: no color carries a positive weight"
                )
            }
        }
    }
}

impl std::error::Error for SynthesisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for synthesis results
pub type Result<T> = std::result::Result<T, SynthesisError>;

impl From<image::ImageError> for SynthesisError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for SynthesisError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create a dimension validation error
pub fn dimension_error(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SynthesisError {
    SynthesisError::Dimension {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a degenerate weight table error
pub const fn degenerate_weights(context: &'static str) -> SynthesisError {
    SynthesisError::DegenerateWeights { context }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_error_message() {
        let error = dimension_error("columns", &3, &"source width 16 is not divisible by 3");
        let message = error.to_string();
        assert!(message.contains("columns"));
        assert!(message.contains("not divisible"));
    }

    #[test]
    fn test_degenerate_weights_reports_context() {
        let error = degenerate_weights("weighted color sample");
        match error {
            SynthesisError::DegenerateWeights { context } => {
                assert_eq!(context, "weighted color sample");
            }
            _ => unreachable!("Expected DegenerateWeights error type"),
        }
    }
}
