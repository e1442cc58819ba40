//! Input/output operations and error handling

/// Command-line interface for batch processing
pub mod cli;
/// Runtime defaults and policy constants
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Image decode/encode collaborators
pub mod image;
/// Batch progress display
pub mod progress;
