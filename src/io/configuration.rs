//! Runtime defaults and policy constants

use crate::spatial::buffer::Color;

/// Fixed seed for reproducible synthesis
pub const DEFAULT_SEED: u64 = 42;

/// Default number of partition columns and rows
pub const DEFAULT_SUBDIVISIONS: usize = 8;

/// Color substituted for a partition whose weight table cannot be sampled
pub const FALLBACK_COLOR: Color = Color::TRANSPARENT;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed source dimension in pixels
pub const MAX_SOURCE_DIMENSION: usize = 10_000;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_woven";
