//! Patch-based procedural texture synthesis from directional color-adjacency statistics
//!
//! The system partitions a source image into rectangular regions, learns
//! which colors appear in which of the eight compass directions within each
//! region, and resynthesizes every region by weighted random sampling guided
//! by those statistics before compositing the results into one output image.

#![forbid(unsafe_code)]

/// Weighted sampling, visitation tracking, and the propagating synthesis pass
pub mod algorithm;
/// Adjacency statistics extraction and weight table aggregation
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Pixel buffers, directions, and source partitioning
pub mod spatial;

pub use io::error::{Result, SynthesisError};
