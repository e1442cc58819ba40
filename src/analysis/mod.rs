//! Analysis modules for adjacency statistics extraction and aggregation

/// Per-cell directional adjacency histograms
pub mod histogram;
/// Aggregated color weight tables
pub mod weights;
