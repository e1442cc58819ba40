//! Seeded weighted random color selection over weight tables

use crate::analysis::weights::WeightTable;
use crate::io::error::{Result, degenerate_weights};
use crate::spatial::buffer::Color;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector drawing colors proportional to table weight
///
/// Each sampler owns its random source. Sequential runs share one sampler;
/// parallel partition runs each get a sampler seeded from the run seed plus
/// the partition index, keeping results reproducible without a shared
/// global generator.
pub struct WeightedSampler {
    rng: StdRng,
}

impl WeightedSampler {
    /// Create a deterministic sampler from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw a color with probability proportional to its total weight
    ///
    /// Builds a cumulative distribution over the table's entries in their
    /// fixed enumeration order and scans for the first color whose
    /// cumulative boundary exceeds a uniform draw in [0, total).
    ///
    /// Reproducibility guarantee: the enumeration order is the sorted order
    /// of color values, so a fixed seed always yields the same sequence of
    /// draws against the same table.
    ///
    /// # Errors
    ///
    /// Returns a degenerate weights error when the table is empty or every
    /// weight is zero; sampling then has no valid outcome.
    pub fn sample(&mut self, table: &WeightTable) -> Result<Color> {
        let total = table.cumulative_total();
        if table.is_empty() || total <= 0.0 {
            return Err(degenerate_weights("weighted color sample"));
        }

        let draw = self.rng.random::<f64>() * total;
        let mut cumulative = 0.0;
        let mut last = None;
        for (&color, weights) in table.entries() {
            cumulative += weights.total();
            last = Some(color);
            if draw < cumulative {
                return Ok(color);
            }
        }

        // Accumulated rounding can leave the draw at the upper boundary
        last.ok_or_else(|| degenerate_weights("weighted color sample"))
    }
}
