//! Per-cell directional adjacency analysis

use crate::spatial::buffer::{Color, PixelBuffer};
use crate::spatial::direction::{COMPASS, Direction};
use std::collections::BTreeMap;

/// Occurrence counts of neighboring colors around one analyzed position
///
/// Maps each observed neighbor color to per-direction counts. A direction
/// entry exists only when that (color, direction) pair was actually observed,
/// so every recorded count is at least 1.
///
/// The histogram reflects only the analyzed position's surroundings, not a
/// joint distribution keyed by the center color. The table records which
/// colors appear near the analyzed pixel, not which colors appear near this
/// specific center color, so synthesis can reproduce aggregate frequency but
/// not true spatial coherence. This is the algorithm's accuracy ceiling and
/// is preserved as such.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyHistogram {
    counts: BTreeMap<Color, [u32; 8]>,
}

impl AdjacencyHistogram {
    /// Create an empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the eight neighbors of `position` in `buffer`
    ///
    /// A neighbor is skipped when either of its coordinates is negative, or
    /// when it falls outside the buffer bounds. Both checks are applied: the
    /// negative-coordinate rejection runs before the containment test so that
    /// offset arithmetic at the origin can never wrap into a valid cell.
    pub fn analyze(buffer: &PixelBuffer, position: [i32; 2]) -> Self {
        let mut histogram = Self::new();
        for direction in COMPASS {
            let neighbor = direction.step(position);
            if neighbor[0] < 0 || neighbor[1] < 0 {
                continue;
            }
            if !buffer.contains(neighbor) {
                continue;
            }
            histogram.record(buffer.get(neighbor), direction);
        }
        histogram
    }

    /// Record one observation of `color` in `direction`
    ///
    /// The count starts at 1 on first observation. Observations in the
    /// neutral direction are ignored.
    pub fn record(&mut self, color: Color, direction: Direction) {
        let Some(index) = direction.index() else {
            return;
        };
        let counts = self.counts.entry(color).or_insert([0; 8]);
        if let Some(slot) = counts.get_mut(index) {
            *slot += 1;
        }
    }

    /// Observation count for a (color, direction) pair, 0 when unobserved
    pub fn count(&self, color: Color, direction: Direction) -> u32 {
        let Some(index) = direction.index() else {
            return 0;
        };
        self.counts
            .get(&color)
            .and_then(|counts| counts.get(index))
            .copied()
            .unwrap_or(0)
    }

    /// Test if no observations were recorded
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct neighbor colors observed
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Observed colors with their per-direction counts, in color order
    ///
    /// Count arrays are indexed by [`Direction::index`].
    pub fn entries(&self) -> impl Iterator<Item = (&Color, &[u32; 8])> {
        self.counts.iter()
    }
}
