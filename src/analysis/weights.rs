//! Aggregated color weight tables driving weighted sampling

use crate::analysis::histogram::AdjacencyHistogram;
use crate::spatial::buffer::Color;
use crate::spatial::direction::{COMPASS, Direction};
use std::collections::BTreeMap;

/// Accumulated sampling weight for one color
///
/// Invariant: the total always equals the sum of the directional entries,
/// and no entry is ever negative.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorWeights {
    total: f64,
    directional: [f64; 8],
}

impl ColorWeights {
    /// Total accumulated weight across all directions
    pub const fn total(&self) -> f64 {
        self.total
    }

    /// Accumulated weight for one direction, 0 for the neutral direction
    pub fn directional(&self, direction: Direction) -> f64 {
        let Some(index) = direction.index() else {
            return 0.0;
        };
        self.directional.get(index).copied().unwrap_or(0.0)
    }

    /// Sum of the per-direction weights
    pub fn directional_sum(&self) -> f64 {
        self.directional.iter().sum()
    }

    fn add(&mut self, index: usize, weight: f64) {
        if let Some(slot) = self.directional.get_mut(index) {
            *slot += weight;
            self.total += weight;
        }
    }

    fn merge(&mut self, other: &Self) {
        for (slot, value) in self.directional.iter_mut().zip(other.directional.iter()) {
            *slot += value;
        }
        self.total += other.total;
    }
}

/// Aggregated mapping from color to directional sampling weights
///
/// Built by summing [`AdjacencyHistogram`] observations cell by cell over a
/// region, then merged partition-wise into a model-wide table. Aggregation is
/// pointwise addition over the union of color keys, so merging is associative
/// and commutative. Colors are kept in a sorted map, giving the table a fixed
/// enumeration order that samplers rely on for reproducibility.
#[derive(Clone, Debug, Default)]
pub struct WeightTable {
    weights: BTreeMap<Color, ColorWeights>,
}

impl WeightTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add weight for a (color, direction) pair
    ///
    /// Zero, negative, and neutral-direction contributions are ignored so
    /// the non-negativity invariant holds by construction.
    pub fn add_weight(&mut self, color: Color, direction: Direction, weight: f64) {
        let Some(index) = direction.index() else {
            return;
        };
        if weight <= 0.0 {
            return;
        }
        self.weights.entry(color).or_default().add(index, weight);
    }

    /// Fold one cell histogram into the table
    pub fn accumulate(&mut self, histogram: &AdjacencyHistogram) {
        for (&color, counts) in histogram.entries() {
            for (direction, &count) in COMPASS.iter().zip(counts.iter()) {
                if count > 0 {
                    self.add_weight(color, *direction, f64::from(count));
                }
            }
        }
    }

    /// Pointwise addition of another table into this one
    pub fn merge(&mut self, other: &Self) {
        for (&color, weights) in &other.weights {
            self.weights.entry(color).or_default().merge(weights);
        }
    }

    /// Total accumulated weight for a color, 0 for unseen colors
    pub fn total_weight(&self, color: Color) -> f64 {
        self.weights.get(&color).map_or(0.0, ColorWeights::total)
    }

    /// Directional weight for a (color, direction) pair, 0 when unseen
    pub fn directional_weight(&self, color: Color, direction: Direction) -> f64 {
        self.weights
            .get(&color)
            .map_or(0.0, |weights| weights.directional(direction))
    }

    /// Sum of total weights over every color in the table
    pub fn cumulative_total(&self) -> f64 {
        self.weights.values().map(ColorWeights::total).sum()
    }

    /// Table entries in the fixed color enumeration order
    pub fn entries(&self) -> impl Iterator<Item = (&Color, &ColorWeights)> {
        self.weights.iter()
    }

    /// Number of distinct colors in the table
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Test if the table holds no colors
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
