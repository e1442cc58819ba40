//! Propagating weighted synthesis of a partition's output buffer

use crate::algorithm::checklist::VisitChecklist;
use crate::algorithm::sampler::WeightedSampler;
use crate::analysis::weights::WeightTable;
use crate::io::error::Result;
use crate::spatial::buffer::PixelBuffer;
use crate::spatial::direction::COMPASS;

/// Write counters from one partition synthesis pass
#[derive(Clone, Copy, Debug, Default)]
pub struct SynthesisReport {
    /// Positions resolved by the primary row-major scan
    pub primary_writes: usize,
    /// Positions pre-resolved by neighbor propagation
    pub propagated_writes: usize,
}

impl SynthesisReport {
    /// Total number of resolved positions
    pub const fn resolved(&self) -> usize {
        self.primary_writes + self.propagated_writes
    }

    /// Share of positions resolved by propagation, in percent
    ///
    /// Diagnostic only; correctness never depends on this value.
    pub const fn variance_percentage(&self) -> f64 {
        let resolved = self.resolved();
        if resolved == 0 {
            return 0.0;
        }
        (self.propagated_writes as f64 / resolved as f64) * 100.0
    }

    /// Fold another report's counters into this one
    pub const fn absorb(&mut self, other: Self) {
        self.primary_writes += other.primary_writes;
        self.propagated_writes += other.propagated_writes;
    }
}

/// Populates an output buffer by propagating weighted sampling
///
/// Every cell moves from unvisited to written exactly once, either through
/// the primary scan or through a propagation write triggered by a neighbor.
/// Propagation is a one-shot plausibility hint rather than an enforced
/// constraint: there is no backtracking and no contradiction state, so the
/// output may contain direction mismatches. That is expected and is never
/// an error.
pub struct PartitionSynthesizer<'a> {
    table: &'a WeightTable,
}

impl<'a> PartitionSynthesizer<'a> {
    /// Create a synthesizer over a partition's weight table
    pub const fn new(table: &'a WeightTable) -> Self {
        Self { table }
    }

    /// Run the generation pass over `output`
    ///
    /// Scans positions in row-major order, skipping any already written.
    /// An unvisited position receives a sampled color and is marked
    /// written; then each in-bounds, unvisited neighbor draws a second
    /// independent sample, which is written to the neighbor only when the
    /// sampled color's statistics carry a nonzero weight for that
    /// direction. The scan terminates once every position has been visited
    /// by one of the two paths.
    ///
    /// # Errors
    ///
    /// Returns a degenerate weights error when the table cannot be sampled;
    /// the caller decides the fallback policy.
    pub fn run(
        &self,
        output: &mut PixelBuffer,
        checklist: &mut VisitChecklist,
        sampler: &mut WeightedSampler,
    ) -> Result<SynthesisReport> {
        let width = output.width() as i32;
        let height = output.height() as i32;
        let mut report = SynthesisReport::default();

        for y in 0..height {
            for x in 0..width {
                let position = [x, y];
                if checklist.is_visited(position) {
                    continue;
                }

                let color = sampler.sample(self.table)?;
                output.set(position, color);
                checklist.mark(position);
                report.primary_writes += 1;

                for direction in COMPASS {
                    let neighbor = direction.step(position);
                    if !output.contains(neighbor) {
                        continue;
                    }
                    if checklist.is_visited(neighbor) {
                        continue;
                    }

                    let candidate = sampler.sample(self.table)?;
                    if self.table.directional_weight(candidate, direction) > 0.0 {
                        output.set(neighbor, candidate);
                        checklist.mark(neighbor);
                        report.propagated_writes += 1;
                    }
                }
            }
        }

        Ok(report)
    }
}
