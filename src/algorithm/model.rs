//! Model construction, per-partition analysis, and composited synthesis

use crate::algorithm::checklist::VisitChecklist;
use crate::algorithm::sampler::WeightedSampler;
use crate::algorithm::synthesizer::{PartitionSynthesizer, SynthesisReport};
use crate::analysis::histogram::AdjacencyHistogram;
use crate::analysis::weights::WeightTable;
use crate::io::configuration::{FALLBACK_COLOR, MAX_SOURCE_DIMENSION};
use crate::io::error::{Result, SynthesisError, dimension_error};
use crate::spatial::buffer::PixelBuffer;
use crate::spatial::partition::{PartitionGrid, Rect};

/// One rectangular sub-region of the source, analyzed and synthesized
/// independently
///
/// Created once per subdivision cell at model build time and never resized.
/// Analysis fills the weight table; synthesis writes the output buffer and
/// flips checklist entries to visited.
#[derive(Debug)]
pub struct Partition {
    /// Source-relative region this partition covers
    pub region: Rect,
    /// Copied source pixels, translated to a local (0, 0) origin
    pub pixels: PixelBuffer,
    /// Directional adjacency weights accumulated over the region
    pub weights: WeightTable,
    /// Visitation state for synthesis writes
    pub checklist: VisitChecklist,
    /// Synthesized output, same dimensions as the region
    pub output: PixelBuffer,
    /// Write counters from the last synthesis pass, if any
    pub report: Option<SynthesisReport>,
}

impl Partition {
    /// Create an unanalyzed partition over a copied source region
    pub fn new(region: Rect, pixels: PixelBuffer) -> Self {
        let width = region.width();
        let height = region.height();
        Self {
            region,
            pixels,
            weights: WeightTable::new(),
            checklist: VisitChecklist::new(width, height),
            output: PixelBuffer::new(width, height),
            report: None,
        }
    }

    /// Accumulate adjacency statistics over every cell of the region
    ///
    /// Edge cells see only neighbors within this partition's own copied
    /// pixels; adjacency never crosses partition boundaries.
    pub fn analyze(&mut self) {
        let width = self.pixels.width() as i32;
        let height = self.pixels.height() as i32;
        for y in 0..height {
            for x in 0..width {
                let histogram = AdjacencyHistogram::analyze(&self.pixels, [x, y]);
                self.weights.accumulate(&histogram);
            }
        }
    }

    /// Populate the output buffer from this partition's own weight table
    ///
    /// # Errors
    ///
    /// Returns a degenerate weights error when the table cannot be sampled.
    pub fn synthesize(&mut self, sampler: &mut WeightedSampler) -> Result<SynthesisReport> {
        let synthesizer = PartitionSynthesizer::new(&self.weights);
        let report = synthesizer.run(&mut self.output, &mut self.checklist, sampler)?;
        self.report = Some(report);
        Ok(report)
    }
}

/// Top-level aggregate of one synthesis run
///
/// Holds the source buffer, the ordered partitions covering it without gaps
/// or overlap, the merged model-wide weight table, and the composited output.
/// Once synthesized and composited the model is read-only until discarded.
#[derive(Debug)]
pub struct Model {
    /// Identifier assigned by the building aggregator
    pub id: u64,
    /// Caller-supplied model name
    pub name: String,
    /// Source pixel data the statistics were learned from
    pub source: PixelBuffer,
    /// Subdivision counts as [columns, rows]
    pub subdivisions: [usize; 2],
    /// Partitions in row-major order
    pub partitions: Vec<Partition>,
    /// Model-wide weight table merged from all partitions
    ///
    /// Informational and inspectable; synthesis samples from the
    /// per-partition tables.
    pub weights: WeightTable,
    /// Final composited output, same dimensions as the source
    pub output: PixelBuffer,
}

impl Model {
    /// Number of partitions in the model
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// Write every partition's output into the composited buffer
    ///
    /// Each partition lands at its source-relative offset, overwriting
    /// whatever was there.
    pub fn composite(&mut self) {
        for partition in &self.partitions {
            partition
                .output
                .composite_into(&mut self.output, partition.region.min);
        }
    }

    /// Aggregate write counters across all synthesized partitions
    pub fn synthesis_report(&self) -> SynthesisReport {
        let mut combined = SynthesisReport::default();
        for partition in &self.partitions {
            if let Some(report) = partition.report {
                combined.absorb(report);
            }
        }
        combined
    }

    /// Share of output positions resolved by propagation, in percent
    pub fn variance_percentage(&self) -> f64 {
        self.synthesis_report().variance_percentage()
    }
}

/// Builds models from source buffers and drives per-partition synthesis
///
/// Owns the run seed and a monotonically increasing model identifier
/// counter; neither is process-wide state.
pub struct ModelAggregator {
    seed: u64,
    next_model_id: u64,
}

impl ModelAggregator {
    /// Create an aggregator for one run seed
    pub const fn new(seed: u64) -> Self {
        Self {
            seed,
            next_model_id: 1,
        }
    }

    /// Partition and analyze a source buffer into a new model
    ///
    /// Splits the source into `columns` x `rows` equal-size regions, copies
    /// each region, accumulates its adjacency statistics, and merges the
    /// partition tables into the model-wide table.
    ///
    /// # Errors
    ///
    /// Returns a dimension error when a source dimension is zero or exceeds
    /// the configured maximum, or when the subdivision counts do not evenly
    /// divide the source dimensions.
    pub fn build(
        &mut self,
        name: &str,
        source: PixelBuffer,
        columns: usize,
        rows: usize,
    ) -> Result<Model> {
        if source.width() > MAX_SOURCE_DIMENSION || source.height() > MAX_SOURCE_DIMENSION {
            return Err(dimension_error(
                "source",
                &format!("{}x{}", source.width(), source.height()),
                &format!("source dimensions exceed the maximum of {MAX_SOURCE_DIMENSION}"),
            ));
        }

        let grid = PartitionGrid::new(source.width(), source.height(), columns, rows)?;

        let mut weights = WeightTable::new();
        let mut partitions = Vec::with_capacity(grid.len());
        for &region in grid.regions() {
            let mut partition = Partition::new(region, source.copy_region(region));
            partition.analyze();
            weights.merge(&partition.weights);
            partitions.push(partition);
        }

        let output = PixelBuffer::new(source.width(), source.height());
        let id = self.next_model_id;
        self.next_model_id += 1;

        Ok(Model {
            id,
            name: name.to_string(),
            source,
            subdivisions: [columns, rows],
            partitions,
            weights,
            output,
        })
    }

    /// Synthesize one partition with its own deterministically seeded sampler
    ///
    /// The sampler seed derives from the run seed plus the partition index,
    /// so partitions stay reproducible even if synthesized out of order or
    /// on independent tasks.
    ///
    /// A partition whose weight table cannot be sampled is flooded with the
    /// fallback color and its checklist completed; sibling partitions are
    /// unaffected. This is the documented recovery policy for degenerate
    /// statistics.
    ///
    /// # Errors
    ///
    /// Returns a dimension error when `index` is out of range.
    pub fn synthesize_partition(&self, model: &mut Model, index: usize) -> Result<()> {
        let partition_count = model.partition_count();
        let Some(partition) = model.partitions.get_mut(index) else {
            return Err(dimension_error(
                "partition",
                &index,
                &format!("model has {partition_count} partitions"),
            ));
        };

        let mut sampler = WeightedSampler::new(self.seed.wrapping_add(index as u64));
        match partition.synthesize(&mut sampler) {
            Ok(_) => Ok(()),
            Err(SynthesisError::DegenerateWeights { .. }) => {
                partition.output.fill(FALLBACK_COLOR);
                partition.checklist.mark_all();
                partition.report = None;
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// Synthesize every partition and composite the final output
    ///
    /// Partitions share no mutable state during synthesis; compositing runs
    /// as one aggregation pass after all partitions finish.
    ///
    /// # Errors
    ///
    /// Propagates any non-degenerate partition synthesis error.
    pub fn synthesize(&self, model: &mut Model) -> Result<()> {
        for index in 0..model.partition_count() {
            self.synthesize_partition(model, index)?;
        }
        model.composite();
        Ok(())
    }
}
