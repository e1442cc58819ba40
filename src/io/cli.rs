//! Command-line interface for batch texture resynthesis of PNG files

use crate::algorithm::model::ModelAggregator;
use crate::io::configuration::{DEFAULT_SEED, DEFAULT_SUBDIVISIONS, OUTPUT_SUFFIX};
use crate::io::error::{Result, SynthesisError, dimension_error};
use crate::io::image::{fill_random, load_pixel_buffer, save_pixel_buffer};
use crate::io::progress::ProgressManager;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "patchloom")]
#[command(
    author,
    version,
    about = "Resynthesize textures from directional color-adjacency statistics"
)]
/// Command-line arguments for the texture resynthesis tool
pub struct Cli {
    /// Input PNG file or directory to process (output path with --sample)
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible synthesis
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of partition columns
    #[arg(short, long, default_value_t = DEFAULT_SUBDIVISIONS)]
    pub columns: usize,

    /// Number of partition rows
    #[arg(short, long, default_value_t = DEFAULT_SUBDIVISIONS)]
    pub rows: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Generate a random sample source of the given size at TARGET instead
    /// of processing an input
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub sample: Option<String>,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Parse a `WIDTHxHEIGHT` dimension specification
///
/// # Errors
///
/// Returns a dimension error when the specification is not two positive
/// integers separated by `x`.
pub fn parse_sample_dimensions(text: &str) -> Result<(usize, usize)> {
    let Some((width_text, height_text)) = text.split_once('x') else {
        return Err(dimension_error(
            "sample",
            &text,
            &"expected WIDTHxHEIGHT, e.g. 512x512",
        ));
    };
    let width: usize = width_text
        .trim()
        .parse()
        .map_err(|_e| dimension_error("sample", &text, &"width is not a positive integer"))?;
    let height: usize = height_text
        .trim()
        .parse()
        .map_err(|_e| dimension_error("sample", &text, &"height is not a positive integer"))?;
    Ok((width, height))
}

fn target_error(path: &Path, reason: &str) -> SynthesisError {
    SynthesisError::FileSystem {
        path: path.to_path_buf(),
        operation: "target validation",
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, reason.to_string()),
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    aggregator: ModelAggregator,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let aggregator = ModelAggregator::new(cli.seed);
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            aggregator,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, image I/O, or synthesis fails
    pub fn process(&mut self) -> Result<()> {
        if let Some(sample) = self.cli.sample.clone() {
            return self.generate_sample(&sample);
        }

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn generate_sample(&self, sample: &str) -> Result<()> {
        let (width, height) = parse_sample_dimensions(sample)?;
        let mut rng = StdRng::seed_from_u64(self.cli.seed);
        let buffer = fill_random(width, height, self.cli.columns, self.cli.rows, &mut rng)?;
        save_pixel_buffer(&buffer, &self.cli.target)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(target_error(
                    &self.cli.target,
                    "Target file must be a PNG image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(target_error(
                &self.cli.target,
                "Target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let output_path = Self::get_output_path(input_path);
        let name = input_path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let source = load_pixel_buffer(input_path)?;
        let mut model = self
            .aggregator
            .build(&name, source, self.cli.columns, self.cli.rows)?;

        if let Some(ref pm) = self.progress_manager {
            pm.start_file(index, input_path, model.partition_count());
        }

        for partition_index in 0..model.partition_count() {
            self.aggregator.synthesize_partition(&mut model, partition_index)?;
            if let Some(ref pm) = self.progress_manager {
                pm.update_partition(index, partition_index + 1);
            }
        }
        model.composite();

        save_pixel_buffer(&model.output, &output_path)?;

        if let Some(ref pm) = self.progress_manager {
            pm.complete_file(index);
        }

        Ok(())
    }

    fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
