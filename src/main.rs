//! CLI entry point for the patch-based texture resynthesis tool

use clap::Parser;
use patchloom::io::cli::{Cli, FileProcessor};

fn main() -> patchloom::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
