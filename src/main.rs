//! CLI entry point for the block shuffling tool

use clap::Parser;
use pixelshuffle::io::cli::{Cli, ShuffleProcessor};

fn main() -> pixelshuffle::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut processor = ShuffleProcessor::new(cli);
    processor.process()?;
    Ok(())
}
