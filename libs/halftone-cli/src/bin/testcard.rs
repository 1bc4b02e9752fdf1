//! Writes the grey-bar calibration card, `testcard.png` by default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use halftone_cli::init_logging;
use halftone_image::{testcard, TestCardParams};

/// Render a calibration test card.
#[derive(Parser)]
#[command(name = "testcard", version, about, long_about = None)]
struct Cli {
    /// Output image; format follows the extension
    #[arg(default_value = "testcard.png")]
    output: PathBuf,
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    testcard::save(&TestCardParams::default(), &cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))
}
