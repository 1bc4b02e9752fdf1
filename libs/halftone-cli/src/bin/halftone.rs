//! Converts an image into `<stem>-mask.stl` and `<stem>-subs.stl`.

use anyhow::Result;
use clap::Parser;
use halftone_cli::{init_logging, run, Args, Outcome};
use tracing::info;

fn main() -> Result<()> {
    init_logging()?;
    let args = Args::parse();

    match run(&args)? {
        Outcome::Shown(report) => {
            println!("{}", report.halftone);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Outcome::Written { mask, substrate } => {
            info!(mask = %mask.display(), substrate = %substrate.display(), "done");
        }
    }
    Ok(())
}
