//! # Halftone CLI
//!
//! Argument parsing, logging and orchestration behind the `halftone` and
//! `testcard` binaries.
//!
//! ```text
//! image file → prepare → IntensityField → build_relief → encode both → write both
//! ```
//!
//! Nothing is written unless both meshes validate and encode.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use config::constants::{
    DEFAULT_HALFTONE_HEIGHT, DEFAULT_SCALE, DEFAULT_SIDES, DEFAULT_SUBSTRATE_HEIGHT, MAX_SIDES,
    MIN_SIDES,
    SCREEN_ANGLE_DEGREES,
};
use halftone_image::ImageParams;
use halftone_mesh::{build_relief, HalftoneParams, MeshReport, ReliefParams, ScreenAngle};
use serde::Serialize;
use tracing::info;

/// Initialise logging to stderr.
///
/// `RUST_LOG` is honoured; `info` is always enabled.
pub fn init_logging() -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()?;

    Ok(())
}

/// Turn an image into a printable halftone relief.
#[derive(Debug, Clone, Parser)]
#[command(name = "halftone")]
#[command(about = "Convert an image into halftone relief STL files", long_about = None)]
#[command(version)]
pub struct Args {
    /// Input image
    #[arg(name = "IMAGE")]
    pub image: PathBuf,

    /// Height of the base plate
    #[arg(long, default_value_t = DEFAULT_SUBSTRATE_HEIGHT)]
    pub substrate_height: f64,

    /// Height of every dot
    #[arg(long, default_value_t = DEFAULT_HALFTONE_HEIGHT)]
    pub halftone_height: f64,

    /// Downscale divisor applied to the image
    #[arg(long, default_value_t = DEFAULT_SCALE, value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: u32,

    /// Lateral subdivisions per dot
    #[arg(long, default_value_t = DEFAULT_SIDES, value_parser = clap::value_parser!(u32).range(i64::from(MIN_SIDES)..=i64::from(MAX_SIDES)))]
    pub sides: u32,

    /// Screen angle in degrees
    #[arg(long, default_value_t = SCREEN_ANGLE_DEGREES, allow_negative_numbers = true)]
    pub screen_angle: f64,

    /// Stamp dots in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Print the validation report and parameters instead of writing files
    #[arg(long, overrides_with = "no_show")]
    pub show: bool,

    /// Write the STL files (default)
    #[arg(long, overrides_with = "show")]
    pub no_show: bool,
}

impl Args {
    /// Mesh parameters from the flags.
    pub fn relief_params(&self) -> ReliefParams {
        ReliefParams {
            substrate_height: self.substrate_height,
            halftone: HalftoneParams {
                dot_height: self.halftone_height,
                sides: self.sides,
                parallel: self.parallel,
                screen: self.screen(),
                ..HalftoneParams::default()
            },
        }
    }

    /// Image parameters from the flags.
    pub fn image_params(&self) -> ImageParams {
        ImageParams {
            scale: self.scale,
            screen: self.screen(),
        }
    }

    fn screen(&self) -> ScreenAngle {
        ScreenAngle(self.screen_angle)
    }
}

/// What `--show` prints.
#[derive(Debug, Clone, Serialize)]
pub struct ShowReport {
    pub image: PathBuf,
    pub scale: u32,
    pub params: ReliefParams,
    pub halftone: MeshReport,
    pub substrate: MeshReport,
}

/// Result of a run.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// `--show`: nothing written
    Shown(ShowReport),
    /// Paths of the halftone and substrate files
    Written { mask: PathBuf, substrate: PathBuf },
}

/// Runs the whole conversion for parsed arguments.
pub fn run(args: &Args) -> Result<Outcome> {
    let field = halftone_image::prepare(&args.image, &args.image_params())
        .with_context(|| format!("failed to prepare {}", args.image.display()))?;
    info!(rows = field.rows(), cols = field.cols(), "image ready");

    let params = args.relief_params();
    let relief = build_relief(&field, &params).context("failed to build relief")?;

    if args.show {
        return Ok(Outcome::Shown(ShowReport {
            image: args.image.clone(),
            scale: args.scale,
            params,
            halftone: relief.halftone_report,
            substrate: relief.substrate_report,
        }));
    }

    let files = relief
        .encode(&stem(&args.image))
        .context("failed to encode STL")?;
    let (mask, substrate) = files.write(&args.image).context("failed to write STL")?;
    Ok(Outcome::Written { mask, substrate })
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("halftone"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["halftone", "cat.png"]).unwrap();
        assert_eq!(args.scale, 4);
        assert_eq!(args.relief_params(), ReliefParams::default());
        assert_eq!(args.image_params(), ImageParams::default());
        assert!(!args.show);
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::try_parse_from([
            "halftone",
            "cat.png",
            "--substrate-height",
            "2.5",
            "--halftone-height",
            "0.4",
            "--scale",
            "2",
            "--screen-angle",
            "-15",
            "--parallel",
        ])
        .unwrap();
        let params = args.relief_params();
        assert_eq!(params.substrate_height, 2.5);
        assert_eq!(params.halftone.dot_height, 0.4);
        assert!(params.halftone.parallel);
        assert_eq!(params.halftone.screen, ScreenAngle(-15.0));
        assert_eq!(args.image_params().scale, 2);
    }

    #[test]
    fn test_last_show_flag_wins() {
        let args = Args::try_parse_from(["halftone", "a.png", "--show", "--no-show"]).unwrap();
        assert!(!args.show);
        let args = Args::try_parse_from(["halftone", "a.png", "--no-show", "--show"]).unwrap();
        assert!(args.show);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        assert!(Args::try_parse_from(["halftone", "a.png", "--scale", "0"]).is_err());
        assert!(Args::try_parse_from(["halftone", "a.png", "--sides", "2"]).is_err());
        assert!(Args::try_parse_from(["halftone", "a.png", "--sides", "4294967295"]).is_err());
        assert!(Args::try_parse_from(["halftone"]).is_err());
    }

    #[test]
    fn test_stem() {
        assert_eq!(stem(Path::new("dir/cat.png")), "cat");
    }
}
