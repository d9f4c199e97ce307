//! Command-line parsing for the white-dwarf cooling-grid builder.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the numerical code.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{Atmosphere, OpacityModel};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "wdgrid",
    version,
    about = "Regularize white-dwarf cooling tracks onto a (mass, age) grid"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the luminosity and temperature grids for one grid directory.
    Build(BuildArgs),
    /// Build every grid directory under a root; failures do not stop the batch.
    Batch(BatchArgs),
    /// Print the target axes used for a given real-mass count.
    Axes(AxesArgs),
    /// Re-emit literal arrays from a grid JSON export.
    Render(RenderArgs),
}

/// Output options shared by `build` and `batch`.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Write `<grid>.lum.txt` and `<grid>.teff.txt` into this directory instead of stdout.
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Print a coverage summary for each grid.
    #[arg(long)]
    pub summary: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct BuildArgs {
    /// Directory holding the raw track tables of one grid.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Opacity model (overrides the directory name; requires all three overrides).
    #[arg(long, value_enum)]
    pub opacity: Option<OpacityModel>,

    /// Atmosphere composition (overrides the directory name).
    #[arg(long, value_enum)]
    pub atmosphere: Option<Atmosphere>,

    /// Metallicity Z (overrides the directory name).
    #[arg(long)]
    pub metallicity: Option<f64>,

    /// Export the full grid (axes + both quantities) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Parser, Clone)]
pub struct BatchArgs {
    /// Root directory whose subdirectories are grids.
    ///
    /// Defaults to `$WDGRID_DATA_DIR`, then `tracks/Data/basti-grids`.
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Worker threads (defaults to the number of CPUs).
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Parser, Clone)]
pub struct AxesArgs {
    /// Number of distinct real masses in the grid.
    #[arg(long, value_name = "N")]
    pub masses: usize,
}

#[derive(Debug, Parser, Clone)]
pub struct RenderArgs {
    /// Grid JSON file produced by `wdgrid build --export-json`.
    #[arg(value_name = "JSON")]
    pub grid: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_build_with_overrides() {
        let cli = Cli::try_parse_from([
            "wdgrid",
            "build",
            "grids/custom",
            "--opacity",
            "cassisi07",
            "--atmosphere",
            "He",
            "--metallicity",
            "0.01",
            "--out-dir",
            "out",
        ])
        .unwrap();
        match cli.command {
            Command::Build(args) => {
                assert_eq!(args.opacity, Some(OpacityModel::Cassisi07));
                assert_eq!(args.atmosphere, Some(Atmosphere::Helium));
                assert_eq!(args.metallicity, Some(0.01));
                assert_eq!(args.output.out_dir, Some(PathBuf::from("out")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_batch_defaults() {
        let cli = Cli::try_parse_from(["wdgrid", "-vv", "batch"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Batch(args) => {
                assert!(args.root.is_none());
                assert!(args.jobs.is_none());
                assert!(!args.output.summary);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
