//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - resolves grid descriptors and data directories
//! - runs the grid pipeline (one grid, or a parallel batch)
//! - prints literal arrays/reports or writes them to files

use std::path::{Path, PathBuf};

use clap::Parser;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::cli::{AxesArgs, BatchArgs, BuildArgs, Command, RenderArgs};
use crate::domain::{BuildConfig, GridDescriptor, Quantity};
use crate::error::AppError;
use crate::grid::TargetGrid;
use crate::io::{literal, naming};
use crate::report::BatchOutcome;

pub mod pipeline;

use pipeline::{GridOutput, RenderedGrid};

/// Environment variable naming the batch root directory.
pub const DATA_DIR_ENV: &str = "WDGRID_DATA_DIR";

/// Batch root when neither an argument nor the environment names one.
pub const DEFAULT_DATA_DIR: &str = "tracks/Data/basti-grids";

/// Entry point for the `wdgrid` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Build(args) => handle_build(args),
        Command::Batch(args) => handle_batch(args),
        Command::Axes(args) => handle_axes(args),
        Command::Render(args) => handle_render(args),
    }
}

/// Logs go to stderr; stdout carries literal arrays and reports.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_build(args: BuildArgs) -> Result<(), AppError> {
    let descriptor = descriptor_from_args(&args)?;
    let config = BuildConfig {
        out_dir: args.output.out_dir.clone(),
        export_json: args.export_json.clone(),
        summary: args.output.summary,
    };

    let output = pipeline::build_grid(&args.dir, descriptor)?;
    let rendered = output.render()?;
    emit_grid(&output, &rendered, &grid_name(&args.dir), &config)?;

    if let Some(path) = &config.export_json {
        crate::io::export::write_grid_json(path, &output.to_file())?;
    }

    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let root = batch_root(args.root.as_deref());
    let config = BuildConfig {
        out_dir: args.output.out_dir.clone(),
        export_json: None,
        summary: args.output.summary,
    };

    let dirs = grid_dirs(&root)?;
    if dirs.is_empty() {
        return Err(AppError::new(2, format!("No grid directories under '{}'", root.display())));
    }
    tracing::info!(root = %root.display(), grids = dirs.len(), "starting batch");

    let outcomes = match args.jobs {
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(|e| AppError::new(2, format!("Failed to start worker pool: {e}")))?
            .install(|| run_batch(&dirs, &config)),
        None => run_batch(&dirs, &config),
    };

    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    if config.summary || failed > 0 {
        eprint!("{}", crate::report::format_batch_summary(&outcomes));
    }
    if failed > 0 {
        return Err(AppError::new(1, format!("{failed} of {} grids failed", outcomes.len())));
    }
    Ok(())
}

/// Build every grid directory in parallel and emit them in `dirs` order.
///
/// A failing grid is logged and recorded in its outcome; the others are
/// built and emitted regardless.
pub fn run_batch(dirs: &[PathBuf], config: &BuildConfig) -> Vec<BatchOutcome> {
    let results: Vec<Result<(GridOutput, RenderedGrid), AppError>> =
        dirs.par_iter().map(|dir| build_one(dir)).collect();

    // Emission is sequential so output follows directory-name order.
    let mut outcomes = Vec::with_capacity(dirs.len());
    for (dir, result) in dirs.iter().zip(results) {
        let name = grid_name(dir);
        let emitted = result.and_then(|(output, rendered)| emit_grid(&output, &rendered, &name, config));
        if let Err(err) = &emitted {
            tracing::error!(grid = %name, "{err}");
        }
        outcomes.push(BatchOutcome {
            name,
            error: emitted.err().map(|e| e.to_string()),
        });
    }
    outcomes
}

fn handle_axes(args: AxesArgs) -> Result<(), AppError> {
    let target = TargetGrid::for_mass_count(args.masses)?;
    print!("{}", crate::report::format_target(&target));
    Ok(())
}

fn handle_render(args: RenderArgs) -> Result<(), AppError> {
    let file = crate::io::export::read_grid_json(&args.grid)?;
    let rendered = RenderedGrid {
        luminosity: literal::render_rows(&file.grid(Quantity::Luminosity)?),
        temperature: literal::render_rows(&file.grid(Quantity::Temperature)?),
    };
    print!("{}", crate::report::format_literal_sections(Some(&file.descriptor), &rendered));
    Ok(())
}

/// One batch task: name -> descriptor -> grid -> rendered literals.
fn build_one(dir: &Path) -> Result<(GridOutput, RenderedGrid), AppError> {
    let descriptor = naming::parse_grid_name(&grid_name(dir))?;
    let output = pipeline::build_grid(dir, descriptor)?;
    let rendered = output.render()?;
    Ok((output, rendered))
}

/// Print or write one grid that has already been rendered in full.
fn emit_grid(output: &GridOutput, rendered: &RenderedGrid, name: &str, config: &BuildConfig) -> Result<(), AppError> {
    if config.summary {
        eprintln!("{}", crate::report::format_grid_summary(output));
    }

    match &config.out_dir {
        Some(out_dir) => {
            std::fs::create_dir_all(out_dir).map_err(|e| {
                AppError::new(2, format!("Failed to create output directory '{}': {e}", out_dir.display()))
            })?;
            let files: Vec<(PathBuf, &str)> = Quantity::ALL
                .into_iter()
                .map(|quantity| {
                    let text = match quantity {
                        Quantity::Luminosity => rendered.luminosity.as_str(),
                        Quantity::Temperature => rendered.temperature.as_str(),
                    };
                    (out_dir.join(format!("{name}.{}.txt", quantity.file_tag())), text)
                })
                .collect();
            literal::write_literal_set(&files)?;
            tracing::debug!(grid = %name, dir = %out_dir.display(), "wrote literals");
        }
        None => {
            print!(
                "{}",
                crate::report::format_literal_sections(Some(&output.descriptor), rendered)
            );
        }
    }

    Ok(())
}

/// Descriptor from the override flags, or from the directory name.
pub fn descriptor_from_args(args: &BuildArgs) -> Result<GridDescriptor, AppError> {
    match (args.opacity, args.atmosphere, args.metallicity) {
        (Some(opacity_model), Some(atmosphere), Some(metallicity)) => Ok(GridDescriptor {
            opacity_model,
            atmosphere,
            metallicity,
        }),
        (None, None, None) => Ok(naming::parse_grid_name(&grid_name(&args.dir))?),
        _ => Err(AppError::new(
            2,
            "--opacity, --atmosphere and --metallicity must be given together",
        )),
    }
}

/// Batch root: argument, then `$WDGRID_DATA_DIR`, then the default.
pub fn batch_root(arg: Option<&Path>) -> PathBuf {
    if let Some(root) = arg {
        return root.to_path_buf();
    }
    match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_DATA_DIR),
    }
}

/// Subdirectories of `root` in name order, hidden entries skipped.
pub fn grid_dirs(root: &Path) -> Result<Vec<PathBuf>, AppError> {
    let entries = std::fs::read_dir(root)
        .map_err(|e| AppError::new(2, format!("Failed to read '{}': {e}", root.display())))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AppError::new(2, format!("Failed to read '{}': {e}", root.display())))?;
        let path = entry.path();
        if grid_name(&path).starts_with('.') || !path.is_dir() {
            continue;
        }
        dirs.push(path);
    }
    dirs.sort();
    Ok(dirs)
}

fn grid_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
