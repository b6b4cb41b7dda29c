use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_composer::{CanvasPreset, Config, LayoutReport, compose, read_items, render_ascii};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Placement table followed by dropped categories
    Text,
    /// ASCII preview of the canvas
    Grid,
    /// Full layout report as JSON
    Json,
}

#[derive(Parser)]
#[command(author, version, about = "Size and place weighted category blocks on a grid canvas", long_about = None)]
struct Args {
    /// Items CSV file, or a directory of CSV files to merge
    #[arg(short = 'i', long = "items")]
    items: PathBuf,

    /// Layout configuration file path
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Canvas preset, overrides the configured canvas (day, week, month)
    #[arg(short = 'p', long = "preset")]
    preset: Option<CanvasPreset>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration: {}", path.display());
            Config::load_from_file(path)?
        }
        None => Config::default(),
    };

    let mut engine = config.engine_config()?;
    if let Some(preset) = args.preset {
        engine.canvas = preset.canvas();
    }
    info!(
        "Canvas: {}x{} cells, aspect ratio {}",
        engine.canvas.columns, engine.canvas.rows, engine.aspect_ratio
    );

    let items = read_items(&args.items)
        .with_context(|| format!("failed to read items from {}", args.items.display()))?;
    let item_total: usize = items.values().map(Vec::len).sum();
    if item_total == 0 {
        warn!("No items found in {}", args.items.display());
    } else {
        info!("Loaded {} items in {} categories", item_total, items.len());
    }

    let report = compose(&items, &engine)?;

    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Grid => print!("{}", render_ascii(&report.canvas, &report.placements)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn print_text(report: &LayoutReport) {
    println!(
        "canvas {}x{}: {} placed, {} dropped",
        report.canvas.columns,
        report.canvas.rows,
        report.placements.len(),
        report.dropped.len()
    );
    for p in &report.placements {
        println!(
            "{:<14} -> row {:>2}, col {:>2}, {:>2}x{:<2} score {:>6.2} [{}]",
            p.category, p.origin_row, p.origin_col, p.width, p.height, p.score, p.phase
        );
    }
    for d in &report.dropped {
        println!(
            "{:<14} -> dropped ({}x{}, score {:.2}): {}",
            d.category, d.dimensions.width, d.dimensions.height, d.score, d.reason
        );
    }
}
