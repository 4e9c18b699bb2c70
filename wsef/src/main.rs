use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use wsefdata::{files, ModKey};

mod loader;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the overlay JSON files
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Load order file (defaults to plugins.txt in the data directory)
    #[arg(long)]
    load_order: Option<PathBuf>,

    /// Where to write the output overlay (defaults to the data directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output overlay file name, overrides the config
    #[arg(long)]
    output_name: Option<String>,

    /// Also correct magnitudes that are exactly 1.0
    #[arg(long)]
    process_unit_magnitude: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let mut config = loader::load_config(args.config.as_deref())?;
    if let Some(name) = args.output_name {
        config.output_name = name;
    }
    if args.process_unit_magnitude {
        config.ignore_unit_magnitude = false;
    }
    let output_key = ModKey::from_file_name(&config.output_name)
        .with_context(|| format!("Invalid output name {:?}", config.output_name))?;

    let load_order_path = args
        .load_order
        .unwrap_or_else(|| args.data_dir.join("plugins.txt"));
    let load_order = loader::load_overlays(&args.data_dir, &load_order_path, &output_key)?;

    let (patch, summary) = wsef_core::run_patch_with_summary(&load_order, &config)?;

    let output_dir = args.output_dir.unwrap_or(args.data_dir);
    let path = files::write_overlay(&output_dir, &patch)
        .with_context(|| format!("Failed to write output to {}", output_dir.display()))?;

    log::info!(
        "Wrote {} ({} records, {} effects corrected)",
        path.display(),
        patch.record_count(),
        summary.corrected()
    );

    Ok(())
}
