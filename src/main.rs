use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};

use atlaspack::cli::CliArgs;
use atlaspack::config::LoadedConfig;
use atlaspack::pipeline::pack_directory;

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // The logger may not be up yet if the config failed to load
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();
    let dir = cli.target_dir();

    let loaded = LoadedConfig::discover(&dir)?;

    env_logger::Builder::new()
        .filter_level(if loaded.config.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("atlaspack v{}", env!("CARGO_PKG_VERSION"));
    info!("Packing images in {}", dir.display());

    let started = Instant::now();

    let Some(summary) = pack_directory(&loaded)? else {
        info!("No images found in {}", dir.display());
        return Ok(());
    };

    if !summary.omitted.is_empty() {
        warn!("{} image(s) were left out of the atlas", summary.omitted.len());
    }

    info!(
        "Packed {} images into a {}x{} atlas in {:.2?}",
        summary.image_count,
        summary.width,
        summary.height,
        started.elapsed()
    );

    Ok(())
}
