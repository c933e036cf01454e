use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::atlas::AtlasBuilder;
use crate::config::LoadedConfig;
use crate::output::{save_atlas_image, write_info, write_json};
use crate::source::load_images;

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct PackSummary {
    pub width: u32,
    pub height: u32,
    pub image_count: usize,
    /// Images left out because they never fit (only with `allow_unplaced`)
    pub omitted: Vec<String>,
    pub atlas_path: PathBuf,
    pub info_path: PathBuf,
    pub json_path: Option<PathBuf>,
}

/// Load, pack and write the atlas for `loaded.dir`.
///
/// Returns `Ok(None)` without touching the directory when it holds no
/// eligible images. Every other failure aborts the run.
pub fn pack_directory(loaded: &LoadedConfig) -> Result<Option<PackSummary>> {
    let config = &loaded.config;
    let compress = config.compression().context("invalid compress setting")?;

    let images = load_images(&loaded.dir, &config.name)?;
    if images.is_empty() {
        return Ok(None);
    }
    info!("Loaded {} images", images.len());

    let atlas = AtlasBuilder::new()
        .padding(config.padding)
        .allow_unplaced(config.allow_unplaced)
        .build(images)?;

    let info_path = loaded.info_path();
    write_info(&atlas, &info_path)?;
    debug!("Wrote {}", info_path.display());

    let atlas_path = loaded.atlas_path();
    save_atlas_image(&atlas, &atlas_path, compress)?;
    info!("Saved {}", atlas_path.display());

    let json_path = if config.json {
        let path = loaded.json_path();
        write_json(&atlas, &path, &loaded.atlas_file_name())?;
        info!("Generated {}", path.display());
        Some(path)
    } else {
        None
    };

    Ok(Some(PackSummary {
        width: atlas.width,
        height: atlas.height,
        image_count: atlas.images.len(),
        omitted: atlas.omitted,
        atlas_path,
        info_path,
        json_path,
    }))
}
