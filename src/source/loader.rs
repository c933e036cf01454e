use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use image::ImageReader;
use log::{debug, info};

use super::SourceImage;
use crate::error::AtlasError;

const IMAGE_EXTENSION: &str = "png";

/// List the PNG files directly inside `dir`, sorted by path.
///
/// Files whose stem equals `exclude_stem` (ignoring ASCII case, like the
/// extension match) are skipped so a previous atlas never packs itself.
pub fn collect_image_paths(dir: &Path, exclude_stem: &str) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(AtlasError::InputNotFound(dir.to_path_buf()).into());
    }
    if !dir.is_dir() {
        return Err(AtlasError::NotADirectory(dir.to_path_buf()).into());
    }

    let base = Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&base).join(format!("*.{}", IMAGE_EXTENSION));
    let pattern_str = pattern.to_string_lossy();

    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut paths = Vec::new();
    for entry in glob::glob_with(&pattern_str, options)
        .with_context(|| format!("invalid glob pattern: {}", pattern_str))?
    {
        let path = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;

        if !path.is_file() {
            continue;
        }
        if path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.eq_ignore_ascii_case(exclude_stem))
        {
            debug!("Skipping previous output {}", path.display());
            continue;
        }
        paths.push(path);
    }

    Ok(paths)
}

/// Decode every eligible image in `dir`.
///
/// An empty directory yields an empty list; any file that fails to decode
/// aborts the whole load.
pub fn load_images(dir: &Path, exclude_stem: &str) -> Result<Vec<SourceImage>> {
    let paths = collect_image_paths(dir, exclude_stem)?;
    if paths.is_empty() {
        return Ok(Vec::new());
    }

    info!("Loading {} images...", paths.len());

    paths
        .into_iter()
        .enumerate()
        .map(|(id, path)| load_single_image(id, path))
        .collect()
}

fn load_single_image(id: usize, path: PathBuf) -> Result<SourceImage> {
    let image = ImageReader::open(&path)
        .map_err(|e| AtlasError::ImageLoad {
            path: path.clone(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| AtlasError::ImageLoad {
            path: path.clone(),
            source: e,
        })?
        .into_rgba8();

    let name = image_name(&path);
    debug!("Loaded {} ({}x{})", name, image.width(), image.height());

    Ok(SourceImage { id, name, image })
}

/// File name used in the metadata; bytes that are not UTF-8 become U+FFFD.
fn image_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
