use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::atlas::Atlas;
use crate::error::AtlasError;
use crate::source::PlacedImage;

#[derive(Serialize)]
struct JsonOutput {
    meta: Meta,
    image: String,
    size: Size,
    padding: u32,
    images: Vec<JsonImage>,
}

#[derive(Serialize)]
struct Meta {
    app: &'static str,
    version: &'static str,
    format: &'static str,
}

#[derive(Serialize)]
struct Size {
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct JsonImage {
    name: String,
    frame: Frame,
}

#[derive(Serialize)]
struct Frame {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

/// Write a JSON sidecar describing the atlas.
///
/// Carries the same placements as the text metadata plus the atlas size.
pub fn write_json(atlas: &Atlas, path: &Path, image_file: &str) -> Result<()> {
    let output = JsonOutput {
        meta: Meta {
            app: "atlaspack",
            version: env!("CARGO_PKG_VERSION"),
            format: "rgba8888",
        },
        image: image_file.to_string(),
        size: Size {
            w: atlas.width,
            h: atlas.height,
        },
        padding: atlas.padding,
        images: atlas.images.iter().map(image_to_json).collect(),
    };

    let content = serde_json::to_string_pretty(&output)?;

    fs::write(path, content).map_err(|e| AtlasError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

fn image_to_json(image: &PlacedImage) -> JsonImage {
    JsonImage {
        name: image.name.clone(),
        frame: Frame {
            x: image.x,
            y: image.y,
            w: image.width,
            h: image.height,
        },
    }
}
