use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error("Input path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error(
        "{} image(s) do not fit under the {row_height}px row height: {}",
        .names.len(),
        .names.join(", ")
    )]
    UnplaceableImages { names: Vec<String>, row_height: u32 },

    #[error("Image name '{name}' cannot be written to atlas metadata (contains ';' or a line break)")]
    InvalidName { name: String },

    #[error("Atlas of {width}x{height} cannot be rounded to a power of two")]
    AtlasTooLarge { width: u32, height: u32 },

    #[error("Image '{name}' was placed outside the atlas bounds")]
    PlacementOutOfBounds { name: String },
}
