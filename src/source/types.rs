use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// An input image, immutable once loaded
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Position in load order, stable across sorting
    pub id: usize,
    /// Name written to the metadata (file name with extension)
    pub name: String,
    /// Decoded RGBA pixels
    pub image: RgbaImage,
}

impl SourceImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Final location of an image's content inside the atlas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedImage {
    /// Source image id
    pub id: usize,
    pub name: String,
    /// Content top-left x, padding already applied
    pub x: u32,
    /// Content top-left y, padding already applied
    pub y: u32,
    /// Unpadded width
    pub width: u32,
    /// Unpadded height
    pub height: u32,
}
