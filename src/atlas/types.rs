use image::RgbaImage;

use crate::source::PlacedImage;

/// A completed texture atlas
#[derive(Debug)]
pub struct Atlas {
    /// Atlas width, a power of two
    pub width: u32,
    /// Atlas height, a power of two
    pub height: u32,
    /// Border replicated around every image
    pub padding: u32,
    /// Rendered atlas image
    pub image: RgbaImage,
    /// Placed images, in the order the planner found room for them
    pub images: Vec<PlacedImage>,
    /// Names of images that were left out
    pub omitted: Vec<String>,
}

impl Atlas {
    pub fn new(width: u32, height: u32, padding: u32) -> Self {
        Self {
            width,
            height,
            padding,
            image: RgbaImage::new(width, height),
            images: Vec::new(),
            omitted: Vec::new(),
        }
    }

    /// Fraction of the atlas covered by image content (padding excluded)
    pub fn occupancy(&self) -> f64 {
        let total = u64::from(self.width) * u64::from(self.height);
        if total == 0 {
            return 0.0;
        }
        let used: u64 = self
            .images
            .iter()
            .map(|i| u64::from(i.width) * u64::from(i.height))
            .sum();
        used as f64 / total as f64
    }
}
