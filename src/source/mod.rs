mod loader;
mod order;
mod types;

pub use loader::{collect_image_paths, load_images};
pub use order::sort_by_height;
pub use types::{PlacedImage, SourceImage};
