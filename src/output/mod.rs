mod format;
mod info;
mod json;

pub use format::{CompressionLevel, save_atlas_image};
pub use info::{INFO_DELIMITER, format_info, write_info};
pub use json::write_json;
