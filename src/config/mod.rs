mod load;
mod types;

pub use load::{CONFIG_FILE_NAME, LoadedConfig};
pub use types::{AtlasConfig, CompressConfig, MAX_PADDING};
