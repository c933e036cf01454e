pub mod atlas;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod packing;
pub mod pipeline;
pub mod source;

pub use atlas::{Atlas, AtlasBuilder};
pub use cli::CliArgs;
pub use config::{AtlasConfig, LoadedConfig};
pub use error::AtlasError;
pub use pipeline::{PackSummary, pack_directory};
pub use source::{PlacedImage, SourceImage};
