use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::output::CompressionLevel;

/// Largest accepted border, in pixels
pub const MAX_PADDING: u32 = 1024;

/// PNG compression level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// Settings read from `atlaspack.json` in the packed directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Border replicated around every image, in pixels
    pub padding: u32,
    /// Base name of the atlas image; inputs with this stem are skipped
    pub name: String,
    /// File name of the text metadata
    pub info_file: String,
    /// Also write `<name>.json`
    pub json: bool,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
    /// Drop images that do not fit instead of failing the run
    pub allow_unplaced: bool,
    /// Debug-level logging
    pub verbose: bool,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            padding: 1,
            name: "atlas".to_string(),
            info_file: "atlasInfo.txt".to_string(),
            json: false,
            compress: None,
            allow_unplaced: false,
            verbose: false,
        }
    }
}

impl AtlasConfig {
    /// Reject values that would produce unusable output paths.
    pub fn validate(&self) -> Result<()> {
        if self.padding > MAX_PADDING {
            bail!(
                "'padding' must be at most {}, got {}",
                MAX_PADDING,
                self.padding
            );
        }
        for (field, value) in [("name", &self.name), ("info_file", &self.info_file)] {
            if value.is_empty() {
                bail!("'{}' must not be empty", field);
            }
            if value.contains(['/', '\\']) {
                bail!("'{}' must be a plain file name, got '{}'", field, value);
            }
        }
        Ok(())
    }

    pub fn compression(&self) -> Result<Option<CompressionLevel>> {
        let level = match &self.compress {
            None => None,
            Some(CompressConfig::Level(n)) => {
                Some(CompressionLevel::from_level(*n).map_err(anyhow::Error::msg)?)
            }
            Some(CompressConfig::Max(s)) => Some(s.parse().map_err(anyhow::Error::msg)?),
        };
        Ok(level)
    }
}
