use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::types::AtlasConfig;

/// Optional settings file looked up in the packed directory
pub const CONFIG_FILE_NAME: &str = "atlaspack.json";

/// Configuration together with the directory it applies to.
///
/// Output files are written next to the inputs, so every output path is
/// resolved against `dir`.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed (or default) configuration
    pub config: AtlasConfig,
    /// The directory being packed
    pub dir: PathBuf,
}

impl LoadedConfig {
    /// Load a config file from the given path, applying it to `dir`.
    pub fn load(path: &Path, dir: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: AtlasConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("invalid config file: {}", path.display()))?;

        Ok(Self {
            config,
            dir: dir.to_path_buf(),
        })
    }

    /// Use `dir/atlaspack.json` when present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path, dir)
        } else {
            Ok(Self::with_defaults(dir))
        }
    }

    pub fn with_defaults(dir: &Path) -> Self {
        Self {
            config: AtlasConfig::default(),
            dir: dir.to_path_buf(),
        }
    }

    pub fn atlas_file_name(&self) -> String {
        format!("{}.png", self.config.name)
    }

    pub fn atlas_path(&self) -> PathBuf {
        self.dir.join(self.atlas_file_name())
    }

    pub fn info_path(&self) -> PathBuf {
        self.dir.join(&self.config.info_file)
    }

    pub fn json_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.config.name))
    }
}
