use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "atlaspack")]
#[command(
    version,
    about = "Pack the PNG images of a directory into one power-of-two atlas",
    long_about = None
)]
pub struct CliArgs {
    /// Directory containing the images; atlas.png and atlasInfo.txt are written here [default: .]
    pub dir: Option<PathBuf>,
}

impl CliArgs {
    /// Directory to pack, falling back to the working directory
    pub fn target_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
