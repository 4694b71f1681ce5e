// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "maze-camera")]
#[command(about = "First-person maze walker", long_about = None)]
pub struct Cli {
    /// JSON settings file
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Text maze layout (overrides settings)
    #[arg(long)]
    pub maze: Option<PathBuf>,

    /// Tile edge length in world units (overrides settings)
    #[arg(long = "tile-size", allow_negative_numbers = true)]
    pub tile_size: Option<f32>,

    /// JSON input script to replay instead of reading devices
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Exit after replaying --script instead of opening a window
    #[arg(long, default_value = "false")]
    pub headless: bool,
}
