// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::SceneConfig;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "sky-octahedron")]
#[command(about = "Animated octahedron scene", long_about = None)]
pub struct Cli {
    /// JSON scene file; fields it omits keep their defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Initial window width in logical pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height in logical pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Seed for the per-face animation delays
    #[arg(long)]
    pub seed: Option<u64>,

    /// Quiet period before a window resize is applied
    #[arg(long = "resize-debounce-ms")]
    pub resize_debounce_ms: Option<u64>,
}

impl Cli {
    /// Defaults, overlaid by the config file, overlaid by flags
    pub fn scene_config(&self) -> Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::load(path)?,
            None => SceneConfig::default(),
        };

        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(ms) = self.resize_debounce_ms {
            config.resize_debounce_ms = ms;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_gives_defaults() {
        let cli = Cli::parse_from(["sky-octahedron"]);
        assert_eq!(cli.scene_config().expect("defaults"), SceneConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "sky-octahedron",
            "--width",
            "1280",
            "--height",
            "720",
            "--seed",
            "99",
            "--resize-debounce-ms",
            "250",
        ]);
        let config = cli.scene_config().expect("config");

        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.resize_debounce_ms, 250);
    }

    #[test]
    fn missing_config_file_fails() {
        let cli = Cli::parse_from(["sky-octahedron", "--config", "/nonexistent/scene.json"]);
        assert!(cli.scene_config().is_err());
    }
}
