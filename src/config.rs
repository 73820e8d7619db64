use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::mesh::MeshConfig;

pub const INITIAL_WINDOW_WIDTH: u32 = 800;
pub const INITIAL_WINDOW_HEIGHT: u32 = 600;
pub const RESIZE_DEBOUNCE_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Sky Octahedron".to_string(),
            width: INITIAL_WINDOW_WIDTH,
            height: INITIAL_WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraConfig {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn target(&self) -> Vec3 {
        Vec3::from_array(self.target)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 400.0, 600.0],
            target: [0.0, 0.0, 0.0],
            fov: 45.0,
            near: 1.0,
            far: 10000.0,
        }
    }
}

/// Everything the scene needs at startup
///
/// Every field has a default reproducing the stock scene, so a JSON file only
/// lists what it changes. `solid` and `shell`, when present, must be complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    /// Background as 0xRRGGBB
    pub clear_color: u32,
    pub clear_alpha: f64,
    pub camera: CameraConfig,
    pub resize_debounce_ms: u64,
    /// Seed for per-face delays; fresh entropy when absent
    pub seed: Option<u64>,
    pub solid: MeshConfig,
    pub shell: MeshConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            clear_color: 0x111111,
            clear_alpha: 1.0,
            camera: CameraConfig::default(),
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            seed: None,
            solid: MeshConfig::solid(),
            shell: MeshConfig::shell(),
        }
    }
}

impl SceneConfig {
    /// Read a JSON scene description
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_json(&text).with_context(|| format!("Invalid config file: {:?}", path))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.solid.validate().context("Invalid solid mesh")?;
        self.shell.validate().context("Invalid shell mesh")?;
        Ok(())
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Clear color channels in [0, 1], as authored
    pub fn clear_rgba(&self) -> [f64; 4] {
        let channel = |shift: u32| ((self.clear_color >> shift) & 0xff) as f64 / 255.0;
        [channel(16), channel(8), channel(0), self.clear_alpha]
    }

    /// Clear color for an sRGB render target, whose clear value is linear
    pub fn clear_rgba_linear(&self) -> [f64; 4] {
        let [r, g, b, a] = self.clear_rgba();
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a]
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
