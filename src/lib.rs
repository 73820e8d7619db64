pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod geometry;
pub mod math;
pub mod mesh;
pub mod renderer;
pub mod scene;
pub mod traits;
pub mod types;

pub use config::SceneConfig;
pub use mesh::{MeshConfig, OctahedronMesh};
pub use scene::{RenderContext, Scene};
