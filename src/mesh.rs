use std::borrow::Cow;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geometry::{octahedron, FaceAttributes, PolyhedronGeometry};
use crate::types::TimeUniform;

/// How normals are interpolated across a face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shading {
    /// One constant normal per face
    Flat,
    /// Per-vertex normals interpolated across the face
    Smooth,
}

const SMOOTH_NORMAL: &str = "@interpolate(perspective) normal";
const FLAT_NORMAL: &str = "@interpolate(flat) normal";

/// Which shader program draws the mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderKind {
    /// Reads `faceNormal`, `center` and `delay` per vertex
    Solid,
    /// Reads positions only
    Shell,
}

impl ShaderKind {
    pub fn source(&self) -> &'static str {
        match self {
            ShaderKind::Solid => include_str!("shaders/octahedron.wgsl"),
            ShaderKind::Shell => include_str!("shaders/octahedron_shell.wgsl"),
        }
    }

    /// Whether the program reads the `faceNormal`, `center` and `delay` attributes
    pub fn needs_face_attributes(&self) -> bool {
        matches!(self, ShaderKind::Solid)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShaderKind::Solid => "Octahedron",
            ShaderKind::Shell => "Octahedron Shell",
        }
    }
}

/// Construction parameters shared by both octahedron variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    pub radius: f32,
    pub detail: u32,
    /// Derive per-face normal, center and delay buffers
    pub face_attributes: bool,
    pub shading: Shading,
    pub shader: ShaderKind,
    pub transparent: bool,
    pub double_sided: bool,
    pub depth_write: bool,
}

impl MeshConfig {
    /// Faceted inner octahedron whose faces animate independently
    pub const fn solid() -> Self {
        Self {
            radius: 90.0,
            detail: 4,
            face_attributes: true,
            shading: Shading::Flat,
            shader: ShaderKind::Solid,
            transparent: true,
            double_sided: true,
            depth_write: true,
        }
    }

    /// Translucent outer shell, composited without writing depth
    pub const fn shell() -> Self {
        Self {
            radius: 150.0,
            detail: 4,
            face_attributes: false,
            shading: Shading::Smooth,
            shader: ShaderKind::Shell,
            transparent: true,
            double_sided: true,
            depth_write: false,
        }
    }

    /// A program that reads per-face attributes needs them derived
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.face_attributes || !self.shader.needs_face_attributes(),
            "{} shader requires face_attributes",
            self.shader.label()
        );
        anyhow::ensure!(self.radius > 0.0, "radius must be positive, got {}", self.radius);
        Ok(())
    }
}

/// Shader program selection, render state and the `time` uniform
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub shader: ShaderKind,
    pub shading: Shading,
    pub transparent: bool,
    pub double_sided: bool,
    pub depth_write: bool,
    pub time: f32,
}

impl Material {
    fn from_config(config: &MeshConfig) -> Self {
        Self {
            shader: config.shader,
            shading: config.shading,
            transparent: config.transparent,
            double_sided: config.double_sided,
            depth_write: config.depth_write,
            time: 0.0,
        }
    }

    /// WGSL source with the normal varying interpolated per `shading`
    pub fn shader_source(&self) -> Cow<'static, str> {
        let source = self.shader.source();
        match self.shading {
            Shading::Flat => Cow::Owned(source.replace(SMOOTH_NORMAL, FLAT_NORMAL)),
            Shading::Smooth => Cow::Borrowed(source),
        }
    }

    pub fn uniform(&self) -> TimeUniform {
        TimeUniform::new(self.time)
    }
}

/// Geometry, optional per-face attributes and material, ready for upload
#[derive(Debug, Clone)]
pub struct Renderable {
    pub geometry: PolyhedronGeometry,
    pub attributes: Option<FaceAttributes>,
    pub material: Material,
}

impl Renderable {
    pub fn vertex_count(&self) -> u32 {
        self.geometry.vertex_count() as u32
    }
}

/// Builds one octahedron variant and advances its shader clock
#[derive(Debug, Clone)]
pub struct OctahedronMesh {
    config: MeshConfig,
    object: Renderable,
}

impl OctahedronMesh {
    /// Build from the generated octahedron described by `config`
    pub fn new<R: Rng + ?Sized>(config: MeshConfig, rng: &mut R) -> Self {
        Self::with_geometry(config, octahedron(config.radius, config.detail), rng)
    }

    /// Build around a caller-supplied position buffer; `radius` and `detail`
    /// of `config` are ignored
    pub fn with_geometry<R: Rng + ?Sized>(
        config: MeshConfig,
        geometry: PolyhedronGeometry,
        rng: &mut R,
    ) -> Self {
        let attributes = config
            .face_attributes
            .then(|| FaceAttributes::derive(&geometry, rng));

        Self {
            object: Renderable {
                geometry,
                attributes,
                material: Material::from_config(&config),
            },
            config,
        }
    }

    /// Accumulate `delta` seconds into the `time` uniform
    pub fn render(&mut self, delta: f32) {
        self.object.material.time += delta;
    }

    pub fn time(&self) -> f32 {
        self.object.material.time
    }

    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    pub fn object(&self) -> &Renderable {
        &self.object
    }
}
