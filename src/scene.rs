use std::time::Instant;

use anyhow::Result;
use log::{debug, info};
use rand::Rng;

use crate::camera::PerspectiveCamera;
use crate::config::SceneConfig;
use crate::core::{Clock, Viewport};
use crate::mesh::OctahedronMesh;
use crate::traits::FrameRenderer;

/// Camera, clock, viewport and meshes of the running scene
///
/// Meshes are kept in draw order: the solid octahedron first, then the
/// translucent shell that composites over it.
pub struct Scene {
    camera: PerspectiveCamera,
    clock: Clock,
    viewport: Viewport,
    meshes: Vec<OctahedronMesh>,
}

impl Scene {
    pub fn new<R: Rng + ?Sized>(config: &SceneConfig, viewport: Viewport, rng: &mut R) -> Self {
        let camera_config = &config.camera;
        let mut camera = PerspectiveCamera::new(
            camera_config.fov,
            viewport.aspect(),
            camera_config.near,
            camera_config.far,
        );
        camera.set_position(camera_config.position());
        camera.look_at(camera_config.target());

        let meshes = vec![
            OctahedronMesh::new(config.solid, rng),
            OctahedronMesh::new(config.shell, rng),
        ];
        for mesh in &meshes {
            info!(
                "{} mesh: {} faces, radius {}",
                mesh.config().shader.label(),
                mesh.object().geometry.face_count(),
                mesh.config().radius
            );
        }

        Self {
            camera,
            clock: Clock::new(),
            viewport,
            meshes,
        }
    }

    /// Build from already constructed meshes, in draw order
    pub fn with_meshes(camera: PerspectiveCamera, viewport: Viewport, meshes: Vec<OctahedronMesh>) -> Self {
        Self {
            camera,
            clock: Clock::new(),
            viewport,
            meshes,
        }
    }

    /// Replace the frame clock, e.g. to start it at a known instant
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Forward one frame's elapsed seconds to every mesh
    pub fn advance(&mut self, delta: f32) {
        for mesh in &mut self.meshes {
            mesh.render(delta);
        }
    }

    /// Adopt new surface dimensions; empty sizes are ignored
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if viewport.is_empty() {
            return false;
        }

        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
        self.camera.update_projection_matrix();
        true
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn meshes(&self) -> &[OctahedronMesh] {
        &self.meshes
    }
}

/// The scene together with whatever draws it
///
/// Created once at startup and mutated only by `tick` and `resize`.
pub struct RenderContext<R: FrameRenderer> {
    pub scene: Scene,
    pub renderer: R,
}

impl<R: FrameRenderer> RenderContext<R> {
    pub fn new(scene: Scene, renderer: R) -> Self {
        Self { scene, renderer }
    }

    /// One frame: elapsed time since the previous frame to every mesh, then draw
    pub fn tick(&mut self) -> Result<f32> {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Result<f32> {
        let delta = self.scene.clock.delta_at(now);
        self.scene.advance(delta);
        self.renderer.render(&self.scene)?;
        Ok(delta)
    }

    /// Resize handler: viewport, camera projection, then the render target
    pub fn resize(&mut self, viewport: Viewport) {
        if !self.scene.resize(viewport) {
            debug!("Ignoring empty viewport {}x{}", viewport.width, viewport.height);
            return;
        }

        info!("Viewport resized to {}x{}", viewport.width, viewport.height);
        self.renderer.resize(viewport);
    }
}
