use glam::{Mat4, Vec3};

use crate::math::radians;
use crate::types::CameraUniform;

/// Perspective camera looking at a fixed target
///
/// `projection` is cached and only recomputed by `update_projection_matrix`,
/// so changing `aspect` has no effect until that call.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Rebuild the projection from `fov`, `aspect`, `near` and `far`
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(radians(self.fov), self.aspect, self.near, self.far);
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view()
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            position: self.position.to_array(),
            _pad: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn scene_camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(45.0, 16.0 / 9.0, 1.0, 10000.0);
        camera.set_position(Vec3::new(0.0, 400.0, 600.0));
        camera.look_at(Vec3::ZERO);
        camera
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let camera = scene_camera();
        let clip = camera.view_projection() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;

        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn projection_is_cached_until_updated() {
        let mut camera = scene_camera();
        let before = camera.projection();

        camera.aspect = 1.0;
        assert_eq!(camera.projection(), before);

        camera.update_projection_matrix();
        assert_ne!(camera.projection(), before);
        assert_eq!(
            camera.projection(),
            Mat4::perspective_rh(radians(45.0), 1.0, 1.0, 10000.0)
        );
    }

    #[test]
    fn uniform_carries_position() {
        let camera = scene_camera();
        let uniform = camera.to_uniform();
        assert_eq!(uniform.position, [0.0, 400.0, 600.0]);
        assert_eq!(uniform.view_proj, camera.view_projection().to_cols_array_2d());
    }
}
