use rand::Rng;

use super::polyhedron::PolyhedronGeometry;
use crate::math::compute_face_normal;

/// Upper bound (exclusive) of the per-face animation delay
pub const MAX_DELAY: f32 = 0.5;

/// Per-vertex buffers derived once per face and repeated on all three of the
/// face's vertices, aligned 1:1 with the geometry's position buffer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceAttributes {
    /// `faceNormal`, 3 floats per vertex
    pub face_normals: Vec<f32>,
    /// `center`, 3 floats per vertex
    pub centers: Vec<f32>,
    /// `delay`, 1 float per vertex
    pub delays: Vec<f32>,
}

impl FaceAttributes {
    /// Derive normal, centroid and a random delay for every face of `geometry`
    pub fn derive<R: Rng + ?Sized>(geometry: &PolyhedronGeometry, rng: &mut R) -> Self {
        let faces = geometry.face_count();
        let mut attributes = Self {
            face_normals: Vec::with_capacity(faces * 9),
            centers: Vec::with_capacity(faces * 9),
            delays: Vec::with_capacity(faces * 3),
        };

        for [v0, v1, v2] in geometry.faces() {
            let normal = compute_face_normal(v0, v1, v2);
            let center = [
                (v0[0] + v1[0] + v2[0]) / 3.0,
                (v0[1] + v1[1] + v2[1]) / 3.0,
                (v0[2] + v1[2] + v2[2]) / 3.0,
            ];
            let delay = rng.gen::<f32>() * MAX_DELAY;

            for _ in 0..3 {
                attributes.face_normals.extend_from_slice(&normal);
                attributes.centers.extend_from_slice(&center);
                attributes.delays.push(delay);
            }
        }

        attributes
    }

    pub fn vertex_count(&self) -> usize {
        self.delays.len()
    }
}
