use glam::Vec3;

/// Unit normal of the triangle `v0, v1, v2`
///
/// Orientation follows the winding order (right-hand rule). Collinear points
/// have a zero-length cross product and produce NaN components; callers feed
/// generated sphere geometry where that cannot happen, so it is not guarded.
pub fn compute_face_normal(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> [f32; 3] {
    let v0 = Vec3::from_array(v0);
    let e1 = Vec3::from_array(v1) - v0;
    let e2 = Vec3::from_array(v2) - v0;

    let n = e1.cross(e2);
    (n / n.length()).to_array()
}
