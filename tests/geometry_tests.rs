use sky_octahedron::geometry::octahedron;
use sky_octahedron::math::{clamp, compute_face_normal, degrees, mix, polar, radians};

#[cfg(test)]
mod geometry_tests {
    use super::*;

    fn length(v: [f32; 3]) -> f32 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    #[test]
    fn test_octahedron_detail_four_matches_stock_mesh() {
        let geometry = octahedron(90.0, 4);
        assert_eq!(geometry.face_count(), 200);
        assert_eq!(geometry.vertex_count(), 600);
    }

    #[test]
    fn test_octahedron_normals_point_outward() {
        let geometry = octahedron(150.0, 2);
        for [a, b, c] in geometry.faces() {
            let normal = compute_face_normal(a, b, c);
            let center = [
                (a[0] + b[0] + c[0]) / 3.0,
                (a[1] + b[1] + c[1]) / 3.0,
                (a[2] + b[2] + c[2]) / 3.0,
            ];
            let dot = normal[0] * center[0] + normal[1] * center[1] + normal[2] * center[2];
            assert!(dot > 0.0);
        }
    }

    #[test]
    fn test_angle_conversions_round_trip() {
        for x in [-720.0f32, -90.0, 0.0, 45.0, 180.0, 359.0] {
            assert!((degrees(radians(x)) - x).abs() < 1e-3);
        }
    }

    #[test]
    fn test_clamp_and_mix_endpoints() {
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
        assert_eq!(mix(2.0, 8.0, 0.0), 2.0);
        assert_eq!(mix(2.0, 8.0, 1.0), 8.0);
        assert_eq!(mix(3.0, 3.0, 0.7), 3.0);
    }

    #[test]
    fn test_polar_length_is_radius() {
        for (lat, lon) in [(0.0f32, 0.0f32), (45.0, 90.0), (-30.0, 200.0)] {
            let p = polar(radians(lat), radians(lon), 250.0);
            assert!((length(p) - 250.0).abs() < 1e-2);
        }
        let p = polar(0.3, 1.2, -4.0);
        assert!((length(p) - 4.0).abs() < 1e-4);
    }
}
