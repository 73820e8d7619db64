use rand::rngs::StdRng;
use rand::SeedableRng;
use sky_octahedron::geometry::{PolyhedronGeometry, MAX_DELAY};
use sky_octahedron::mesh::{MeshConfig, OctahedronMesh};

fn two_faces() -> PolyhedronGeometry {
    PolyhedronGeometry::from_positions(vec![
        0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0,
    ])
}

#[cfg(test)]
mod mesh_tests {
    use super::*;

    #[test]
    fn test_two_faces_give_two_replicated_attribute_sets() {
        let mesh = OctahedronMesh::with_geometry(
            MeshConfig::solid(),
            two_faces(),
            &mut StdRng::seed_from_u64(42),
        );
        let attributes = mesh.object().attributes.as_ref().expect("solid mesh has attributes");

        assert_eq!(attributes.centers.len(), 18);
        assert_eq!(attributes.face_normals.len(), 18);
        assert_eq!(attributes.delays.len(), 6);

        let pairs: Vec<([f32; 3], f32)> = (0..6)
            .map(|v| {
                let c = &attributes.centers[v * 3..v * 3 + 3];
                ([c[0], c[1], c[2]], attributes.delays[v])
            })
            .collect();

        for face in pairs.chunks(3) {
            assert_eq!(face[0], face[1]);
            assert_eq!(face[1], face[2]);
        }
        assert_ne!(pairs[0], pairs[3]);

        let third = 1.0f32 / 3.0;
        assert_eq!(pairs[0].0, [third, third, 0.0]);
        assert_eq!(pairs[3].0, [third, third, 1.0]);
        for (_, delay) in &pairs {
            assert!((0.0..MAX_DELAY).contains(delay));
        }
    }

    #[test]
    fn test_two_faces_share_normal_when_parallel() {
        let mesh = OctahedronMesh::with_geometry(
            MeshConfig::solid(),
            two_faces(),
            &mut StdRng::seed_from_u64(42),
        );
        let attributes = mesh.object().attributes.as_ref().expect("solid mesh has attributes");

        for normal in attributes.face_normals.chunks_exact(3) {
            assert_eq!(normal, &[0.0f32, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_render_twice_accumulates_time() {
        let mut mesh = OctahedronMesh::with_geometry(
            MeshConfig::solid(),
            two_faces(),
            &mut StdRng::seed_from_u64(42),
        );

        mesh.render(0.016);
        mesh.render(0.016);

        assert!((mesh.time() - 0.032).abs() < 1e-6);
    }

    #[test]
    fn test_same_seed_gives_same_delays() {
        let a = OctahedronMesh::new(MeshConfig::solid(), &mut StdRng::seed_from_u64(9));
        let b = OctahedronMesh::new(MeshConfig::solid(), &mut StdRng::seed_from_u64(9));

        assert_eq!(a.object().attributes, b.object().attributes);
    }

    #[test]
    fn test_shell_geometry_is_larger_than_solid() {
        let mut rng = StdRng::seed_from_u64(3);
        let solid = OctahedronMesh::new(MeshConfig::solid(), &mut rng);
        let shell = OctahedronMesh::new(MeshConfig::shell(), &mut rng);

        assert_eq!(
            solid.object().geometry.face_count(),
            shell.object().geometry.face_count()
        );
        let max_extent = |mesh: &OctahedronMesh| {
            mesh.object()
                .geometry
                .positions()
                .iter()
                .fold(0.0f32, |acc, p| acc.max(p.abs()))
        };
        assert!((max_extent(&solid) - 90.0).abs() < 1e-3);
        assert!((max_extent(&shell) - 150.0).abs() < 1e-3);
    }
}
