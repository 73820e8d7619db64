use glam::Vec3;

/// Floats per triangular face in a position buffer (3 vertices x 3 coords)
pub const FLOATS_PER_FACE: usize = 9;

const OCTAHEDRON_VERTICES: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

const OCTAHEDRON_FACES: [[usize; 3]; 8] = [
    [0, 2, 4],
    [0, 4, 3],
    [0, 3, 5],
    [0, 5, 2],
    [1, 2, 5],
    [1, 5, 3],
    [1, 3, 4],
    [1, 4, 2],
];

/// Non-indexed triangle soup: 9 floats per face, in emission order
#[derive(Debug, Clone, PartialEq)]
pub struct PolyhedronGeometry {
    positions: Vec<f32>,
}

impl PolyhedronGeometry {
    /// Wrap an existing position buffer
    ///
    /// Trailing floats that do not complete a face are ignored by every
    /// consumer of the buffer.
    pub fn from_positions(positions: Vec<f32>) -> Self {
        Self { positions }
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn face_count(&self) -> usize {
        self.positions.len() / FLOATS_PER_FACE
    }

    /// Iterate faces as vertex triples
    pub fn faces(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.positions.chunks_exact(FLOATS_PER_FACE).map(|f| {
            [
                [f[0], f[1], f[2]],
                [f[3], f[4], f[5]],
                [f[6], f[7], f[8]],
            ]
        })
    }
}

/// Octahedron of `radius`, each base face split into `(detail + 1)^2`
/// triangles whose vertices are pushed out onto the sphere
pub fn octahedron(radius: f32, detail: u32) -> PolyhedronGeometry {
    let cols = detail as usize + 1;
    let mut vertices: Vec<Vec3> = Vec::with_capacity(OCTAHEDRON_FACES.len() * cols * cols * 3);

    for [a, b, c] in OCTAHEDRON_FACES {
        subdivide_face(
            Vec3::from_array(OCTAHEDRON_VERTICES[a]),
            Vec3::from_array(OCTAHEDRON_VERTICES[b]),
            Vec3::from_array(OCTAHEDRON_VERTICES[c]),
            cols,
            &mut vertices,
        );
    }

    let positions = vertices
        .into_iter()
        .flat_map(|v| (v.normalize() * radius).to_array())
        .collect();

    PolyhedronGeometry::from_positions(positions)
}

/// Split triangle `a, b, c` into a grid of `cols` rows and emit its triangles
fn subdivide_face(a: Vec3, b: Vec3, c: Vec3, cols: usize, out: &mut Vec<Vec3>) {
    // rows[i][j]: row i walks from edge a-b toward apex c, j walks along the row
    let mut rows: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);

    for i in 0..=cols {
        let t = i as f32 / cols as f32;
        let aj = a.lerp(c, t);
        let bj = b.lerp(c, t);
        let len = cols - i;

        let row = (0..=len)
            .map(|j| {
                if len == 0 {
                    aj
                } else {
                    aj.lerp(bj, j as f32 / len as f32)
                }
            })
            .collect();
        rows.push(row);
    }

    for i in 0..cols {
        for j in 0..(2 * (cols - i) - 1) {
            let k = j / 2;
            if j % 2 == 0 {
                out.extend([rows[i][k + 1], rows[i + 1][k], rows[i][k]]);
            } else {
                out.extend([rows[i][k + 1], rows[i + 1][k + 1], rows[i + 1][k]]);
            }
        }
    }
}
