mod attributes;
mod polyhedron;

pub use attributes::{FaceAttributes, MAX_DELAY};
pub use polyhedron::{octahedron, PolyhedronGeometry, FLOATS_PER_FACE};
