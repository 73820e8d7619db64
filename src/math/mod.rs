mod normal;
mod scalar;

pub use normal::compute_face_normal;
pub use scalar::{clamp, degrees, mix, polar, radians};
