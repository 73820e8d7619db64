use std::f32::consts::PI;

/// Radians to degrees
pub fn degrees(radian: f32) -> f32 {
    radian / PI * 180.0
}

/// Degrees to radians
pub fn radians(degree: f32) -> f32 {
    degree * PI / 180.0
}

/// Restrict `value` to `[min, max]`
///
/// Composed from `max` then `min`, so an inverted range resolves to `max`
/// instead of panicking like `f32::clamp`.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Linear interpolation, `a` is not restricted to [0, 1]
pub fn mix(x1: f32, x2: f32, a: f32) -> f32 {
    x1 * (1.0 - a) + x2 * a
}

/// Point on a sphere of `radius` from a latitude-like `radian1` and a
/// longitude-like `radian2`
pub fn polar(radian1: f32, radian2: f32, radius: f32) -> [f32; 3] {
    [
        radian1.cos() * radian2.cos() * radius,
        radian1.sin() * radius,
        radian1.cos() * radian2.sin() * radius,
    ]
}
